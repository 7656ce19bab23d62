use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Error, Result};

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const CURVE: Rgb<u8> = Rgb([31, 119, 180]);

/// Draws loss against epoch: x spans the epochs, y spans [min, max] loss.
///
/// Non-finite losses are skipped. Errors if nothing is left to draw.
pub fn render_loss_curve(losses: &[f64]) -> Result<RgbImage> {
    let points: Vec<(usize, f64)> = losses.iter().copied()
        .enumerate()
        .filter(|(_, loss)| loss.is_finite())
        .collect();
    if points.is_empty() {
        return Err(Error::Plot("no finite losses to draw".into()));
    }

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let (left, right) = (MARGIN, WIDTH - MARGIN);
    let (top, bottom) = (MARGIN, HEIGHT - MARGIN);
    draw_line(&mut img, (left, bottom), (right, bottom), AXIS);
    draw_line(&mut img, (left, top), (left, bottom), AXIS);

    let (lo, hi) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, l)| {
        (lo.min(l), hi.max(l))
    });
    let last_epoch = losses.len().saturating_sub(1).max(1) as f64;
    let span = hi - lo;

    let to_pixel = |epoch: usize, loss: f64| -> (u32, u32) {
        let fx = epoch as f64 / last_epoch;
        let fy = if span > 0.0 { (loss - lo) / span } else { 0.5 };
        let x = left as f64 + fx * (right - left) as f64;
        let y = bottom as f64 - fy * (bottom - top) as f64;
        (x.round() as u32, y.round() as u32)
    };

    let mut prev = to_pixel(points[0].0, points[0].1);
    img.put_pixel(prev.0, prev.1, CURVE);
    for &(epoch, loss) in &points[1..] {
        let next = to_pixel(epoch, loss);
        draw_line(&mut img, prev, next, CURVE);
        prev = next;
    }

    Ok(img)
}

/// Renders the curve and writes it as PNG to `path`.
pub fn write_loss_curve(losses: &[f64], path: &Path) -> Result<()> {
    let img = render_loss_curve(losses)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::Plot(format!("{}: {e}", path.display())))
}

/// Bresenham line between two in-bounds points.
fn draw_line(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < img.width() && (y0 as u32) < img.height() {
            img.put_pixel(x0 as u32, y0 as u32, color);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_starts_top_left_and_ends_bottom_right() {
        let img = render_loss_curve(&[100.0, 50.0, 10.0, 0.0]).unwrap();
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(*img.get_pixel(MARGIN, MARGIN), CURVE);
        assert_eq!(*img.get_pixel(WIDTH - MARGIN, HEIGHT - MARGIN), CURVE);
        assert_eq!(*img.get_pixel(WIDTH - 5, 5), BACKGROUND);
    }

    #[test]
    fn flat_curve_sits_mid_height() {
        let img = render_loss_curve(&[3.0, 3.0]).unwrap();
        assert_eq!(*img.get_pixel(WIDTH / 2, HEIGHT / 2), CURVE);
    }

    #[test]
    fn single_point_is_drawn() {
        let img = render_loss_curve(&[1.0]).unwrap();
        assert_eq!(*img.get_pixel(MARGIN, HEIGHT / 2), CURVE);
    }

    #[test]
    fn nothing_to_draw_is_an_error() {
        assert!(matches!(render_loss_curve(&[]), Err(Error::Plot(_))));
        assert!(matches!(render_loss_curve(&[f64::NAN]), Err(Error::Plot(_))));
    }

    #[test]
    fn writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_curve.png");
        write_loss_curve(&[4.0, 2.0, 1.0], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
