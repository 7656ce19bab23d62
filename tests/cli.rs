use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ferrite-thermo"))
}

#[test]
fn missing_argument_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bin().current_dir(tmp.path()).output().unwrap();
    assert!(!out.status.success());
    assert!(!out.stderr.is_empty());
}

#[test]
fn non_numeric_argument_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bin().current_dir(tmp.path()).arg("warm").output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("warm"));
}

#[test]
fn nan_argument_exits_with_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bin().current_dir(tmp.path()).arg("NaN").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: invalid argument"));
}

#[test]
fn trains_then_reuses() {
    let tmp = tempfile::tempdir().unwrap();
    let args = ["-10", "--epochs", "20", "--seed", "3", "--output-dir", "cache"];

    let first = bin().current_dir(tmp.path()).args(args).output().unwrap();
    assert!(first.status.success());
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("Training from scratch"));
    assert!(stdout.contains("-10°C is"));
    assert!(tmp.path().join("cache/model.json").exists());
    assert!(tmp.path().join("cache/data_hash.txt").exists());
    assert!(tmp.path().join("cache/loss_curve.png").exists());

    let second = bin().current_dir(tmp.path()).args(args).output().unwrap();
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("Loaded cached model"));
    assert!(stdout.contains("layer 3:"));
}
