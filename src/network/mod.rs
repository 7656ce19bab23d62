pub mod network;
pub mod params;
pub mod spec;

pub use network::Network;
pub use params::LayerParams;
pub use spec::{NetworkSpec, LayerSpec};
