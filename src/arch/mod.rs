pub mod activations;
mod buffer;
mod grid;
pub mod init;
mod network;

pub use buffer::NumericBuffer;
pub use grid::NumericGrid;
pub use init::WeightGen;
pub use network::{Hyperparams, Network, Scratch};
