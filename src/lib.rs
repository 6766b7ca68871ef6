pub mod arch;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod training;

pub use error::{MindErr, Result};
