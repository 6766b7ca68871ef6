mod functions;
mod non_linearity;

pub use functions::*;
pub use non_linearity::NonLinearity;
