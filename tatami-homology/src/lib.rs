mod error;
mod complex;
mod reduce;
mod display;

pub use error::*;
pub use complex::*;
pub use reduce::*;
pub use display::*;
