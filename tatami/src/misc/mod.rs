mod sign;
#[cfg(feature = "tex")]
mod tex;

pub use sign::*;
#[cfg(feature = "tex")]
pub use tex::*;
