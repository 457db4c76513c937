mod elem;
mod ops;
mod ring;

pub use elem::*;
pub use ops::*;
pub use ring::*;
