mod int_ext;
mod split_int;

pub use int_ext::*;
pub use split_int::*;
