use crate::{AddGrp, AddGrpOps, Mon, MonOps, Sign};

// Rings

pub trait RingOps<T = Self>:
    AddGrpOps<T> +
    MonOps<T>
{}

pub trait Ring:
    AddGrp +
    Mon +
    RingOps +
    From<i32>
where
    for<'a> &'a Self: RingOps<Self>
{
    /// Half the maximal representable magnitude. Stored entries must stay
    /// within this bound; anything beyond it risks overflow in subsequent
    /// arithmetic.
    const ENTRY_MAX: u64;

    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;

    /// Non-negative size of the element, comparable against `ENTRY_MAX`.
    fn magnitude(&self) -> u64;

    fn from_sign(s: Sign) -> Self {
        Self::from(s.to_i32())
    }
}
