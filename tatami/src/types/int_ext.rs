use num_traits::Signed;
use crate::*;

pub trait IntOps<T = Self>: RingOps<T> {}

pub trait Integer: Ring + IntOps + Signed + PartialOrd + Ord
where for<'a> &'a Self: IntOps<Self> {}

macro_rules! impl_ops {
    ($trait:ident, $type:ty) => {
        impl $trait for $type {}
        impl<'a> $trait<$type> for &'a $type {}
    };
}

macro_rules! impl_integer {
    ($type:ident) => {
        impl_ops!(AddMonOps, $type);
        impl_ops!(AddGrpOps, $type);
        impl_ops!(MonOps, $type);
        impl_ops!(RingOps, $type);
        impl_ops!(IntOps, $type);

        impl Elem for $type {
            fn math_symbol() -> String {
                String::from("Z")
            }
        }

        impl AddMon for $type {}
        impl AddGrp for $type {}
        impl Mon for $type {}

        impl Ring for $type {
            const ENTRY_MAX: u64 = (<$type>::MAX / 2) as u64;

            fn inv(&self) -> Option<Self> {
                if self.is_unit() {
                    Some(*self)
                } else {
                    None
                }
            }

            fn is_unit(&self) -> bool {
                *self == 1 || *self == -1
            }

            fn magnitude(&self) -> u64 {
                self.unsigned_abs() as u64
            }
        }

        impl Integer for $type {}
    }
}

impl_integer!(i32);
impl_integer!(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_type() {
        fn check<T>() where T: Integer, for<'a> &'a T: IntOps<T> {}
        check::<i32>();
        check::<i64>();
    }

    #[test]
    fn int_inv() {
        assert_eq!(1.inv(), Some(1));
        assert_eq!((-1).inv(), Some(-1));
        assert_eq!(2.inv(), None);
    }

    #[test]
    fn entry_max() {
        assert_eq!(<i32 as Ring>::ENTRY_MAX, (i32::MAX / 2) as u64);
        assert_eq!(<i64 as Ring>::ENTRY_MAX, (i64::MAX / 2) as u64);
    }

    #[test]
    fn from_sign() {
        assert_eq!(i32::from_sign(Sign::Pos), 1);
        assert_eq!(i32::from_sign(Sign::Neg), -1);
    }
}
