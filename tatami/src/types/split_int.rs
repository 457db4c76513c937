use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use auto_impl_ops::auto_ops;
use num_traits::{Zero, One};
use crate::{Elem, AddMon, AddMonOps, AddGrp, AddGrpOps, Mon, MonOps, Ring, RingOps, Integer, IntOps};

/// An element a + bt of the ring Z[t]/(t² - 1).
///
/// The units are ±1 and ±t, each its own inverse.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SplitInt<I>(I, I)
where I: Integer, for<'x> &'x I: IntOps<I>;

impl<I> SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    pub fn new(a: I, b: I) -> Self {
        Self(a, b)
    }

    /// The generator t.
    pub fn t() -> Self {
        Self(I::zero(), I::one())
    }

    pub fn is_rational(&self) -> bool {
        self.1.is_zero()
    }

    pub fn left(&self) -> &I {
        &self.0
    }

    pub fn right(&self) -> &I {
        &self.1
    }

    pub fn pair(&self) -> (&I, &I) {
        (&self.0, &self.1)
    }
}

impl<I> From<i32> for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn from(a: i32) -> Self {
        Self(I::from(a), I::zero())
    }
}

impl<I> Display for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.pair();

        if b.is_zero() {
            return write!(f, "{a}")
        }

        let t = if b.is_one() {
            String::from("t")
        } else if (-b).is_one() {
            String::from("-t")
        } else {
            format!("{b}t")
        };

        if a.is_zero() {
            write!(f, "{t}")
        } else if b.is_negative() {
            write!(f, "{a} - {}", &t[1..])
        } else {
            write!(f, "{a} + {t}")
        }
    }
}

#[auto_ops]
impl<I> AddAssign<&SplitInt<I>> for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += &rhs.0;
        self.1 += &rhs.1;
    }
}

#[auto_ops]
impl<I> SubAssign<&SplitInt<I>> for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= &rhs.0;
        self.1 -= &rhs.1;
    }
}

#[auto_ops]
impl<I> MulAssign<&SplitInt<I>> for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn mul_assign(&mut self, rhs: &Self) {
        // (a + bt)(c + dt) = (ac + bd) + (ad + bc)t
        let a = &self.0 * &rhs.0 + &self.1 * &rhs.1;
        let b = &self.0 * &rhs.1 + &self.1 * &rhs.0;
        (self.0, self.1) = (a, b);
    }
}

impl<I> Neg for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0, -self.1)
    }
}

impl<I> Neg for &SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    type Output = SplitInt<I>;
    fn neg(self) -> Self::Output {
        SplitInt(-&self.0, -&self.1)
    }
}

impl<I> Zero for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn zero() -> Self {
        Self(I::zero(), I::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero() && self.1.is_zero()
    }
}

impl<I> One for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn one() -> Self {
        Self(I::one(), I::zero())
    }

    fn is_one(&self) -> bool {
        self.0.is_one() && self.1.is_zero()
    }
}

macro_rules! impl_split_ops {
    ($trait:ident) => {
        impl<I> $trait for SplitInt<I>
        where I: Integer, for<'x> &'x I: IntOps<I> {}

        impl<'a, I> $trait<SplitInt<I>> for &'a SplitInt<I>
        where I: Integer, for<'x> &'x I: IntOps<I> {}
    };
}

impl_split_ops!(AddMonOps);
impl_split_ops!(AddGrpOps);
impl_split_ops!(MonOps);
impl_split_ops!(RingOps);

impl<I> Elem for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    fn math_symbol() -> String {
        String::from("Z[t]")
    }
}

impl<I> AddMon for SplitInt<I> where I: Integer, for<'x> &'x I: IntOps<I> {}
impl<I> AddGrp for SplitInt<I> where I: Integer, for<'x> &'x I: IntOps<I> {}
impl<I> Mon for SplitInt<I> where I: Integer, for<'x> &'x I: IntOps<I> {}

impl<I> Ring for SplitInt<I>
where I: Integer, for<'x> &'x I: IntOps<I> {
    const ENTRY_MAX: u64 = I::ENTRY_MAX;

    fn inv(&self) -> Option<Self> {
        // every unit squares to 1
        if self.is_unit() {
            Some(self.clone())
        } else {
            None
        }
    }

    fn is_unit(&self) -> bool {
        (self.0.is_unit() && self.1.is_zero()) ||
        (self.0.is_zero() && self.1.is_unit())
    }

    fn magnitude(&self) -> u64 {
        self.0.magnitude().saturating_add(self.1.magnitude())
    }
}
