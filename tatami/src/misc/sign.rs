use std::ops::Neg;
use derive_more::{Display, Debug};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Display, Debug)]
pub enum Sign {
    #[default]
    #[display("+")]
    #[debug("+")]
    Pos,

    #[display("-")]
    #[debug("-")]
    Neg
}

impl Sign {
    pub fn is_positive(&self) -> bool {
        self == &Sign::Pos
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Sign::Pos =>  1,
            Sign::Neg => -1
        }
    }
}

impl From<i32> for Sign {
    fn from(value: i32) -> Self {
        match value {
             1 => Sign::Pos,
            -1 => Sign::Neg,
             _ => panic!("not a sign: {value}")
        }
    }
}

impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self {
        use Sign::*;
        match self {
            Neg => Pos,
            Pos => Neg
        }
    }
}
