use std::fmt::{Debug, Display};

pub trait Elem:
    Default +
    PartialEq +
    Eq +
    Clone +
    Send +
    Sync +
    Display +
    Debug +
    'static
{
    fn math_symbol() -> String;
}
