use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use num_traits::{Zero, One};
use crate::Elem;

// Additive monoids

pub trait AddMonOps<T = Self>:
    Sized +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T>
{}

pub trait AddMon:
    Elem +
    Zero +
    AddMonOps +
    AddAssign +
    for<'a> AddAssign<&'a Self>
where
    for<'a> &'a Self: AddMonOps<Self>
{}

// Additive groups

pub trait AddGrpOps<T = Self>:
    AddMonOps<T> +
    Neg<Output = T> +
    Sub<T, Output = T> +
    for<'a> Sub<&'a T, Output = T>
{}

pub trait AddGrp:
    AddMon +
    AddGrpOps +
    SubAssign +
    for<'a> SubAssign<&'a Self>
where
    for<'a> &'a Self: AddGrpOps<Self>
{}

// Monoids (multiplicative)

pub trait MonOps<T = Self>:
    Sized +
    Mul<T, Output = T> +
    for<'a> Mul<&'a T, Output = T>
{}

pub trait Mon:
    Elem +
    MonOps +
    MulAssign +
    for<'a> MulAssign<&'a Self> +
    One
where
    for<'a> &'a Self: MonOps<Self>
{}
