#![cfg(feature = "tex")]

use std::fmt::Display;
use itertools::Itertools;

pub trait TeX {
    fn tex_math_symbol() -> String;
    fn tex_string(&self) -> String;
}

macro_rules! impl_tex_int {
    ($type:ident) => {
        impl TeX for $type {
            fn tex_math_symbol() -> String {
                String::from("\\mathbb{Z}")
            }
            fn tex_string(&self) -> String {
                self.to_string()
            }
        }
    }
}

impl_tex_int!(i32);
impl_tex_int!(i64);

impl<I> TeX for crate::SplitInt<I>
where I: crate::Integer, for<'x> &'x I: crate::IntOps<I> {
    fn tex_math_symbol() -> String {
        String::from("\\mathbb{Z}[t]")
    }
    fn tex_string(&self) -> String {
        self.to_string()
    }
}

/// A tabular with one labeled row per element of `rows`, entries in math
/// mode.
pub fn tex_table<S, I, J, I1, I2, D, F>(caption: &str, head: S, rows: I1, cols: I2, entry: F) -> String
where
    S: Display,
    I: Display,
    J: Display,
    I1: IntoIterator<Item = I>,
    I2: IntoIterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    let cols = cols.into_iter().collect_vec();
    let mut res = String::new();

    res += "\\begin{table}\n\\centering\n\\begin{tabular}";
    res += &format!("{{r|{}}}\n", "l".repeat(cols.len()));

    res += &format!("{} & {} \\\\\n\\hline\n",
        head,
        cols.iter().map(|j| format!("${j}$")).join(" & ")
    );

    for i in rows {
        res += &format!("{} & {} \\\\\n",
            i,
            cols.iter().map(|j| format!("${}$", entry(&i, j))).join(" & ")
        );
    }

    res += "\\end{tabular}\n";
    res += &format!("\\caption{{{caption}}}\n");
    res += "\\end{table}\n";
    res
}
