use std::fmt::Display;
use itertools::Itertools;
use tatami::{Ring, RingOps};
use tatami::util::format::{superscript, table};
use crate::ReducedComplex;

/// `Z² ⊕ (Z/2)³`-style summand string for a module of the given rank and
/// torsion factors (repeated by multiplicity).
pub fn rmod_str<R>(rank: usize, tors: &[R]) -> String
where R: Ring, for<'x> &'x R: RingOps<R> {
    make_string(
        R::math_symbol(),
        rank,
        &tors.iter().map(|t| t.to_string()).collect_vec(),
        "0",
        superscript,
        "⊕"
    )
}

fn make_string<F>(symbol: String, rank: usize, tors: &[String], dflt: &str, power: F, oplus: &str) -> String
where F: Fn(usize) -> String {
    use std::collections::BTreeMap;

    if rank == 0 && tors.is_empty() {
        return dflt.to_string()
    }

    let mut res = vec![];

    if rank > 1 {
        res.push(format!("{}{}", symbol, power(rank)));
    } else if rank == 1 {
        res.push(symbol.clone());
    }

    let mut tors_acc = BTreeMap::<&String, usize>::new();
    for t in tors {
        *tors_acc.entry(t).or_insert(0) += 1;
    }

    for (t, &r) in tors_acc.iter() {
        if r > 1 {
            res.push(format!("({}/{}){}", symbol, t, power(r)));
        } else {
            res.push(format!("({}/{})", symbol, t));
        }
    }

    res.join(&format!(" {oplus} "))
}

impl<R> Display for ReducedComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.size() {
            write!(f, "C[{i}]: {}", rmod_str::<R>(self.rank(i), &[]))?;
            if i + 1 < self.size() && !self.d_entries(i).is_empty() {
                write!(f, ", d[{i}]: {} entries", self.d_entries(i).len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One console table combining chain-group, homology and differential
/// ranks per degree. The slices must have matching lengths, with
/// `ranks_d` one shorter than the other two.
pub fn rank_table(ranks_c: &[usize], ranks_h: &[usize], ranks_d: &[usize]) -> String {
    assert_eq!(ranks_c.len(), ranks_h.len());
    assert_eq!(ranks_d.len() + 1, ranks_c.len());

    table("", ["rank C", "rank H", "rank d"], 0..ranks_c.len(), |&row, &i| {
        match row {
            "rank C" => ranks_c[i].to_string(),
            "rank H" => ranks_h[i].to_string(),
            _ => ranks_d.get(i).map_or(String::new(), |r| r.to_string()),
        }
    })
}

#[cfg(feature = "tex")]
mod tex {
    use itertools::Itertools;
    use tatami::{Ring, RingOps, TeX, tex_table};
    use super::make_string;

    /// TeX summand cell for a module of the given rank and torsion
    /// factors.
    pub fn tex_rmod_str<R>(rank: usize, tors: &[R]) -> String
    where R: Ring + TeX, for<'x> &'x R: RingOps<R> {
        make_string(
            R::tex_math_symbol(),
            rank,
            &tors.iter().map(|t| t.tex_string()).collect_vec(),
            "0",
            |r| format!("^{{{r}}}"),
            "\\oplus"
        )
    }

    /// TeX tabular of chain-group, homology and differential ranks per
    /// degree.
    pub fn tex_rank_table(caption: &str, ranks_c: &[usize], ranks_h: &[usize], ranks_d: &[usize]) -> String {
        assert_eq!(ranks_c.len(), ranks_h.len());
        assert_eq!(ranks_d.len() + 1, ranks_c.len());

        tex_table(caption, "", ["rank C", "rank H", "rank d"], 0..ranks_c.len(), |&row, &i| {
            match row {
                "rank C" => ranks_c[i].to_string(),
                "rank H" => ranks_h[i].to_string(),
                _ => ranks_d.get(i).map_or(String::new(), |r| r.to_string()),
            }
        })
    }

    /// TeX tabular of homology groups per degree, torsion included.
    pub fn tex_homology_table<R>(caption: &str, groups: &[(usize, Vec<R>)]) -> String
    where R: Ring + TeX, for<'x> &'x R: RingOps<R> {
        tex_table(caption, "", ["$H_i$"], 0..groups.len(), |_, &i| {
            let (rank, tors) = &groups[i];
            tex_rmod_str(*rank, tors)
        })
    }
}

#[cfg(feature = "tex")]
pub use tex::*;
