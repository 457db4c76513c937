use log::*;
use tatami::{Ring, RingOps};
use crate::{ChainComplex, ReducedComplex, ReduceError};

//  C[g-1] <--------- C[g] <--------- C[g+1]
//           d[g-1]           d[g]
//
//  A generator of C[g] whose row in d[g-1] carries a unit entry u at
//  column k cancels against generator k of C[g-1]: the pivot column is
//  added into the other incident columns with coefficient -u·v, which
//  empties the pivot row, and both generators are retired from all three
//  neighboring differentials.

/// Reduces a chain complex as far as possible by elementary collapses,
/// pivoting only on invertible incidence numbers. Division-free, so
/// torsion in the surviving differentials is preserved exactly.
pub struct ChainReducer<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    complex: ChainComplex<R>,
}

impl<R> ChainReducer<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// Run the full reduction and drain the result. The complex is
    /// consumed either way; on failure everything built so far is dropped.
    pub fn reduce(complex: ChainComplex<R>) -> Result<ReducedComplex<R>, ReduceError> {
        let mut r = Self::new(complex);
        r.process_all()?;
        r.into_reduced()
    }

    pub fn new(complex: ChainComplex<R>) -> Self {
        Self { complex }
    }

    fn process_all(&mut self) -> Result<(), ReduceError> {
        let Some((first, last)) = self.complex.support() else {
            return Ok(())
        };

        for group in (first + 1)..=last {
            self.process_group(group)?;
        }

        Ok(())
    }

    /// Eliminate as many generators of `group` as possible. Rows with at
    /// most two incident entries are tried first; those cancellations are
    /// the cheapest and shrink the later unrestricted passes.
    fn process_group(&mut self, group: usize) -> Result<(), ReduceError> {
        let (mut cnt_short, mut cnt_full) = (0, 0);

        while self.eliminate_gens(group, true)? {
            cnt_short += 1;
        }
        while self.eliminate_gens(group, false)? {
            cnt_full += 1;
        }

        info!(
            "reduce C[{group}]: {cnt_short}+{cnt_full} pass(es), {} generator(s) remain",
            self.complex.num_gens(group)
        );

        Ok(())
    }

    /// One pass over the generators of `group`, eliminating each one whose
    /// row holds a unit entry. With `short` set, only rows with at most
    /// two entries are considered. Returns whether anything was
    /// eliminated.
    fn eliminate_gens(&mut self, group: usize, short: bool) -> Result<bool, ReduceError> {
        let Some((first, last)) = self.complex.support() else {
            return Ok(false)
        };

        // killing a pair touches up to three adjacent differentials
        if group > first + 1 {
            self.complex.ensure_matrix(group - 2)?;
        }
        if group > first {
            self.complex.ensure_matrix(group - 1)?;
        }
        if group < last {
            self.complex.ensure_matrix(group)?;
        }

        let mut elim_cnt = 0;

        for gen in 1..=self.complex.rank(group) {
            let pivot = {
                let row = self.complex.matrix(group - 1).row(gen)?;
                if row.is_deleted() {
                    continue
                }
                if short && row.nnz() > 2 {
                    continue
                }

                let Some((inc_gen, u)) = row.find_unit()? else {
                    continue
                };

                // entries vanish from this row as the columns are
                // combined, so walk a snapshot of it
                let entries: Vec<(usize, R)> =
                    row.iter().map(|(i, a)| (i, a.clone())).collect();
                (inc_gen, u, entries)
            };
            let (inc_gen, u, entries) = pivot;

            elim_cnt += 1;

            // u is its own inverse, so -u·v cancels v against the pivot
            let neg_u = -u;
            for (idx, v) in entries {
                if idx == inc_gen {
                    continue
                }
                let coeff = &v * &neg_u;
                self.complex.matrix_mut(group - 1).add_cols(idx, inc_gen, &coeff)?;
            }

            // only the pivot itself may survive in this row ...
            if self.complex.matrix(group - 1).row(gen)?.nnz() != 1 {
                return Err(ReduceError::DirtyKill)
            }
            self.kill_gen(group - 1, inc_gen)?;

            // ... and now it has to be gone too
            if self.complex.matrix(group - 1).row(gen)?.nnz() != 0 {
                return Err(ReduceError::DirtyKill)
            }
            self.kill_gen(group, gen)?;
        }

        if elim_cnt > 0 {
            debug!("C[{group}]: {elim_cnt} pair(s) eliminated{}", if short { " (short)" } else { "" });
        }

        Ok(elim_cnt > 0)
    }

    /// Retire generator `gen` of `group` from both neighboring
    /// differentials and decrement the group's live count.
    fn kill_gen(&mut self, group: usize, gen: usize) -> Result<(), ReduceError> {
        let (first, last) = self.complex.support().unwrap();

        if group > first {
            self.complex.matrix_mut(group - 1).erase_row(gen, true)?;
        }
        if group < last {
            self.complex.matrix_mut(group).erase_col(gen, true)?;
        }

        self.complex.dec_gens(group);
        Ok(())
    }

    /// Drain the surviving ranks and differentials. Groups outside the
    /// support report rank zero; differentials into or out of an emptied
    /// group are left empty.
    pub fn into_reduced(mut self) -> Result<ReducedComplex<R>, ReduceError> {
        let size = self.complex.size();
        let mut ranks = vec![0; size];
        let mut diffs: Vec<_> = (0..size - 1).map(|_| vec![]).collect();

        let Some((first, last)) = self.complex.support() else {
            return Ok(ReducedComplex::new(ranks, diffs))
        };

        for group in first..=last {
            if self.complex.num_gens(group) == 0 {
                continue
            }
            ranks[group] = self.complex.num_gens(group);

            if group == last {
                continue // no matrices after the last group
            }
            if self.complex.num_gens(group + 1) == 0 {
                continue // no matrices with zero size
            }

            diffs[group] = self.complex.drain_matrix(group)?;
        }

        Ok(ReducedComplex::new(ranks, diffs))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use num_traits::One;
    use tatami::SplitInt;
    use super::*;

    fn reduce(ranks: Vec<usize>, diffs: Vec<Vec<(usize, usize, i32)>>) -> ReducedComplex<i32> {
        let c = ChainComplex::new(ranks, diffs).unwrap();
        ChainReducer::reduce(c).unwrap()
    }

    #[test]
    fn empty() {
        let r = reduce(vec![0, 0, 0], vec![vec![], vec![]]);
        assert_eq!(r.ranks(), &[0, 0, 0]);
    }

    #[test]
    fn no_diff() {
        let r = reduce(vec![2, 3], vec![vec![]]);
        assert_eq!(r.ranks(), &[2, 3]);
        assert!(r.is_free());
    }

    #[test]
    fn acyclic_pair() {
        let r = reduce(vec![1, 1], vec![vec![(1, 1, 1)]]);
        assert_eq!(r.ranks(), &[0, 0]);
        assert!(r.is_free());
    }

    #[test]
    fn non_unit_survives() {
        // a single differential that is multiplication by 2; the pair
        // must not cancel, or the torsion class would be lost
        let r = reduce(vec![1, 1], vec![vec![(1, 1, 2)]]);
        assert_eq!(r.ranks(), &[1, 1]);
        assert_eq!(r.d_entries(0), &[(1, 1, 2)]);
    }

    #[test]
    fn distinct_pivots_collapse_all() {
        // ranks [1, 2, 1]; both middle generators cancel, one downwards
        // and one upwards
        let r = reduce(
            vec![1, 2, 1],
            vec![
                vec![(1, 1, 1), (2, 1, 1)],
                vec![(1, 2, 1)],
            ]
        );
        assert_eq!(r.ranks(), &[0, 0, 0]);
        assert!(r.is_free());
    }

    #[test]
    fn shared_pivot_leaves_residue() {
        // both unit incidences point at the same middle generator; the
        // first collapse consumes it and erases the second candidate, so
        // one generator survives on each side of it
        let r = reduce(
            vec![1, 2, 1],
            vec![
                vec![(1, 1, 1), (2, 1, 1)],
                vec![(1, 1, 1)],
            ]
        );
        assert_eq!(r.ranks(), &[0, 1, 1]);
        assert!(r.is_free());
    }

    #[test]
    fn elimination_arithmetic() {
        // [[1, 1], [1, 3]]: the first collapse turns the remaining corner
        // into 3 - 1 = 2, which survives re-indexed to (1, 1)
        let r = reduce(
            vec![2, 2],
            vec![vec![(1, 1, 1), (1, 2, 1), (2, 1, 1), (2, 2, 3)]]
        );
        assert_eq!(r.ranks(), &[1, 1]);
        assert_eq!(r.d_entries(0), &[(1, 1, 2)]);
    }

    #[test]
    fn full_collapse_unimodular() {
        // [[1, 1], [1, 2]] has determinant 1 and collapses completely
        let r = reduce(
            vec![2, 2],
            vec![vec![(1, 1, 1), (1, 2, 1), (2, 1, 1), (2, 2, 2)]]
        );
        assert_eq!(r.ranks(), &[0, 0]);
    }

    #[test]
    fn sphere_like() {
        // C[0] = Z⁴, C[1] = Z⁶, C[2] = Z⁴: boundary of the 3-simplex
        let d0 = vec![
            (1, 1, -1), (1, 2, 1),
            (2, 1, -1), (2, 3, 1),
            (3, 1, -1), (3, 4, 1),
            (4, 2, -1), (4, 3, 1),
            (5, 2, -1), (5, 4, 1),
            (6, 3, -1), (6, 4, 1),
        ];
        let d1 = vec![
            (1, 1, 1), (1, 2, -1), (1, 4, 1),
            (2, 1, 1), (2, 3, -1), (2, 5, 1),
            (3, 2, 1), (3, 3, -1), (3, 6, 1),
            (4, 4, 1), (4, 5, -1), (4, 6, 1),
        ];
        let r = reduce(vec![4, 6, 4], vec![d0, d1]);

        assert_eq!(r.ranks(), &[1, 0, 1]);
        assert!(r.is_free());
    }

    #[test]
    fn rank_monotone_and_nonnegative() {
        let c = ChainComplex::new(
            vec![2, 3, 1],
            vec![
                vec![(1, 1, 1), (2, 2, 1), (3, 2, 5)],
                vec![(1, 3, 1)],
            ]
        ).unwrap();

        let before = (0..3).map(|i| c.rank(i)).collect_vec();
        let r = ChainReducer::reduce(c).unwrap();

        for i in 0..3 {
            assert!(r.rank(i) <= before[i]);
        }
    }

    #[test]
    fn round_trip_without_elimination() {
        let entries = vec![(1, 1, 1), (1, 2, -1), (2, 2, 3)];
        let c = ChainComplex::new(vec![2, 2], vec![entries.clone()]).unwrap();

        let r = ChainReducer::new(c).into_reduced().unwrap();

        assert_eq!(r.ranks(), &[2, 2]);
        let drained = r.d_entries(0).iter().cloned().sorted().collect_vec();
        let expected = entries.into_iter().sorted().collect_vec();
        assert_eq!(drained, expected);
    }

    #[test]
    fn split_ring_t_pivot() {
        type U = SplitInt<i32>;

        // a ±t incidence is a unit and cancels like ±1
        let c = ChainComplex::new(
            vec![1, 2],
            vec![vec![(1, 1, U::t()), (2, 1, U::new(1, 1))]]
        ).unwrap();
        let r = ChainReducer::reduce(c).unwrap();

        assert_eq!(r.ranks(), &[0, 1]);
        assert!(r.is_free());
    }

    #[test]
    fn split_ring_arithmetic() {
        type U = SplitInt<i32>;

        // [[t, 1 + t], [1, 1 - t]]: pivoting on t sends the far corner
        // to (1 - t) - t(1 + t) = -2t
        let c = ChainComplex::new(
            vec![2, 2],
            vec![vec![
                (1, 1, U::t()), (1, 2, U::new(1, 1)),
                (2, 1, U::one()), (2, 2, U::new(1, -1)),
            ]]
        ).unwrap();
        let r = ChainReducer::reduce(c).unwrap();

        assert_eq!(r.ranks(), &[1, 1]);
        assert_eq!(r.d_entries(0), &[(1, 1, U::new(0, -2))]);
    }

    #[test]
    fn consumed_on_failure() {
        // an out-of-range triplet surfaces on first touch and aborts the run
        let c = ChainComplex::new(
            vec![1, 1, 1],
            vec![vec![(1, 1, 1)], vec![(5, 5, 1)]]
        ).unwrap();

        assert!(ChainReducer::reduce(c).is_err());
    }
}
