use log::*;
use num_traits::Zero;
use tatami::{Ring, RingOps};
use tatami_matrix::MatTrait;
use tatami_matrix::sparse::SpMat;
use crate::ReduceError;

/// Sparse triplet list of a differential: 1-based `(row, col, value)`.
pub type Entries<R> = Vec<(usize, usize, R)>;

/// A chain complex presented by per-group generator counts and, per
/// adjacent pair of groups, the nonzero entries of the differential.
///
/// The matrix between groups `i` and `i + 1` has one row per generator of
/// group `i + 1` and one column per generator of group `i`. It is built
/// the first time it is touched and never rebuilt; eliminating a generator
/// deletes its vectors while the slot grid keeps its original size. The
/// complex is consumed by a single reduction run and no state survives it.
pub struct ChainComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    ranks: Vec<usize>,
    num_gens: Vec<usize>,
    support: Option<(usize, usize)>,
    inputs: Vec<Option<Entries<R>>>,
    mats: Vec<Option<SpMat<R>>>,
}

impl<R> ChainComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// `ranks[i]` is the generator count of group `i`, zero groups at
    /// either end included. `diffs[i]` lists the entries of the
    /// differential between groups `i` and `i + 1`, so there must be one
    /// list per adjacent pair.
    pub fn new(ranks: Vec<usize>, diffs: Vec<Entries<R>>) -> Result<Self, ReduceError> {
        if ranks.is_empty() || diffs.len() + 1 != ranks.len() {
            return Err(ReduceError::BadShape {
                ranks: ranks.len(),
                diffs: diffs.len()
            })
        }

        let first = ranks.iter().position(|&r| r > 0);
        let last  = ranks.iter().rposition(|&r| r > 0);
        let support = Option::zip(first, last);

        let num_gens = ranks.clone();
        let size = ranks.len();
        let inputs = diffs.into_iter().map(Some).collect();
        let mats = (0..size - 1).map(|_| None).collect();

        Ok(Self { ranks, num_gens, support, inputs, mats })
    }

    pub fn size(&self) -> usize {
        self.ranks.len()
    }

    /// Original generator count of group `i`; fixed for the lifetime of
    /// the complex, and equal to the slot count of the adjacent matrices.
    pub fn rank(&self, i: usize) -> usize {
        self.ranks[i]
    }

    /// Current number of live generators in group `i`.
    pub fn num_gens(&self, i: usize) -> usize {
        self.num_gens[i]
    }

    /// First and last groups with a nonzero original rank.
    pub fn support(&self) -> Option<(usize, usize)> {
        self.support
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_none()
    }

    pub(crate) fn dec_gens(&mut self, i: usize) {
        self.num_gens[i] -= 1;
    }

    /// Build the differential matrix `i` from its triplet list if this is
    /// the first touch. Differentials outside the support are left alone.
    pub(crate) fn ensure_matrix(&mut self, i: usize) -> Result<(), ReduceError> {
        let Some((first, last)) = self.support else {
            return Ok(())
        };
        if i < first || i >= last || self.mats[i].is_some() {
            return Ok(())
        }

        let (m, n) = (self.ranks[i + 1], self.ranks[i]);
        let mut mat = SpMat::new(m, n);

        let entries = self.inputs[i].take().unwrap_or_default();
        let nnz = entries.len();
        for (row, col, val) in entries {
            mat.set(row, col, val)?;
        }

        info!("init d[{i}]: {m}×{n}, {nnz} entries");
        self.mats[i] = Some(mat);
        Ok(())
    }

    /// The differential matrix `i`. Panics if it has not been
    /// materialized; callers go through `ensure_matrix` first.
    pub(crate) fn matrix(&self, i: usize) -> &SpMat<R> {
        self.mats[i].as_ref().unwrap()
    }

    pub(crate) fn matrix_mut(&mut self, i: usize) -> &mut SpMat<R> {
        self.mats[i].as_mut().unwrap()
    }

    /// Empty the matrix `i` into a triplet list, re-indexed to contiguous
    /// 1-based coordinates that skip deleted generators. Every surviving
    /// slot goes through `remove`, which validates both families as it
    /// goes; finding fewer live vectors than the live generator counts
    /// promise means the matrix is corrupt. Draining counts as a touch,
    /// so a never-touched matrix is materialized first.
    pub(crate) fn drain_matrix(&mut self, i: usize) -> Result<Entries<R>, ReduceError> {
        self.ensure_matrix(i)?;

        let n_rows = self.num_gens[i + 1];
        let n_cols = self.num_gens[i];
        let mat = self.mats[i].as_mut().ok_or(ReduceError::CorruptMatrix)?;
        let (n_m_rows, n_m_cols) = mat.shape();

        let mut entries = vec![];
        let mut col = 1;

        for j in 1..=n_cols {
            while col <= n_m_cols && mat.col(col)?.is_deleted() {
                col += 1;
            }
            if col > n_m_cols {
                return Err(ReduceError::CorruptMatrix)
            }

            let mut row = 1;
            for i2 in 1..=n_rows {
                while row <= n_m_rows && mat.row(row)?.is_deleted() {
                    row += 1;
                }
                if row > n_m_rows {
                    return Err(ReduceError::CorruptMatrix)
                }

                // remove checks much more than get
                let val = mat.remove(row, col)?;
                if !val.is_zero() {
                    entries.push((i2, j, val));
                }

                row += 1;
            }

            col += 1;
        }

        Ok(entries)
    }
}

/// What a reduction run leaves behind: the surviving generator counts and,
/// per adjacent pair of surviving groups, the re-indexed entries of the
/// reduced differential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReducedComplex<R> {
    ranks: Vec<usize>,
    diffs: Vec<Entries<R>>,
}

impl<R> ReducedComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub(crate) fn new(ranks: Vec<usize>, diffs: Vec<Entries<R>>) -> Self {
        Self { ranks, diffs }
    }

    pub fn size(&self) -> usize {
        self.ranks.len()
    }

    pub fn rank(&self, i: usize) -> usize {
        self.ranks[i]
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Entries of the reduced differential between groups `i` and `i + 1`.
    /// Empty when either side has no surviving generators.
    pub fn d_entries(&self, i: usize) -> &[(usize, usize, R)] {
        &self.diffs[i]
    }

    /// True when every differential is empty, so each group's homology is
    /// free of the full surviving rank.
    pub fn is_free(&self) -> bool {
        self.diffs.iter().all(|d| d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_checked() {
        let c = ChainComplex::<i32>::new(vec![], vec![]);
        assert_eq!(c.err(), Some(ReduceError::BadShape { ranks: 0, diffs: 0 }));

        let c = ChainComplex::<i32>::new(vec![1, 1], vec![]);
        assert_eq!(c.err(), Some(ReduceError::BadShape { ranks: 2, diffs: 0 }));
    }

    #[test]
    fn support() {
        let c = ChainComplex::<i32>::new(vec![0, 2, 1, 0], vec![vec![], vec![], vec![]]).unwrap();
        assert_eq!(c.support(), Some((1, 2)));
        assert!(!c.is_empty());

        let c = ChainComplex::<i32>::new(vec![0, 0], vec![vec![]]).unwrap();
        assert_eq!(c.support(), None);
        assert!(c.is_empty());
    }

    #[test]
    fn lazy_build() {
        let mut c = ChainComplex::new(
            vec![1, 2],
            vec![vec![(1, 1, 1), (2, 1, -1)]]
        ).unwrap();

        c.ensure_matrix(0).unwrap();
        let mat = c.matrix(0);

        assert_eq!(mat.shape(), (2, 1));
        assert_eq!(mat.get(1, 1), Ok(1));
        assert_eq!(mat.get(2, 1), Ok(-1));
        mat.validate().unwrap();
    }

    #[test]
    fn bad_triplet_rejected() {
        let mut c = ChainComplex::new(
            vec![1, 1],
            vec![vec![(2, 1, 1)]]
        ).unwrap();

        assert!(c.ensure_matrix(0).is_err());
    }
}
