use std::fmt::Display;
use itertools::Itertools;
use num_traits::Zero;
use tatami::{Ring, RingOps};
use crate::{MatTrait, MatError};
use super::sp_vec::SpVec;

/// A sparse matrix stored twice over: once as a family of row vectors and
/// once as a family of column vectors. Every mutation goes through both
/// families, so that `rows[r]` at index `c` always agrees with `cols[c]`
/// at index `r`.
///
/// The slot grid is fixed at creation. Retiring a generator deletes its
/// row or column vector; dimensions never change. Indices are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpMat<R> {
    rows: Vec<SpVec<R>>,
    cols: Vec<SpVec<R>>,
}

impl<R> MatTrait for SpMat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }
}

impl<R> SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// A matrix with every vector empty and alive. Zero dimensions are
    /// allowed and give a matrix with no slots on that side.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        let rows = (0..nrows).map(|_| SpVec::new()).collect();
        let cols = (0..ncols).map(|_| SpVec::new()).collect();
        Self { rows, cols }
    }

    fn check_row(&self, row: usize) -> Result<(), MatError> {
        if row < 1 || row > self.nrows() {
            Err(MatError::BadRow(row, self.nrows()))
        } else {
            Ok(())
        }
    }

    fn check_col(&self, col: usize) -> Result<(), MatError> {
        if col < 1 || col > self.ncols() {
            Err(MatError::BadCol(col, self.ncols()))
        } else {
            Ok(())
        }
    }

    pub fn row(&self, row: usize) -> Result<&SpVec<R>, MatError> {
        self.check_row(row)?;
        Ok(&self.rows[row - 1])
    }

    pub fn col(&self, col: usize) -> Result<&SpVec<R>, MatError> {
        self.check_col(col)?;
        Ok(&self.cols[col - 1])
    }

    /// The value at `(row, col)`, ring-zero if there is none. With the
    /// `checks` feature on, the row-side read is cross-validated against
    /// the column side; a disagreement means the engine itself corrupted
    /// the matrix.
    pub fn get(&self, row: usize, col: usize) -> Result<R, MatError> {
        self.check_row(row)?;
        self.check_col(col)?;

        let val = self.rows[row - 1].get(col);

        #[cfg(feature = "checks")]
        if val != self.cols[col - 1].get(row) {
            return Err(MatError::Mismatch)
        }

        Ok(val)
    }

    /// Write `val` at `(row, col)` into both families. The magnitude bound
    /// is checked before anything is touched, so a `TooBig` failure leaves
    /// the matrix as it was. A failure between the two writes does not:
    /// callers must treat it as fatal for the whole matrix.
    pub fn set(&mut self, row: usize, col: usize, val: R) -> Result<(), MatError> {
        self.check_row(row)?;
        self.check_col(col)?;

        if val.magnitude() > R::ENTRY_MAX {
            return Err(MatError::TooBig)
        }

        if val.is_zero() {
            self.remove(row, col)?;
            return Ok(())
        }

        self.rows[row - 1].set(col, val.clone())?;
        self.cols[col - 1].set(row, val)
    }

    /// Remove the entry at `(row, col)` from both families and return its
    /// value. The two removed values must agree.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<R, MatError> {
        self.check_row(row)?;
        self.check_col(col)?;

        let valr = self.rows[row - 1].remove(col)?;
        let valc = self.cols[col - 1].remove(row)?;

        if valr != valc {
            return Err(MatError::Mismatch)
        }

        Ok(valr)
    }

    /// Erase every entry of the row, mirroring each removal into the
    /// column family. With `mark_deleted` the row is retired for good.
    pub fn erase_row(&mut self, row: usize, mark_deleted: bool) -> Result<(), MatError> {
        self.check_row(row)?;

        let (rows, cols) = (&mut self.rows, &mut self.cols);
        rows[row - 1].erase_all(mark_deleted, |ind, val| {
            let removed = cols[ind - 1].remove(row)?;
            if cfg!(feature = "checks") && removed != *val {
                return Err(MatError::Mismatch)
            }
            Ok(())
        })
    }

    /// Column analogue of `erase_row`.
    pub fn erase_col(&mut self, col: usize, mark_deleted: bool) -> Result<(), MatError> {
        self.check_col(col)?;

        let (rows, cols) = (&mut self.rows, &mut self.cols);
        cols[col - 1].erase_all(mark_deleted, |ind, val| {
            let removed = rows[ind - 1].remove(col)?;
            if cfg!(feature = "checks") && removed != *val {
                return Err(MatError::Mismatch)
            }
            Ok(())
        })
    }

    /// `row1 += r * row2`. Returns the largest magnitude produced, for
    /// diagnostics.
    pub fn add_rows(&mut self, row1: usize, row2: usize, r: &R) -> Result<u64, MatError> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        Self::add_vecs(&mut self.rows, &mut self.cols, row1, row2, r)
    }

    /// `col1 += r * col2`. Returns the largest magnitude produced.
    pub fn add_cols(&mut self, col1: usize, col2: usize, r: &R) -> Result<u64, MatError> {
        self.check_col(col1)?;
        self.check_col(col2)?;
        Self::add_vecs(&mut self.cols, &mut self.rows, col1, col2, r)
    }

    /// `family[i1] += r * family[i2]`, as one merge of the two sorted entry
    /// lists. Every index of the source is touched in the target: matched
    /// entries are summed, unmatched ones inserted, and results that come
    /// out zero are dropped rather than stored. Each touched index is
    /// mirrored into the orthogonal family on the spot. The magnitude
    /// bound is enforced entry by entry during the merge; intermediate
    /// values can overflow it even when the end result would not.
    fn add_vecs(family: &mut [SpVec<R>], others: &mut [SpVec<R>], i1: usize, i2: usize, r: &R) -> Result<u64, MatError> {
        if family[i1 - 1].is_deleted() || family[i2 - 1].is_deleted() {
            return Err(MatError::Deleted)
        }

        let src = family[i2 - 1].entries().to_vec();
        let tgt = &mut family[i1 - 1];

        let n = tgt.nnz();
        let mut old = tgt.take_entries().into_iter().peekable();
        let mut merged = Vec::with_capacity(n + src.len());
        let mut maxval: u64 = 0;

        for (ind, b) in src {
            // target entries below the next source index stay untouched
            while old.peek().is_some_and(|(i, _)| *i < ind) {
                merged.push(old.next().unwrap());
            }

            let add = r * &b;
            let val = if old.peek().is_some_and(|(i, _)| *i == ind) {
                let (_, a) = old.next().unwrap();
                a + add
            } else {
                add
            };

            let m = val.magnitude();
            if m > R::ENTRY_MAX {
                return Err(MatError::TooBig)
            }
            if m > maxval {
                maxval = m;
            }

            others[ind - 1].set(i1, val.clone())?;

            if !val.is_zero() {
                merged.push((ind, val));
            }
        }

        merged.extend(old);
        family[i1 - 1].set_entries(merged);

        Ok(maxval)
    }

    /// All live entries, row by row, as 1-based `(row, col, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> {
        self.rows.iter().enumerate().flat_map(|(i, v)|
            v.iter().map(move |(j, a)| (i + 1, j, a))
        )
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|v| v.nnz()).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.nnz() == 0
    }

    /// Full audit: every vector of each family against the other family.
    pub fn validate(&self) -> Result<(), MatError> {
        for (i, vec) in self.rows.iter().enumerate() {
            vec.validate(self.ncols(), i + 1, Some(&self.cols))?;
        }
        for (j, vec) in self.cols.iter().enumerate() {
            vec.validate(self.nrows(), j + 1, Some(&self.rows))?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut SpVec<R> {
        &mut self.rows[row - 1]
    }
}

impl<R> Display for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// Aligned grid. Zero slots print as `·`, deleted vectors as `x`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (m, n) = self.shape();
        if m == 0 || n == 0 {
            return write!(f, "[;]")
        }

        let cells = (0..m).map(|i| (0..n).map(|j| {
            if self.rows[i].is_deleted() || self.cols[j].is_deleted() {
                String::from("x")
            } else {
                let a = self.rows[i].get(j + 1);
                if a.is_zero() { String::from("·") } else { a.to_string() }
            }
        }).collect_vec()).collect_vec();

        let widths = (0..n).map(|j|
            cells.iter().map(|row| row[j].chars().count()).max().unwrap()
        ).collect_vec();

        for row in cells.iter() {
            let line = row.iter().enumerate()
                .map(|(j, c)| format!("{c:>w$}", w = widths[j]))
                .join(" ");
            writeln!(f, "[{line}]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_from(shape: (usize, usize), entries: &[(usize, usize, i32)]) -> SpMat<i32> {
        let mut a = SpMat::new(shape.0, shape.1);
        for &(i, j, v) in entries {
            a.set(i, j, v).unwrap();
        }
        a
    }

    #[test]
    fn get_set() {
        let a = mat_from((2, 3), &[(1, 1, 1), (1, 3, -2), (2, 2, 5)]);

        assert_eq!(a.shape(), (2, 3));
        assert_eq!(a.get(1, 1), Ok(1));
        assert_eq!(a.get(1, 2), Ok(0));
        assert_eq!(a.get(1, 3), Ok(-2));
        assert_eq!(a.get(2, 2), Ok(5));
        assert_eq!(a.nnz(), 3);
        a.validate().unwrap();
    }

    #[test]
    fn bad_indices() {
        let mut a = mat_from((2, 2), &[]);

        assert_eq!(a.get(0, 1), Err(MatError::BadRow(0, 2)));
        assert_eq!(a.get(3, 1), Err(MatError::BadRow(3, 2)));
        assert_eq!(a.get(1, 3), Err(MatError::BadCol(3, 2)));
        assert_eq!(a.set(3, 1, 1), Err(MatError::BadRow(3, 2)));
        assert_eq!(a.remove(1, 0), Err(MatError::BadCol(0, 2)));
    }

    #[test]
    fn set_zero_removes() {
        let mut a = mat_from((2, 2), &[(1, 1, 3)]);
        a.set(1, 1, 0).unwrap();

        assert_eq!(a.nnz(), 0);
        a.validate().unwrap();
    }

    #[test]
    fn set_too_big_is_atomic() {
        let mut a = mat_from((2, 2), &[]);
        let big = i32::MAX / 2 + 1;

        assert_eq!(a.set(1, 1, big), Err(MatError::TooBig));
        assert_eq!(a.get(1, 1), Ok(0));
        assert_eq!(a.nnz(), 0);
        a.validate().unwrap();
    }

    #[test]
    fn remove() {
        let mut a = mat_from((2, 2), &[(1, 2, 7)]);

        assert_eq!(a.remove(1, 2), Ok(7));
        assert_eq!(a.remove(1, 2), Ok(0));
        assert_eq!(a.nnz(), 0);
        a.validate().unwrap();
    }

    #[test]
    fn erase_row() {
        let mut a = mat_from((2, 3), &[(1, 1, 1), (1, 2, 2), (2, 2, 3)]);
        a.erase_row(1, true).unwrap();

        assert!(a.row(1).unwrap().is_deleted());
        assert_eq!(a.get(2, 2), Ok(3));
        assert_eq!(a.col(1).unwrap().nnz(), 0);
        assert_eq!(a.col(2).unwrap().nnz(), 1);
        assert_eq!(a.set(1, 1, 1), Err(MatError::Deleted));
        a.validate().unwrap();
    }

    #[test]
    fn erase_col_keep_alive() {
        let mut a = mat_from((2, 2), &[(1, 1, 1), (2, 1, 2)]);
        a.erase_col(1, false).unwrap();

        assert!(!a.col(1).unwrap().is_deleted());
        assert_eq!(a.nnz(), 0);
        a.set(1, 1, 4).unwrap();
        assert_eq!(a.get(1, 1), Ok(4));
        a.validate().unwrap();
    }

    #[test]
    fn add_rows_disjoint() {
        let mut a = mat_from((2, 3), &[(1, 1, 1), (2, 2, 2), (2, 3, 3)]);
        let max = a.add_rows(1, 2, &2).unwrap();

        assert_eq!(max, 6);
        assert_eq!(a.get(1, 1), Ok(1));
        assert_eq!(a.get(1, 2), Ok(4));
        assert_eq!(a.get(1, 3), Ok(6));
        assert_eq!(a.get(2, 2), Ok(2));
        a.validate().unwrap();
    }

    #[test]
    fn add_rows_cancelling() {
        let mut a = mat_from((2, 2), &[(1, 1, 2), (1, 2, 1), (2, 1, -2), (2, 2, 1)]);
        a.add_rows(1, 2, &1).unwrap();

        assert_eq!(a.get(1, 1), Ok(0));
        assert_eq!(a.get(1, 2), Ok(2));
        assert_eq!(a.row(1).unwrap().nnz(), 1);
        assert_eq!(a.col(1).unwrap().nnz(), 1);
        a.validate().unwrap();
    }

    #[test]
    fn add_cols() {
        let mut a = mat_from((3, 2), &[(1, 1, 1), (2, 1, 2), (2, 2, 5), (3, 2, 1)]);
        a.add_cols(2, 1, &-1).unwrap();

        assert_eq!(a.get(1, 2), Ok(-1));
        assert_eq!(a.get(2, 2), Ok(3));
        assert_eq!(a.get(3, 2), Ok(1));
        assert_eq!(a.get(1, 1), Ok(1));
        a.validate().unwrap();
    }

    #[test]
    fn add_rows_overflow() {
        let big = i32::MAX / 2;
        let mut a = mat_from((2, 1), &[(1, 1, big), (2, 1, big)]);

        assert_eq!(a.add_rows(1, 2, &1), Err(MatError::TooBig));
    }

    #[test]
    fn add_rows_deleted() {
        let mut a = mat_from((2, 2), &[(1, 1, 1)]);
        a.erase_row(2, true).unwrap();

        assert_eq!(a.add_rows(1, 2, &1), Err(MatError::Deleted));
        assert_eq!(a.add_rows(2, 1, &1), Err(MatError::Deleted));
    }

    #[test]
    fn zero_dims() {
        let a: SpMat<i32> = SpMat::new(0, 3);

        assert_eq!(a.shape(), (0, 3));
        assert_eq!(a.nnz(), 0);
        a.validate().unwrap();
    }

    #[cfg(feature = "checks")]
    #[test]
    fn get_detects_mismatch() {
        let mut a = mat_from((2, 2), &[(1, 1, 1)]);

        // break the row side behind the matrix's back
        a.row_mut(1).set(1, 2).unwrap();

        assert_eq!(a.get(1, 1), Err(MatError::Mismatch));
        assert!(a.validate().is_err());
    }

    #[cfg(feature = "checks")]
    #[test]
    fn erase_detects_mismatch() {
        let mut a = mat_from((2, 2), &[(1, 1, 1), (1, 2, 2)]);
        a.row_mut(1).set(2, 5).unwrap();

        assert_eq!(a.erase_row(1, true), Err(MatError::Mismatch));
    }

    #[test]
    fn display() {
        let mut a = mat_from((2, 2), &[(1, 1, 1), (2, 2, -12)]);
        assert_eq!(a.to_string(), "[1   ·]\n[· -12]\n");

        a.erase_row(2, true).unwrap();
        assert_eq!(a.to_string(), "[1 ·]\n[x x]\n");
    }
}
