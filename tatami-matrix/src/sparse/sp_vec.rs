use std::fmt::Display;
use itertools::Itertools;
use num_traits::Zero;
use tatami::{Ring, RingOps};
use crate::MatError;

/// One row or column of a sparse matrix: the nonzero entries only, kept in
/// strictly increasing index order. Indices are 1-based, following the
/// convention of the chain-complex callers.
///
/// A value that would be ring-zero is never stored; zero and absence are
/// the same thing. A vector is either alive or deleted, and deletion is
/// terminal: a deleted vector holds no entries and rejects every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SpVec<R> {
    entries: Vec<(usize, R)>,
    deleted: bool,
}

impl<R> SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new() -> Self {
        Self { entries: vec![], deleted: false }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Number of stored entries. Zero for empty-alive and deleted alike.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &R)> {
        self.entries.iter().map(|(i, a)| (*i, a))
    }

    fn position(&self, ind: usize) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&ind, |(i, _)| *i)
    }

    /// The value at `ind`, ring-zero if absent.
    pub fn get(&self, ind: usize) -> R {
        match self.position(ind) {
            Ok(pos) => self.entries[pos].1.clone(),
            Err(_)  => R::zero(),
        }
    }

    /// The first entry, in index order, whose value is invertible.
    pub fn find_unit(&self) -> Result<Option<(usize, R)>, MatError> {
        if self.deleted {
            return Err(MatError::Deleted)
        }

        let found = self.entries.iter()
            .find(|(_, a)| a.is_unit())
            .map(|(i, a)| (*i, a.clone()));

        Ok(found)
    }

    /// Detach the entry at `ind` and return its value, ring-zero if there
    /// was none.
    pub fn remove(&mut self, ind: usize) -> Result<R, MatError> {
        if self.deleted {
            return Err(MatError::Deleted)
        }

        match self.position(ind) {
            Ok(pos) => Ok(self.entries.remove(pos).1),
            Err(_)  => Ok(R::zero()),
        }
    }

    /// Insert or update the entry at `ind`. Setting a zero value is the
    /// same as removing the entry.
    pub fn set(&mut self, ind: usize, val: R) -> Result<(), MatError> {
        if self.deleted {
            return Err(MatError::Deleted)
        }

        if val.is_zero() {
            self.remove(ind)?;
            return Ok(())
        }

        match self.position(ind) {
            Ok(pos)  => self.entries[pos].1 = val,
            Err(pos) => self.entries.insert(pos, (ind, val)),
        }

        Ok(())
    }

    /// Drain every entry front-to-back, reporting each one so the caller
    /// can mirror the removal into the orthogonal family of vectors. The
    /// vector stays well-formed at every step, so an error from the
    /// callback leaves it holding exactly the unprocessed tail. If
    /// `mark_deleted` is set, the vector is retired after the sweep.
    pub fn erase_all<F>(&mut self, mark_deleted: bool, mut on_removed: F) -> Result<(), MatError>
    where F: FnMut(usize, &R) -> Result<(), MatError> {
        if self.deleted {
            return Err(MatError::Deleted)
        }

        while !self.entries.is_empty() {
            let (ind, val) = self.entries.remove(0);
            on_removed(ind, &val)?;
        }

        if mark_deleted {
            self.deleted = true;
        }

        Ok(())
    }

    /// Audit the vector's own invariants and, given the orthogonal family,
    /// per-entry agreement with it.
    pub fn validate(&self, max_index: usize, v_ind: usize, others: Option<&[SpVec<R>]>) -> Result<(), MatError> {
        if self.deleted && !self.entries.is_empty() {
            return Err(MatError::Corrupt("deleted vector is not empty"))
        }
        if self.nnz() > max_index {
            return Err(MatError::Corrupt("too many entries"))
        }

        let mut prev = 0;
        for (ind, val) in self.iter() {
            if ind == 0 {
                return Err(MatError::Corrupt("index is not positive"))
            }
            if ind > max_index {
                return Err(MatError::Corrupt("index is too big"))
            }
            if ind <= prev {
                return Err(MatError::Corrupt("indices are not increasing"))
            }
            if val.is_zero() {
                return Err(MatError::Corrupt("stored value is zero"))
            }
            prev = ind;

            if let Some(others) = others {
                if others[ind - 1].get(v_ind) != *val {
                    return Err(MatError::Corrupt("rows and columns don't match"))
                }
            }
        }

        Ok(())
    }

    pub(crate) fn entries(&self) -> &[(usize, R)] {
        &self.entries
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(usize, R)> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn set_entries(&mut self, entries: Vec<(usize, R)>) {
        self.entries = entries;
    }
}

impl<R> Display for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.deleted {
            return write!(f, "vector is deleted")
        }

        let body = self.iter().map(|(i, a)| format!("{i}, {a}")).join("; ");
        write!(f, "{} entries: {}.", self.nnz(), body)
    }
}
