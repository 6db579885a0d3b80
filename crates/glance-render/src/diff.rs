#![forbid(unsafe_code)]

//! Diff computation between buffers.
//!
//! Row-major scan of two equally sized buffers; adjacent changed cells on
//! the same row are coalesced into [`ChangeRun`]s so the presenter can
//! position the cursor once per run.

use crate::buffer::Buffer;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

impl ChangeRun {
    /// Create a new change run.
    #[inline]
    pub const fn new(y: u16, x0: u16, x1: u16) -> Self {
        Self { y, x0, x1 }
    }
}

/// The set of changed cell positions between two buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    /// Compare `old` and `new` cell by cell.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in size.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        assert_eq!(
            (old.width(), old.height()),
            (new.width(), new.height()),
            "buffer dimensions must match"
        );

        let mut changes = Vec::new();
        for y in 0..new.height() {
            let (old_row, new_row) = (old.row_cells(y), new.row_cells(y));
            for (x, (a, b)) in old_row.iter().zip(new_row).enumerate() {
                if a != b {
                    changes.push((x as u16, y));
                }
            }
        }
        Self { changes }
    }

    /// Every cell of `buffer`, for the first paint or after a resize.
    pub fn full(buffer: &Buffer) -> Self {
        let mut changes = Vec::with_capacity(buffer.cells().len());
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                changes.push((x, y));
            }
        }
        Self { changes }
    }

    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed positions as `(x, y)`, row-major.
    #[inline]
    pub fn changes(&self) -> &[(u16, u16)] {
        &self.changes
    }

    /// Coalesce changes into per-row runs.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs: Vec<ChangeRun> = Vec::new();
        for &(x, y) in &self.changes {
            match runs.last_mut() {
                Some(run) if run.y == y && run.x1 + 1 == x => run.x1 = x,
                _ => runs.push(ChangeRun::new(y, x, x)),
            }
        }
        runs
    }
}
