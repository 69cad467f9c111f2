//! Resource-placement actions and the exhaustive action space.
//!
//! An [`Action`] is an immutable `n x n` boolean mask of where resources are
//! deployed for the next transition. The [`ActionSpace`] enumerates all
//! `2^(n*n)` masks lazily by index: nothing is materialized up front, and any
//! action can be rebuilt from its index, so the space is restartable and can
//! be split across workers.
//!
//! Enumeration follows binary counting order with the last cell as the least
//! significant bit: index 0 deploys nothing, index 1 deploys only the
//! bottom-right cell, and the final index deploys everywhere.

use bevy::log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_ENUMERABLE_CELLS, WARN_ENUMERABLE_CELLS};
use crate::error::WildfireError;
use crate::grid::{checked_cell_count, CellField};

/// A resource placement over an `n x n` grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    size: usize,
    cells: Vec<bool>,
}

impl Action {
    /// The action that deploys no resources.
    pub fn none(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Build an action by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Wrap a row-major mask. Fails unless it holds exactly `size * size` cells.
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Result<Self, WildfireError> {
        let field = CellField::from_vec(size, cells)?;
        Ok(Self {
            size,
            cells: field.as_slice().to_vec(),
        })
    }

    /// Rebuild the action at `index` of the binary counting order.
    fn from_index(size: usize, index: u64) -> Self {
        let cell_count = size * size;
        let cells = (0..cell_count)
            .map(|k| (index >> (cell_count - 1 - k)) & 1 == 1)
            .collect();
        Self { size, cells }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.size + x]
    }

    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of cells with a resource deployed.
    pub fn deployed_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// All `2^(n*n)` actions over an `n x n` grid, produced on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    size: usize,
    len: u64,
}

impl ActionSpace {
    /// Action space for an `n x n` grid under the default ceiling of
    /// [`MAX_ENUMERABLE_CELLS`] cells.
    pub fn new(size: usize) -> Result<Self, WildfireError> {
        Self::with_limit(size, MAX_ENUMERABLE_CELLS)
    }

    /// Action space with a caller-chosen cell ceiling. The ceiling can only
    /// tighten the default one, never relax it.
    pub fn with_limit(size: usize, max_cells: usize) -> Result<Self, WildfireError> {
        if size == 0 {
            return Err(WildfireError::EmptyGrid);
        }
        let cells = checked_cell_count(size, max_cells.min(MAX_ENUMERABLE_CELLS))?;
        if cells > WARN_ENUMERABLE_CELLS {
            warn!(
                "ActionSpace: {}x{} grid has {} actions; exhaustive planning will be slow",
                size,
                size,
                1u64 << cells
            );
        }
        Ok(Self {
            size,
            len: 1u64 << cells,
        })
    }

    /// Side length of the grids these actions apply to.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of actions, `2^(n*n)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: even a 1x1 grid has two actions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The action at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Action> {
        let index = index as u64;
        (index < self.len).then(|| Action::from_index(self.size, index))
    }

    /// The first action in enumeration order (no resources deployed).
    pub fn first(&self) -> Action {
        Action::none(self.size)
    }

    /// Iterate every action in enumeration order. Each call starts over.
    pub fn iter(&self) -> ActionIter {
        ActionIter {
            size: self.size,
            next: 0,
            end: self.len,
        }
    }
}

impl<'a> IntoIterator for &'a ActionSpace {
    type Item = Action;
    type IntoIter = ActionIter;

    fn into_iter(self) -> ActionIter {
        self.iter()
    }
}

/// Lazy iterator over an [`ActionSpace`].
#[derive(Debug, Clone)]
pub struct ActionIter {
    size: usize,
    next: u64,
    end: u64,
}

impl Iterator for ActionIter {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        if self.next >= self.end {
            return None;
        }
        let action = Action::from_index(self.size, self.next);
        self.next += 1;
        Some(action)
    }

    fn nth(&mut self, n: usize) -> Option<Action> {
        self.next = self.next.saturating_add(n as u64).min(self.end);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ActionIter {}

/// Enumerate every resource placement over an `n x n` grid.
///
/// Refuses grids above [`MAX_ENUMERABLE_CELLS`] cells and logs a warning above
/// [`WARN_ENUMERABLE_CELLS`].
pub fn enumerate_actions(n: usize) -> Result<ActionSpace, WildfireError> {
    ActionSpace::new(n)
}
