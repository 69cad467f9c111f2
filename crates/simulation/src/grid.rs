use serde::{Deserialize, Serialize};

use crate::error::WildfireError;

/// Number of cells in a `size x size` grid, refusing anything past
/// `max_cells` (including sizes whose square overflows `usize`).
pub fn checked_cell_count(size: usize, max_cells: usize) -> Result<usize, WildfireError> {
    match size.checked_mul(size) {
        Some(cells) if cells <= max_cells => Ok(cells),
        _ => Err(WildfireError::GridTooLarge { size, max_cells }),
    }
}

/// One per-cell layer of an `n x n` grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellField<T> {
    values: Vec<T>,
    size: usize,
}

impl<T: Clone> CellField<T> {
    /// A `size x size` field with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            values: vec![value; size * size],
            size,
        }
    }
}

impl<T> CellField<T> {
    /// Build a field by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                values.push(f(x, y));
            }
        }
        Self { values, size }
    }

    /// Wrap an existing row-major vector. Fails unless it holds exactly
    /// `size * size` values.
    pub fn from_vec(size: usize, values: Vec<T>) -> Result<Self, WildfireError> {
        if size.checked_mul(size) != Some(values.len()) {
            return Err(WildfireError::CellCountMismatch {
                size,
                found_cells: values.len(),
            });
        }
        Ok(Self { values, size })
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size * size`).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: T) {
        let idx = self.index(x, y);
        self.values[idx] = val;
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// A same-sized field holding `f` applied to every cell, in row-major order.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> CellField<U> {
        CellField {
            values: self.values.iter().map(f).collect(),
            size: self.size,
        }
    }
}

impl<T: Copy> CellField<T> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.values[y * self.size + x]
    }
}

impl CellField<bool> {
    /// Number of cells set to `true`.
    pub fn count_set(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }
}

/// Returns the valid 4-connected neighbors of cell (x, y) on a `size x size` grid.
pub fn neighbors4(x: usize, y: usize, size: usize) -> Vec<(usize, usize)> {
    let mut result = Vec::with_capacity(4);
    if x > 0 {
        result.push((x - 1, y));
    }
    if x + 1 < size {
        result.push((x + 1, y));
    }
    if y > 0 {
        result.push((x, y - 1));
    }
    if y + 1 < size {
        result.push((x, y + 1));
    }
    result
}
