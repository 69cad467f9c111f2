// ---------------------------------------------------------------------------
// WildfireError: configuration and shape errors
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised when a grid, action space or planner is configured.
///
/// Steady-state simulation never fails: every numeric domain the transition
/// relies on (non-negative wind under the square root, non-negative fuel) is
/// established at construction and maintained by clamping. Anything that
/// could break those invariants is rejected here instead.
#[derive(Debug, Clone, PartialEq)]
pub enum WildfireError {
    /// A grid with zero cells was requested.
    EmptyGrid,
    /// A `size x size` grid exceeds a cell limit: the grid-wide ceiling, or
    /// the exhaustive action enumeration limit.
    GridTooLarge { size: usize, max_cells: usize },
    /// An action or layer does not match the grid it is applied to.
    ShapeMismatch { expected: usize, found: usize },
    /// A raw cell vector does not hold `size * size` values.
    CellCountMismatch { size: usize, found_cells: usize },
    /// A parameter is outside its valid domain.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl WildfireError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        WildfireError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for WildfireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildfireError::EmptyGrid => write!(f, "grid must have at least one cell"),
            WildfireError::GridTooLarge { size, max_cells } => write!(
                f,
                "a {size}x{size} grid exceeds the limit of {max_cells} cells"
            ),
            WildfireError::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected a {expected}x{expected} grid, found {found}x{found}"
            ),
            WildfireError::CellCountMismatch { size, found_cells } => write!(
                f,
                "expected {size}x{size} cells, found {found_cells}"
            ),
            WildfireError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for WildfireError {}
