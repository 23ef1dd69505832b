//! Identifier types for symbolic functions.
//!
//! This module provides the identifier used to track symbolic functions inside
//! a compilation session's arena.

use std::fmt;

/// Identifies a symbolic function within a compilation session.
///
/// Symbolic functions are stored in an arena owned by the session; the id is
/// the function's slot in that arena. Ids are only meaningful for the session
/// that minted them, enabling cheap copies in parent/top links and driver
/// bookkeeping.
///
/// # Example
///
/// ```
/// use packscript_core::FunctionId;
///
/// let id = FunctionId::new(0);
/// assert_eq!(id.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(u32);

impl FunctionId {
    /// Create a new function ID with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn_{}", self.0)
    }
}

impl From<u32> for FunctionId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<FunctionId> for u32 {
    fn from(id: FunctionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_id_creation() {
        let id = FunctionId::new(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn function_id_display() {
        let id = FunctionId::new(5);
        assert_eq!(format!("{}", id), "fn_5");
    }

    #[test]
    fn function_id_equality() {
        let a = FunctionId::new(1);
        let b = FunctionId::new(1);
        let c = FunctionId::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn function_id_roundtrip() {
        let id: FunctionId = 10.into();
        let index: u32 = id.into();
        assert_eq!(index, 10);
    }
}
