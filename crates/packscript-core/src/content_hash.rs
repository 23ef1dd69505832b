//! Deterministic content digests for compiled function bodies.
//!
//! This module provides [`ContentHash`], a 64-bit digest computed over a
//! function's evaluated command sequence. Two functions with identical bodies
//! produce identical digests regardless of their address, which lets drivers
//! detect duplicate generated blocks and reuse a single artifact.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// A deterministic 64-bit digest of a function body.
///
/// Computed with XXHash64 over the joined command text. The same body always
/// produces the same digest; the address of the function plays no part.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ContentHash(pub u64);

impl ContentHash {
    /// Empty-body digest constant.
    pub const EMPTY: ContentHash = ContentHash(0xef46db3751d8e999);

    /// Digest a body's full text.
    ///
    /// # Examples
    ///
    /// ```
    /// use packscript_core::ContentHash;
    ///
    /// let a = ContentHash::from_text("say hi\nsay bye");
    /// let b = ContentHash::from_text("say hi\nsay bye");
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn from_text(text: &str) -> Self {
        ContentHash(xxh64(text.as_bytes(), 0))
    }

    /// Digest a command sequence as if joined with newlines.
    pub fn from_commands<'a, I>(commands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let joined = commands.into_iter().collect::<Vec<_>>().join("\n");
        Self::from_text(&joined)
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:#018x})", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
