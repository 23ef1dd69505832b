//! Unified error types for packscript.
//!
//! This module provides a consistent error type hierarchy for all phases of
//! pack compilation: template evaluation, rendering, and artifact storage.
//!
//! ## Error Hierarchy
//!
//! ```text
//! CompileError (top-level wrapper)
//! ├── TemplateError - Inline template evaluation errors
//! ├── RenderError   - Placeholder substitution errors during rendering
//! └── StoreError    - Artifact store I/O errors
//! ```
//!
//! ## Usage
//!
//! Each phase-specific error type can be used directly for fine-grained
//! handling, or converted to `CompileError` for unified error handling:
//!
//! ```ignore
//! use packscript_core::{CompileError, TemplateError};
//!
//! fn compile_line(line: &str) -> Result<(), CompileError> {
//!     let evaluated = evaluate(line)?; // TemplateError -> CompileError
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Template Errors
// ============================================================================

/// Errors that occur while evaluating inline templates in command lines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// The rewritten template could not be evaluated.
    ///
    /// Carries the rewritten template text so the author can see exactly what
    /// the evaluator was handed, plus the evaluator's own failure detail.
    #[error("invalid template literal '{template}': {detail}")]
    InvalidExpression { template: String, detail: String },
}

impl TemplateError {
    /// The rewritten template text that failed to evaluate.
    pub fn template(&self) -> &str {
        match self {
            TemplateError::InvalidExpression { template, .. } => template,
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while rendering a function body to artifact text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A command used the parent placeholder but the function has no parent.
    #[error("$parent used where there is no valid parent: '{command}'")]
    MissingParent { command: String },
}

// ============================================================================
// Store Errors
// ============================================================================

/// Errors raised by artifact store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing artifact contents failed.
    #[error("failed to write artifact '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Materializing an artifact failed.
    #[error("failed to materialize artifact '{}': {source}", path.display())]
    Materialize {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Get the artifact path this error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            StoreError::Write { path, .. } => path,
            StoreError::Materialize { path, .. } => path,
        }
    }
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type wrapping all compilation phases.
///
/// Phase errors convert into this automatically via `?`, so driver code can
/// return a single error type while keeping the phase information intact.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A template evaluation error.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A rendering error.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An artifact store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CompileError {
    /// Check if this is a template evaluation error.
    pub fn is_template(&self) -> bool {
        matches!(self, CompileError::Template(_))
    }

    /// Check if this is a rendering error.
    pub fn is_render(&self) -> bool {
        matches!(self, CompileError::Render(_))
    }

    /// Check if this is an artifact store error.
    pub fn is_store(&self) -> bool {
        matches!(self, CompileError::Store(_))
    }
}

/// Convenience alias for results produced during pack compilation.
pub type CompileResult<T> = Result<T, CompileError>;
