//! Core vocabulary for the packscript compiler.
//!
//! This crate holds the types shared by every compilation phase: function
//! identity and addressing, hook intents, content digests, artifact storage,
//! and the unified error hierarchy.
//!
//! ## Modules
//!
//! - [`content_hash`]: Deterministic 64-bit digests over rendered command bodies
//! - [`error`]: Phase error types and the top-level [`CompileError`] union
//! - [`ids`]: Arena identifiers for symbolic functions
//! - [`intent`]: Lifecycle hook intents (`tick`, `load`)
//! - [`reference`]: Namespaced function addresses
//! - [`store`]: The artifact store boundary and its filesystem/in-memory impls

pub mod content_hash;
pub mod error;
pub mod ids;
pub mod intent;
pub mod reference;
pub mod store;

pub use content_hash::ContentHash;
pub use error::{CompileError, CompileResult, RenderError, StoreError, TemplateError};
pub use ids::FunctionId;
pub use intent::Intent;
pub use reference::{ERROR_NAMESPACE, FunctionRef};
pub use store::{ArtifactStore, FsStore, MemStore};
