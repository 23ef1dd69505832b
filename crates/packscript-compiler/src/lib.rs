//! Pack Compiler
//!
//! Turns abstract, templated function definitions into concrete command
//! script artifacts, and keeps the `tick`/`load` lifecycle hook aggregates
//! in step with what was compiled.
//!
//! ## Architecture
//!
//! - A [`CompilationSession`] scopes one pass: the function arena, the
//!   template environment and the per-pass confirmation set
//! - The [`Emitter`] persists across passes and owns the store, the config
//!   and the hook registries
//! - Confirmation is the one-way gate from symbolic to concrete: first
//!   confirmation of a path registers the hook intent and materializes the
//!   artifact, later ones are inert
//!
//! ## Modules
//!
//! - [`aggregator`]: Source-keyed aggregation and JSON tag documents
//! - [`config`]: Artifact layout and header settings
//! - [`emitter`]: Confirmation and hook flushing against a store
//! - [`function`]: Symbolic functions and their arena
//! - [`hooks`]: The `tick`/`load` hook registries
//! - [`session`]: Per-pass compilation state

pub mod aggregator;
pub mod config;
pub mod emitter;
pub mod function;
pub mod hooks;
pub mod session;

pub use aggregator::{Aggregator, TagAggregator};
pub use config::CompilerConfig;
pub use emitter::Emitter;
pub use function::{FunctionArena, SymbolicFunction};
pub use hooks::{HookRegistries, HookRegistry};
pub use session::CompilationSession;

// Re-export the shared vocabulary so drivers can depend on this crate alone.
pub use packscript_core::{
    ArtifactStore, CompileError, CompileResult, ContentHash, FsStore, FunctionId, FunctionRef,
    Intent, MemStore, RenderError, StoreError, TemplateError,
};
pub use packscript_template::{TemplateEnv, Value, evaluate};
