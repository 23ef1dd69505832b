//! Packscript: a compiler toolkit for command-script packs.
//!
//! Packscript turns abstract, templated function definitions into concrete
//! pack artifacts: one command script per function, aggregate hook scripts
//! wiring functions into the pack's tick and load events, and a translated
//! addon manifest.
//!
//! The workspace splits the toolkit into four crates, re-exported here:
//!
//! - [`core`]: shared vocabulary (ids, references, hashes, errors, stores)
//! - [`template`]: template literal rewriting and expression evaluation
//! - [`compiler`]: symbolic functions, sessions, hooks, and the emitter
//! - [`manifest`]: pack metadata to addon manifest translation

pub use packscript_compiler as compiler;
pub use packscript_core as core;
pub use packscript_manifest as manifest;
pub use packscript_template as template;

// Re-export main types
pub mod prelude {
    pub use packscript_compiler::*;
    pub use packscript_core::*;
    pub use packscript_manifest::ManifestError;
    pub use packscript_manifest::translate as translate_manifest;
    pub use packscript_template::*;
}
