//! Artifact emission driver.
//!
//! The emitter ties a [`CompilerConfig`], an [`ArtifactStore`] and the
//! [`HookRegistries`] together for the duration of a target. Sessions come
//! and go per pass; the emitter persists, so hook registrations survive
//! incremental passes until their source is reset.

use packscript_core::{ArtifactStore, CompileResult, FunctionId, RenderError};
use packscript_template::TemplateEnv;
use tracing::{debug, info};

use crate::config::CompilerConfig;
use crate::hooks::HookRegistries;
use crate::session::CompilationSession;

/// Drives confirmation and hook flushing against one artifact store.
#[derive(Debug)]
pub struct Emitter<S> {
    config: CompilerConfig,
    store: S,
    hooks: HookRegistries,
}

impl<S: ArtifactStore> Emitter<S> {
    /// Create an emitter over a store, with hook registries laid out per the
    /// config.
    pub fn new(config: CompilerConfig, store: S) -> Self {
        let hooks = HookRegistries::new(&config);
        Self {
            config,
            store,
            hooks,
        }
    }

    /// The emitter's config.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The hook registries.
    pub fn hooks(&self) -> &HookRegistries {
        &self.hooks
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the emitter, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Begin a compilation pass.
    pub fn begin(&self, env: TemplateEnv) -> CompilationSession {
        CompilationSession::begin(env)
    }

    /// Render a function with the configured header.
    pub fn contents(
        &self,
        session: &CompilationSession,
        id: FunctionId,
    ) -> Result<String, RenderError> {
        session.contents(id, self.config.header.as_deref())
    }

    /// Confirm a function: register its hook intent and materialize its
    /// artifact.
    ///
    /// The first confirmation for a path wins; later confirmations of the
    /// same path return `Ok(false)` and have no effect, whatever their
    /// namespace or intent. Hook registration happens before rendering, so a
    /// body that fails to render leaves its address registered; the error
    /// still surfaces to the caller.
    pub fn confirm(
        &mut self,
        session: &mut CompilationSession,
        id: FunctionId,
        source: &str,
    ) -> CompileResult<bool> {
        let path_key = session.functions()[id].path().to_string();
        if !session.mark_confirmed(&path_key) {
            return Ok(false);
        }

        let function = &session.functions()[id];
        let reference = function.reference();
        if let Some(registry) = self.hooks.for_intent(function.intent()) {
            registry.register(source, reference.clone());
        }

        let contents = session.contents(id, self.config.header.as_deref())?;
        let artifact = self.config.function_path(&reference);
        self.store.set_contents(&artifact, &contents)?;
        self.store.confirm(&artifact)?;

        debug!(address = %reference, source, "confirmed function");
        Ok(true)
    }

    /// Drop every hook registration a source contributed.
    ///
    /// Called before recompiling a single source so its functions can
    /// re-register without duplicating entries.
    pub fn reset_source(&mut self, source: &str) {
        self.hooks.reset_source(source);
    }

    /// End a pass: flush both hook artifacts and release the session.
    pub fn end(&mut self, session: CompilationSession) -> CompileResult<()> {
        self.hooks.flush(&mut self.store)?;
        info!(
            functions = session.functions().len(),
            tick = self.hooks.tick().len(),
            load = self.hooks.load().len(),
            "compilation pass ended"
        );
        Ok(())
    }
}
