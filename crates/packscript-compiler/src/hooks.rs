//! Lifecycle hook registries.
//!
//! Functions created with a `tick` or `load` intent register their address
//! here when they confirm. Each registry renders into one aggregate hook
//! artifact whose body invokes every registered function in registration
//! order.

use std::path::{Path, PathBuf};

use packscript_core::{ArtifactStore, FunctionRef, Intent, StoreError};

use crate::aggregator::Aggregator;
use crate::config::CompilerConfig;

/// Addresses registered for one lifecycle hook, keyed by source.
#[derive(Debug, Clone)]
pub struct HookRegistry {
    entries: Aggregator<FunctionRef>,
    path: PathBuf,
}

impl HookRegistry {
    /// Create a registry flushing to the given artifact path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Aggregator::new(),
            path: path.into(),
        }
    }

    /// The hook artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a function's address under the contributing source.
    pub fn register(&mut self, source: impl Into<String>, reference: FunctionRef) {
        self.entries.set(source, reference);
    }

    /// Drop every address a source contributed.
    pub fn reset(&mut self, source: &str) {
        self.entries.reset(source);
    }

    /// All registered addresses in registration order.
    pub fn entries(&self) -> Vec<FunctionRef> {
        self.entries.values()
    }

    /// The addresses one source registered.
    pub fn entries_for(&self, source: &str) -> Vec<FunctionRef> {
        self.entries.values_for(source)
    }

    /// Number of registered addresses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The hook artifact's body: one invocation line per address.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(FunctionRef::invocation_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the rendered body and materialize the artifact.
    ///
    /// An empty registry still materializes, leaving an empty hook file
    /// rather than a stale or missing one.
    pub fn flush<S: ArtifactStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set_contents(&self.path, &self.render())?;
        store.confirm(&self.path)
    }
}

/// The pair of registries backing the `tick` and `load` hooks.
#[derive(Debug, Clone)]
pub struct HookRegistries {
    tick: HookRegistry,
    load: HookRegistry,
}

impl HookRegistries {
    /// Create both registries at the paths the config assigns them.
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            tick: HookRegistry::new(config.hook_path("tick")),
            load: HookRegistry::new(config.hook_path("load")),
        }
    }

    /// The registry serving an intent, if the intent is hooked.
    pub fn for_intent(&mut self, intent: Intent) -> Option<&mut HookRegistry> {
        match intent {
            Intent::None => None,
            Intent::Tick => Some(&mut self.tick),
            Intent::Load => Some(&mut self.load),
        }
    }

    /// The tick registry.
    pub fn tick(&self) -> &HookRegistry {
        &self.tick
    }

    /// The load registry.
    pub fn load(&self) -> &HookRegistry {
        &self.load
    }

    /// Drop a source's addresses from both registries.
    pub fn reset_source(&mut self, source: &str) {
        self.tick.reset(source);
        self.load.reset(source);
    }

    /// Flush both hook artifacts.
    pub fn flush<S: ArtifactStore>(&self, store: &mut S) -> Result<(), StoreError> {
        self.tick.flush(store)?;
        self.load.flush(store)
    }
}
