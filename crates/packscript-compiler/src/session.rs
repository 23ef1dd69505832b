//! Compilation session state.
//!
//! A session owns everything scoped to one compilation pass: the function
//! arena, the template environment, and the set of already-confirmed artifact
//! paths. Beginning a new session replaces all three at once, so state from
//! one pass can never leak into the next.

use packscript_core::{ContentHash, FunctionId, FunctionRef, Intent, RenderError, TemplateError};
use packscript_template::{TemplateEnv, evaluate};
use rustc_hash::FxHashSet;

use crate::function::{FunctionArena, SymbolicFunction};

/// State for one compilation pass.
#[derive(Debug, Clone, Default)]
pub struct CompilationSession {
    arena: FunctionArena,
    confirmed: FxHashSet<String>,
    env: TemplateEnv,
}

impl CompilationSession {
    /// Begin a pass with the given template environment.
    ///
    /// The arena and the confirmation set start empty; dropping the session
    /// ends the pass.
    pub fn begin(env: TemplateEnv) -> Self {
        Self {
            arena: FunctionArena::new(),
            confirmed: FxHashSet::default(),
            env,
        }
    }

    /// The pass environment every template hole evaluates against.
    pub fn env(&self) -> &TemplateEnv {
        &self.env
    }

    /// Create a function with explicit parent and top links.
    ///
    /// Both links are fixed for the function's lifetime. `top` is the
    /// outermost function of the nesting chain; pass `None` for either link
    /// on unnested functions.
    pub fn create(
        &mut self,
        parent: Option<FunctionId>,
        top: Option<FunctionId>,
        intent: Intent,
    ) -> FunctionId {
        self.arena.insert(SymbolicFunction::new(parent, top, intent))
    }

    /// Create an unnested function.
    pub fn create_root(&mut self, intent: Intent) -> FunctionId {
        self.create(None, None, intent)
    }

    /// Create a function nested inside `parent`.
    ///
    /// The child's top link follows the parent's chain: the parent's own top
    /// when the parent is nested, otherwise the parent itself.
    pub fn create_child(&mut self, parent: FunctionId, intent: Intent) -> FunctionId {
        let top = self.arena[parent].top().or(Some(parent));
        self.create(Some(parent), top, intent)
    }

    /// Assign a function's namespace.
    pub fn set_namespace(&mut self, id: FunctionId, namespace: impl Into<String>) {
        self.arena[id].set_namespace(namespace);
    }

    /// Assign a function's path below its namespace.
    pub fn set_path(&mut self, id: FunctionId, path: impl Into<String>) {
        self.arena[id].set_path(path);
    }

    /// Evaluate a command line against the pass environment and append it.
    ///
    /// A failing template aborts the append; nothing is recorded for the
    /// line.
    pub fn add_command(&mut self, id: FunctionId, line: &str) -> Result<(), TemplateError> {
        let evaluated = evaluate(line, &self.env)?;
        self.arena[id].push_command(evaluated);
        Ok(())
    }

    /// The function's current address.
    pub fn reference(&self, id: FunctionId) -> FunctionRef {
        self.arena[id].reference()
    }

    /// The command line that invokes the function from another script.
    pub fn invocation_line(&self, id: FunctionId) -> String {
        self.arena[id].reference().invocation_line()
    }

    /// Digest of the function's evaluated command sequence.
    pub fn content_hash(&self, id: FunctionId) -> ContentHash {
        self.arena[id].content_hash()
    }

    /// Render the function's artifact text with an optional header.
    pub fn contents(&self, id: FunctionId, header: Option<&str>) -> Result<String, RenderError> {
        self.arena.render(id, header)
    }

    /// Read access to the pass's functions.
    pub fn functions(&self) -> &FunctionArena {
        &self.arena
    }

    /// Check whether an artifact path was already confirmed this pass.
    pub fn is_confirmed(&self, path: &str) -> bool {
        self.confirmed.contains(path)
    }

    /// Mark a path confirmed, returning `true` the first time.
    pub(crate) fn mark_confirmed(&mut self, path: &str) -> bool {
        self.confirmed.insert(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_starts_empty() {
        let session = CompilationSession::begin(TemplateEnv::new());
        assert!(session.functions().is_empty());
        assert!(!session.is_confirmed("demo/main"));
    }

    #[test]
    fn commands_evaluate_against_the_pass_env() {
        let env = TemplateEnv::new().with("count", 3);
        let mut session = CompilationSession::begin(env);
        let id = session.create_root(Intent::None);
        session.add_command(id, "say <% count * 2 %>").unwrap();

        assert_eq!(session.functions()[id].commands(), ["say 6"]);
    }

    #[test]
    fn failed_template_appends_nothing() {
        let mut session = CompilationSession::begin(TemplateEnv::new());
        let id = session.create_root(Intent::None);

        assert!(session.add_command(id, "say <% missing %>").is_err());
        assert!(session.functions()[id].commands().is_empty());

        // The function remains usable after the failure.
        session.add_command(id, "say recovered").unwrap();
        assert_eq!(session.functions()[id].commands(), ["say recovered"]);
    }

    #[test]
    fn child_of_root_tops_at_the_root() {
        let mut session = CompilationSession::begin(TemplateEnv::new());
        let root = session.create_root(Intent::None);
        session.set_namespace(root, "demo");
        session.set_path(root, "main");

        let child = session.create_child(root, Intent::None);
        session.set_namespace(child, "demo");
        session.set_path(child, "main/inner");
        session.add_command(child, "function $top").unwrap();

        assert_eq!(
            session.contents(child, None).unwrap(),
            "function demo/main"
        );
    }

    #[test]
    fn grandchild_tops_at_the_outermost_function() {
        let mut session = CompilationSession::begin(TemplateEnv::new());
        let root = session.create_root(Intent::None);
        session.set_namespace(root, "demo");
        session.set_path(root, "main");

        let child = session.create_child(root, Intent::None);
        let grandchild = session.create_child(child, Intent::None);
        session.add_command(grandchild, "function $top").unwrap();

        assert_eq!(
            session.contents(grandchild, None).unwrap(),
            "function demo/main"
        );
    }

    #[test]
    fn confirmation_marks_are_per_session() {
        let mut session = CompilationSession::begin(TemplateEnv::new());
        assert!(session.mark_confirmed("demo/main"));
        assert!(!session.mark_confirmed("demo/main"));
        assert!(session.is_confirmed("demo/main"));

        let fresh = CompilationSession::begin(TemplateEnv::new());
        assert!(!fresh.is_confirmed("demo/main"));
    }

    #[test]
    fn invocation_line_tracks_the_address() {
        let mut session = CompilationSession::begin(TemplateEnv::new());
        let id = session.create_root(Intent::None);
        session.set_namespace(id, "demo");
        session.set_path(id, "chain/step_2");
        assert_eq!(session.invocation_line(id), "function demo/chain/step_2");
    }
}
