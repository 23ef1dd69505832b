//! Symbolic functions and the arena that owns them.
//!
//! A symbolic function accumulates evaluated command lines under a mutable
//! address. Its artifact text is produced on demand by [`FunctionArena::render`],
//! which resolves the `$block`, `$top` and `$parent` placeholders against the
//! function's position in the nesting chain.

use std::ops;

use packscript_core::{ContentHash, ERROR_NAMESPACE, FunctionId, FunctionRef, Intent, RenderError};
use uuid::Uuid;

/// Placeholder for this function's own address.
const BLOCK_PLACEHOLDER: &str = "$block";
/// Placeholder for the address of the outermost function in the chain.
const TOP_PLACEHOLDER: &str = "$top";
/// Placeholder for the address of the directly enclosing function.
const PARENT_PLACEHOLDER: &str = "$parent";

/// An abstract function under construction.
///
/// Commands are stored post template evaluation; address placeholders stay
/// symbolic until rendering so the address can change right up to
/// confirmation.
#[derive(Debug, Clone)]
pub struct SymbolicFunction {
    namespace: String,
    path: String,
    commands: Vec<String>,
    parent: Option<FunctionId>,
    top: Option<FunctionId>,
    intent: Intent,
}

impl SymbolicFunction {
    /// Create a function with a fresh random address in the error namespace.
    ///
    /// The random path guarantees an unnamed function still has a distinct
    /// address; the error namespace makes a function that never received a
    /// real one stand out in the output tree.
    pub(crate) fn new(parent: Option<FunctionId>, top: Option<FunctionId>, intent: Intent) -> Self {
        Self {
            namespace: ERROR_NAMESPACE.to_string(),
            path: Uuid::new_v4().simple().to_string(),
            commands: Vec::new(),
            parent,
            top,
            intent,
        }
    }

    /// The function's namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The function's path below its namespace.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The hook intent declared at creation.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// The directly enclosing function, if any.
    pub fn parent(&self) -> Option<FunctionId> {
        self.parent
    }

    /// The outermost function of this function's chain, if nested.
    pub fn top(&self) -> Option<FunctionId> {
        self.top
    }

    /// The evaluated command lines accumulated so far.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The function's current address.
    pub fn reference(&self) -> FunctionRef {
        FunctionRef::new(&self.namespace, &self.path)
    }

    /// Digest of the accumulated command sequence.
    ///
    /// Address changes do not move the digest, so bodies can be compared
    /// across differently named functions.
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::from_text(&self.commands.join("\n"))
    }

    pub(crate) fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    pub(crate) fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub(crate) fn push_command(&mut self, line: String) {
        self.commands.push(line);
    }
}

/// Arena owning every symbolic function of one compilation session.
///
/// Ids are slots in the arena and are only meaningful for the arena that
/// minted them; indexing with a foreign id is a driver bug and panics.
#[derive(Debug, Clone, Default)]
pub struct FunctionArena {
    functions: Vec<SymbolicFunction>,
}

impl FunctionArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a function, returning its id.
    pub(crate) fn insert(&mut self, function: SymbolicFunction) -> FunctionId {
        let id = FunctionId::new(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    /// Look up a function by id.
    pub fn get(&self, id: FunctionId) -> Option<&SymbolicFunction> {
        self.functions.get(id.index() as usize)
    }

    pub(crate) fn get_mut(&mut self, id: FunctionId) -> Option<&mut SymbolicFunction> {
        self.functions.get_mut(id.index() as usize)
    }

    /// Number of functions in the arena.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check whether the arena holds no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate over functions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (FunctionId, &SymbolicFunction)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId::new(i as u32), f))
    }

    /// Render a function's artifact text.
    ///
    /// Resolves `$block` to the function's own address, `$top` to the
    /// outermost function in its chain (itself when unnested), and `$parent`
    /// to the enclosing function. A command using `$parent` on a parentless
    /// function fails with the offending command text.
    pub fn render(&self, id: FunctionId, header: Option<&str>) -> Result<String, RenderError> {
        let function = &self[id];
        let block = function.reference().to_string();
        let top = function
            .top
            .map_or_else(|| block.clone(), |t| self[t].reference().to_string());
        let parent = function.parent.map(|p| self[p].reference().to_string());

        let mut body = Vec::with_capacity(function.commands.len());
        for command in &function.commands {
            let mut line = command
                .replace(BLOCK_PLACEHOLDER, &block)
                .replace(TOP_PLACEHOLDER, &top);
            if line.contains(PARENT_PLACEHOLDER) {
                match &parent {
                    Some(parent_ref) => line = line.replace(PARENT_PLACEHOLDER, parent_ref),
                    None => {
                        return Err(RenderError::MissingParent {
                            command: command.clone(),
                        });
                    }
                }
            }
            body.push(line);
        }

        let prefix = header.map_or_else(String::new, |h| format!("{h}\n\n"));
        Ok(prefix + &body.join("\n"))
    }
}

impl ops::Index<FunctionId> for FunctionArena {
    type Output = SymbolicFunction;

    fn index(&self, id: FunctionId) -> &SymbolicFunction {
        &self.functions[id.index() as usize]
    }
}

impl ops::IndexMut<FunctionId> for FunctionArena {
    fn index_mut(&mut self, id: FunctionId) -> &mut SymbolicFunction {
        &mut self.functions[id.index() as usize]
    }
}
