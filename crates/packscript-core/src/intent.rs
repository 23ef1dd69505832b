use std::fmt;

/// Lifecycle hook a symbolic function asks to be wired into.
///
/// Declared at creation time and fixed for the function's lifetime. On
/// confirmation, a `Tick` or `Load` function has its address registered with
/// the matching hook registry so the aggregate hook artifact invokes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Intent {
    /// No hook wiring; the function is only reachable by explicit invocation.
    #[default]
    None,
    /// Run every world tick.
    Tick,
    /// Run once when the pack is (re)loaded.
    Load,
}

impl Intent {
    /// Hook name for registry lookup, or `None` for unhooked functions.
    pub const fn hook_name(self) -> Option<&'static str> {
        match self {
            Intent::None => None,
            Intent::Tick => Some("tick"),
            Intent::Load => Some("load"),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::None => write!(f, "none"),
            Intent::Tick => write!(f, "tick"),
            Intent::Load => write!(f, "load"),
        }
    }
}
