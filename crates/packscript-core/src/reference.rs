use std::fmt;

/// Namespace assigned to functions whose definition never resolved one.
///
/// Artifacts landing under this namespace are visible in the output tree as
/// misconfigured definitions rather than silently merged into a real
/// namespace.
pub const ERROR_NAMESPACE: &str = "lang_error";

/// Namespaced address of a compiled function artifact.
///
/// Used as the primary key for artifact placement, hook registration, and
/// cross-function invocation lines. The address renders as
/// `namespace/path`, where `path` may itself contain `/` separated segments.
///
/// # Examples
///
/// ```
/// use packscript_core::FunctionRef;
///
/// let main = FunctionRef::new("demo", "main");
/// assert_eq!(main.to_string(), "demo/main");
///
/// let nested = FunctionRef::new("demo", "chain/step_2");
/// assert_eq!(nested.invocation_line(), "function demo/chain/step_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    /// Namespace the artifact belongs to (e.g., "demo")
    pub namespace: String,
    /// Path below the namespace (e.g., "main", "chain/step_2")
    pub path: String,
}

impl FunctionRef {
    /// Create a new reference from namespace and path.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Create a reference in the error namespace.
    pub fn error_namespaced(path: impl Into<String>) -> Self {
        Self {
            namespace: ERROR_NAMESPACE.to_string(),
            path: path.into(),
        }
    }

    /// Parse an address string (e.g., "demo/chain/step_2").
    ///
    /// Splits on the first "/" - the left segment is the namespace, the rest
    /// is the path. A bare token with no "/" is treated as a path in the
    /// error namespace.
    pub fn from_address(s: &str) -> Self {
        match s.split_once('/') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::error_namespaced(s),
        }
    }

    /// Check if this reference sits in the error namespace.
    pub fn is_error_namespaced(&self) -> bool {
        self.namespace == ERROR_NAMESPACE
    }

    /// Get the full `namespace/path` address.
    pub fn address(&self) -> String {
        format!("{}/{}", self.namespace, self.path)
    }

    /// Get the command line that invokes this function from another script.
    pub fn invocation_line(&self) -> String {
        format!("function {}/{}", self.namespace, self.path)
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.path)
    }
}

impl From<&str> for FunctionRef {
    fn from(s: &str) -> Self {
        Self::from_address(s)
    }
}

impl From<String> for FunctionRef {
    fn from(s: String) -> Self {
        Self::from_address(&s)
    }
}
