//! Compiler configuration.

use std::path::PathBuf;

use packscript_core::FunctionRef;

/// Layout and decoration settings for one compilation target.
///
/// All paths are relative to the artifact store's root, so the same config
/// drives a filesystem store in production and an in-memory store in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Directory function artifacts land in.
    pub functions_root: PathBuf,
    /// Subdirectory of `functions_root` reserved for compiler-owned
    /// artifacts such as the lifecycle hook aggregates.
    pub generated_dir: String,
    /// File extension for command script artifacts.
    pub script_extension: String,
    /// Text prepended to every rendered function body.
    pub header: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            functions_root: PathBuf::from("addon/functions"),
            generated_dir: "generated".to_string(),
            script_extension: "mcfunction".to_string(),
            header: None,
        }
    }
}

impl CompilerConfig {
    /// Create a config with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style header override.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Artifact path for a function reference.
    ///
    /// The reference's path may carry `/` separated segments; they become
    /// subdirectories below the namespace.
    pub fn function_path(&self, reference: &FunctionRef) -> PathBuf {
        self.functions_root
            .join(&reference.namespace)
            .join(format!("{}.{}", reference.path, self.script_extension))
    }

    /// Artifact path for a lifecycle hook aggregate.
    pub fn hook_path(&self, hook_name: &str) -> PathBuf {
        self.functions_root
            .join(&self.generated_dir)
            .join("events")
            .join(format!("{hook_name}.{}", self.script_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = CompilerConfig::new();
        assert_eq!(config.functions_root, PathBuf::from("addon/functions"));
        assert_eq!(config.generated_dir, "generated");
        assert_eq!(config.script_extension, "mcfunction");
        assert_eq!(config.header, None);
    }

    #[test]
    fn function_path_joins_namespace_and_extension() {
        let config = CompilerConfig::new();
        let reference = FunctionRef::new("demo", "main");
        assert_eq!(
            config.function_path(&reference),
            PathBuf::from("addon/functions/demo/main.mcfunction")
        );
    }

    #[test]
    fn function_path_keeps_nested_segments() {
        let config = CompilerConfig::new();
        let reference = FunctionRef::new("demo", "chain/step_2");
        assert_eq!(
            config.function_path(&reference),
            PathBuf::from("addon/functions/demo/chain/step_2.mcfunction")
        );
    }

    #[test]
    fn hook_path_lands_under_generated_events() {
        let config = CompilerConfig::new();
        assert_eq!(
            config.hook_path("tick"),
            PathBuf::from("addon/functions/generated/events/tick.mcfunction")
        );
    }

    #[test]
    fn custom_extension_applies_everywhere() {
        let config = CompilerConfig {
            script_extension: "cmd".to_string(),
            ..CompilerConfig::default()
        };
        let reference = FunctionRef::new("demo", "main");
        assert_eq!(
            config.function_path(&reference),
            PathBuf::from("addon/functions/demo/main.cmd")
        );
        assert_eq!(
            config.hook_path("load"),
            PathBuf::from("addon/functions/generated/events/load.cmd")
        );
    }
}
