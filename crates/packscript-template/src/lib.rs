//! Inline template evaluation for command lines.
//!
//! Command lines may carry `<% ... %>` template holes. Evaluation rewrites
//! the line into interpolation form, evaluates each hole against the pass
//! environment, and splices the results back into the surrounding text.
//!
//! ## Modules
//!
//! - [`env`]: The pass environment and the values it binds
//! - `expr`: Expression lexer and evaluator backing each hole
//! - `interpolate`: Interpolation-form scanner
//! - `rewrite`: Delimiter rewrite from authored form to interpolation form
//!
//! ## Example
//!
//! ```
//! use packscript_template::{TemplateEnv, evaluate};
//!
//! let mut env = TemplateEnv::new();
//! env.bind("radius", 4);
//!
//! let line = evaluate("particle flame ~ ~ ~ <% radius * 2 %> 0 0", &env).unwrap();
//! assert_eq!(line, "particle flame ~ ~ ~ 8 0 0");
//! ```

use packscript_core::TemplateError;

pub mod env;
mod expr;
mod interpolate;
mod rewrite;

pub use env::{TemplateEnv, Value};
pub use expr::ExprError;

/// Evaluate a command line's inline templates against an environment.
///
/// Lines without a complete `<% ... %>` delimiter pair pass through
/// unchanged. Lines with one are rewritten to interpolation form and each
/// hole is evaluated; a failing hole aborts the whole line.
///
/// The error carries the rewritten template text, so authors see exactly
/// what the evaluator was handed.
pub fn evaluate(line: &str, env: &TemplateEnv) -> Result<String, TemplateError> {
    if !rewrite::has_template(line) {
        return Ok(line.to_string());
    }
    let template = rewrite::rewrite(line);
    interpolate::interpolate(&template, env).map_err(|e| TemplateError::InvalidExpression {
        detail: e.to_string(),
        template,
    })
}
