//! Delimiter rewrite from authored form to interpolation form.
//!
//! Authored command lines use `<% ... %>` holes. The rewrite turns a line
//! into interpolation form in five fixed string passes:
//!
//! 1. neutralize pre-existing `${` so authored text can never open a hole
//! 2. double every backslash so authored escapes survive unescaping
//! 3. `<%` becomes `${`
//! 4. `%>` becomes `}`
//! 5. escape backticks
//!
//! The pass order matters: neutralizing `${` must happen before `<%` becomes
//! `${`, and backslash doubling must not touch the backslashes introduced by
//! the backtick escape.

/// Opening template delimiter.
pub(crate) const OPEN: &str = "<%";

/// Closing template delimiter.
pub(crate) const CLOSE: &str = "%>";

/// Check whether a line carries at least one complete delimiter pair's worth
/// of delimiters. Lines without both markers skip the rewrite entirely.
pub(crate) fn has_template(line: &str) -> bool {
    line.contains(OPEN) && line.contains(CLOSE)
}

/// Rewrite an authored line into interpolation form.
pub(crate) fn rewrite(line: &str) -> String {
    line.replace("${", "${\"${\"}")
        .replace('\\', "\\\\")
        .replace(OPEN, "${")
        .replace(CLOSE, "}")
        .replace('`', "\\`")
}
