//! Interpolation-form scanner.
//!
//! Walks a rewritten line, copying plain text through, decoding the escape
//! sequences the rewrite introduced, and evaluating each `${ ... }` hole
//! against the environment. Hole boundaries respect string literals, so a
//! `}` inside a quoted string never closes the hole.

use crate::env::TemplateEnv;
use crate::expr::{self, ExprError};

pub(crate) fn interpolate(template: &str, env: &TemplateEnv) -> Result<String, ExprError> {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let escaped = template[i + 1..].chars().next();
                match escaped {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    // \\, \` and \$ decode to the char itself, as does any
                    // other escaped char.
                    Some(ch) => out.push(ch),
                    // A trailing lone backslash stays as-is.
                    None => out.push('\\'),
                }
                i += 1 + escaped.map_or(0, char::len_utf8);
            }
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                let start = i + 2;
                let end = hole_end(template, start)?;
                let value = expr::eval(&template[start..end], env)?;
                out.push_str(&value.to_string());
                i = end + 1;
            }
            _ => match template[i..].chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            },
        }
    }

    Ok(out)
}

/// Find the byte index of the `}` closing the hole whose body starts at
/// `start`. String literals inside the hole are skipped, including escaped
/// quotes within them.
fn hole_end(template: &str, start: usize) -> Result<usize, ExprError> {
    let bytes = template.as_bytes();
    let mut i = start;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'}' => return Ok(i),
                _ => {}
            },
        }
        i += 1;
    }

    Err(ExprError::UnterminatedInterpolation {
        offset: (start - 2) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> TemplateEnv {
        TemplateEnv::new().with("count", 3).with("name", "beacon")
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(interpolate("say hi", &env()).unwrap(), "say hi");
    }

    #[test]
    fn hole_is_evaluated_and_spliced() {
        assert_eq!(interpolate("say ${count + 1}", &env()).unwrap(), "say 4");
    }

    #[test]
    fn string_hole_with_closing_brace_inside() {
        // The } inside the quoted string must not close the hole.
        assert_eq!(interpolate(r#"say ${"{x}" + count}"#, &env()).unwrap(), "say {x}3");
    }

    #[test]
    fn neutralized_hole_yields_literal_interpolation() {
        // The rewrite turns authored ${ into ${"${"}.
        assert_eq!(interpolate(r#"say ${"${"}x}"#, &env()).unwrap(), "say ${x}");
    }

    #[test]
    fn escapes_decode() {
        assert_eq!(interpolate(r"a\\b", &env()).unwrap(), r"a\b");
        assert_eq!(interpolate(r"a\`b", &env()).unwrap(), "a`b");
        assert_eq!(interpolate(r"a\$b", &env()).unwrap(), "a$b");
    }

    #[test]
    fn dollar_without_brace_is_plain() {
        assert_eq!(interpolate("pay $5", &env()).unwrap(), "pay $5");
    }

    #[test]
    fn unterminated_hole_is_an_error() {
        let err = interpolate("say ${count", &env()).unwrap_err();
        assert_eq!(err, ExprError::UnterminatedInterpolation { offset: 4 });
    }

    #[test]
    fn hole_error_propagates() {
        let err = interpolate("say ${count +}", &env()).unwrap_err();
        assert_eq!(err, ExprError::UnexpectedEnd);
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(
            interpolate("sagen «${name}»", &env()).unwrap(),
            "sagen «beacon»"
        );
    }
}
