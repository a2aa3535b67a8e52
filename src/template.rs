//! Template engine for `${NAME}` placeholder substitution.
//!
//! Used to expand the cells of task-file templates against the test
//! environment mapping.
//!
//! # Syntax
//!
//! - `${NAME}` - Substitutes the value of variable `NAME`
//! - `$$` - Renders as literal `$`
//! - A `$` followed by anything else is copied through unchanged
//!
//! Variable names follow environment-variable rules: `[A-Za-z_][A-Za-z0-9_]*`.
//!
//! # Error Handling
//!
//! Undefined variables are an error rather than an empty substitution, so a
//! typo in a template never produces a silently wrong task file. A value
//! containing a tab or line break is an error too: substituting it would
//! split the cell it lands in.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Variable name to value mapping used for substitution.
pub type Variables = BTreeMap<String, String>;

/// Regex pattern for valid placeholder names.
static VARIABLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid variable name regex")
});

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position}")]
    UndefinedVariable {
        /// The name of the undefined variable.
        name: String,
        /// Byte offset of the `$` that starts the placeholder.
        position: usize,
    },

    /// A `${` was found without a matching `}`.
    #[error("unterminated '${{' at position {position}")]
    Unterminated { position: usize },

    /// An empty placeholder (`${}`).
    #[error("empty variable name '${{}}' at position {position}")]
    EmptyVariableName { position: usize },

    /// The placeholder name is not a valid environment-variable name.
    #[error("invalid variable name '{name}' at position {position}")]
    InvalidVariableName { name: String, position: usize },

    /// The value of a variable contains a tab, newline or carriage return,
    /// which would change the shape of a tab-separated row.
    #[error("value of variable '{name}' at position {position} contains a tab or line break")]
    ValueContainsDelimiter { name: String, position: usize },
}

/// Characters that delimit fields or rows in a task file.
const DELIMITERS: [char; 3] = ['\t', '\n', '\r'];

/// Returns true if `name` is a valid placeholder name.
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME_REGEX.is_match(name)
}

/// Render a template string by substituting `${NAME}` placeholders.
///
/// # Arguments
///
/// * `template` - The template string
/// * `variables` - A map of variable names to their values
///
/// # Returns
///
/// * `Ok(String)` - The rendered string with all placeholders substituted
/// * `Err(TemplateError)` - If a variable is undefined or a token is malformed
pub fn render_template(template: &str, variables: &Variables) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some((_, '$')) => {
                chars.next();
                result.push('$');
            }
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();

                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::Unterminated { position: pos }),
                    }
                }

                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                if !is_valid_variable_name(&name) {
                    return Err(TemplateError::InvalidVariableName {
                        name,
                        position: pos,
                    });
                }

                match variables.get(&name) {
                    Some(value) if value.contains(DELIMITERS) => {
                        return Err(TemplateError::ValueContainsDelimiter {
                            name,
                            position: pos,
                        });
                    }
                    Some(value) => result.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedVariable {
                            name,
                            position: pos,
                        });
                    }
                }
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> Variables
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let vars = vars([("TEST_NAME", "job1")]);
        let result = render_template("input/${TEST_NAME}.txt", &vars).unwrap();
        assert_eq!(result, "input/job1.txt");
    }

    #[test]
    fn test_no_placeholders() {
        let vars = Variables::new();
        let result = render_template("gs://bucket/plain/path", &vars).unwrap();
        assert_eq!(result, "gs://bucket/plain/path");
    }

    #[test]
    fn test_empty_template() {
        let result = render_template("", &Variables::new()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_dollar_escape() {
        let result = render_template("cost $$5 for $${HOME}", &Variables::new()).unwrap();
        assert_eq!(result, "cost $5 for ${HOME}");
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let vars = vars([("X", "x")]);
        let result = render_template("$HOME and $ and ${X}$", &vars).unwrap();
        assert_eq!(result, "$HOME and $ and x$");
    }

    #[test]
    fn test_braces_without_dollar_are_literal() {
        let result = render_template("{not} a {placeholder}", &Variables::new()).unwrap();
        assert_eq!(result, "{not} a {placeholder}");
    }

    #[test]
    fn test_multiple_and_adjacent() {
        let vars = vars([("A", "1"), ("B", "2")]);
        let result = render_template("${A}${B}-${A}", &vars).unwrap();
        assert_eq!(result, "12-1");
    }

    #[test]
    fn test_empty_value_substitution() {
        let vars = vars([("EMPTY", "")]);
        let result = render_template("before${EMPTY}after", &vars).unwrap();
        assert_eq!(result, "beforeafter");
    }

    #[test]
    fn test_value_is_not_rescanned() {
        let vars = vars([("A", "${B}"), ("B", "nope")]);
        let result = render_template("${A}", &vars).unwrap();
        assert_eq!(result, "${B}");
    }

    #[test]
    fn test_undefined_variable_error() {
        let err = render_template("gs://${BUCKET}/x", &Variables::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedVariable {
                name: "BUCKET".to_string(),
                position: 5,
            }
        );
    }

    #[test]
    fn test_value_with_delimiter_is_rejected() {
        for value in ["x\ty", "x\ny", "x\r"] {
            let vars = vars([("V", value)]);
            let err = render_template("a-${V}", &vars).unwrap_err();
            assert_eq!(
                err,
                TemplateError::ValueContainsDelimiter {
                    name: "V".to_string(),
                    position: 2,
                }
            );
        }
    }

    #[test]
    fn test_delimiters_in_template_text_are_kept() {
        let result = render_template("a\tb", &Variables::new()).unwrap();
        assert_eq!(result, "a\tb");
    }

    #[test]
    fn test_unterminated_error() {
        let err = render_template("abc ${NAME", &Variables::new()).unwrap_err();
        assert_eq!(err, TemplateError::Unterminated { position: 4 });
    }

    #[test]
    fn test_empty_name_error() {
        let err = render_template("${}", &Variables::new()).unwrap_err();
        assert_eq!(err, TemplateError::EmptyVariableName { position: 0 });
    }

    #[test]
    fn test_invalid_name_error() {
        let err = render_template("x ${1ABC}", &Variables::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidVariableName {
                name: "1ABC".to_string(),
                position: 2,
            }
        );

        let err = render_template("${ NAME }", &vars([("NAME", "v")])).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidVariableName { .. }));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let vars = vars([("name", "lower")]);
        let err = render_template("${NAME}", &vars).unwrap_err();
        assert!(matches!(err, TemplateError::UndefinedVariable { .. }));
    }

    #[test]
    fn test_multibyte_content() {
        let vars = vars([("X", "é")]);
        let result = render_template("ü ${X} ü", &vars).unwrap();
        assert_eq!(result, "ü é ü");
    }

    #[test]
    fn test_is_valid_variable_name() {
        assert!(is_valid_variable_name("TEST_NAME"));
        assert!(is_valid_variable_name("_private1"));
        assert!(!is_valid_variable_name("1abc"));
        assert!(!is_valid_variable_name("A-B"));
        assert!(!is_valid_variable_name(""));
    }

    #[test]
    fn test_error_display() {
        let err = TemplateError::UndefinedVariable {
            name: "FOO".to_string(),
            position: 10,
        };
        assert_eq!(err.to_string(), "undefined variable 'FOO' at position 10");

        let err = TemplateError::Unterminated { position: 5 };
        assert_eq!(err.to_string(), "unterminated '${' at position 5");

        let err = TemplateError::EmptyVariableName { position: 3 };
        assert_eq!(err.to_string(), "empty variable name '${}' at position 3");
    }
}
