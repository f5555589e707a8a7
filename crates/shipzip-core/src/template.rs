//! Output path templating.

use crate::PackageError;
use crate::Result;
use std::path::PathBuf;

/// Default output path template.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "package-{version}.zip";

/// Placeholder replaced with the manifest version.
const VERSION_FIELD: &str = "version";

/// Renders an output path template.
///
/// `{version}` is replaced by `version`; `{{` and `}}` produce literal
/// braces. Any other placeholder, or an unmatched brace, is rejected.
///
/// # Errors
///
/// Returns [`PackageError::InvalidOutputTemplate`] if the template contains
/// an unknown placeholder or an unbalanced brace.
///
/// # Examples
///
/// ```
/// use shipzip_core::template::render_output_path;
/// use std::path::PathBuf;
///
/// let path = render_output_path("pkg-{version}.zip", "2.3.1").unwrap();
/// assert_eq!(path, PathBuf::from("pkg-2.3.1.zip"));
/// ```
pub fn render_output_path(template: &str, version: &str) -> Result<PathBuf> {
    let invalid = |reason: String| PackageError::InvalidOutputTemplate {
        template: template.to_string(),
        reason,
    };

    let mut rendered = String::with_capacity(template.len() + version.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => return Err(invalid("unclosed '{'".to_string())),
                    }
                }
                if field != VERSION_FIELD {
                    return Err(invalid(format!(
                        "unknown placeholder '{{{field}}}', only '{{{VERSION_FIELD}}}' is supported"
                    )));
                }
                rendered.push_str(version);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '}' => return Err(invalid("single '}' must be written as '}}'".to_string())),
            c => rendered.push(c),
        }
    }

    if rendered.is_empty() {
        return Err(invalid("renders to an empty path".to_string()));
    }

    Ok(PathBuf::from(rendered))
}
