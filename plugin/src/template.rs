//! Jobspec template rendering.
//!
//! Deliberately not a general templating language: the template is a JSON
//! job document with `${var}` references (plus `${file("path")}` when
//! filesystem access is allowed), rendered in strict mode. Any undefined
//! variable, unterminated reference, or forbidden file access fails the
//! synthesis; nothing partially applied is ever produced.
//!
//! `$${` escapes a literal `${`.

use std::collections::BTreeMap;

use gangplank_nomad::Job;
use thiserror::Error;

/// Jobspec synthesis failures.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `${` reference with no closing `}`.
    #[error("unterminated variable reference starting at byte {pos}")]
    Unterminated { pos: usize },

    /// A `${name}` reference with no matching variable.
    #[error("undefined template variable '{name}'")]
    UndefinedVariable { name: String },

    /// A `${file("...")}` reference while filesystem access is disabled.
    #[error("template references file '{path}' but allow_fs is disabled")]
    FsDisabled { path: String },

    /// A `file(...)` reference whose argument is not a quoted path.
    #[error("invalid file() reference: {0}")]
    BadFileRef(String),

    /// A permitted file reference that could not be read.
    #[error("failed to read template file '{path}': {reason}")]
    FileRead { path: String, reason: String },

    /// The rendered text does not parse as a job document.
    #[error("rendered jobspec is not a valid job document: {0}")]
    InvalidJob(String),
}

/// Render the template with the given variables.
pub fn render(
    template: &str,
    vars: &BTreeMap<String, String>,
    allow_fs: bool,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if template[i..].starts_with("$${") {
            out.push_str("${");
            i += 3;
            continue;
        }
        if template[i..].starts_with("${") {
            let start = i + 2;
            let Some(end) = template[start..].find('}').map(|o| start + o) else {
                return Err(TemplateError::Unterminated { pos: i });
            };
            let reference = template[start..end].trim();
            out.push_str(&resolve(reference, vars, allow_fs)?);
            i = end + 1;
            continue;
        }
        match template[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }

    Ok(out)
}

/// Render the template and parse the result into a job definition.
pub fn synthesize(
    template: &str,
    vars: &BTreeMap<String, String>,
    allow_fs: bool,
) -> Result<Job, TemplateError> {
    let rendered = render(template, vars, allow_fs)?;
    serde_json::from_str(&rendered).map_err(|e| TemplateError::InvalidJob(e.to_string()))
}

fn resolve(
    reference: &str,
    vars: &BTreeMap<String, String>,
    allow_fs: bool,
) -> Result<String, TemplateError> {
    if let Some(arg) = reference
        .strip_prefix("file(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let arg = arg.trim();
        let path = arg
            .strip_prefix('"')
            .and_then(|p| p.strip_suffix('"'))
            .ok_or_else(|| TemplateError::BadFileRef(arg.to_string()))?;

        if !allow_fs {
            return Err(TemplateError::FsDisabled {
                path: path.to_string(),
            });
        }
        return std::fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        });
    }

    vars.get(reference)
        .cloned()
        .ok_or_else(|| TemplateError::UndefinedVariable {
            name: reference.to_string(),
        })
}
