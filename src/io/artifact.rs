//! JSON → JavaScript data artifact conversion.
//!
//! The dashboard is a static page, so processed JSON is republished as a script
//! that declares one variable holding the same data:
//!
//! ```text
//! // Auto-generated data file
//! // Source: 202403_week2.json
//! // Generated: 2024-03-11 09:00:00
//!
//! const weeklyData = {
//!   "brands": { ... }
//! };
//!
//! // Dashboard hook: merge into the host namespace when the page defines it.
//! if (typeof D !== 'undefined') {
//!     D.weeklyData = weeklyData;
//!     ...
//! }
//! ```
//!
//! The data literal is the document pretty-printed as JSON (2-space indent,
//! non-ASCII kept literally, key and array order as parsed), which is also a
//! valid JavaScript expression. The one exception is a `__proto__` key: in an
//! object literal that spelling sets the prototype instead of defining a
//! property, so it is written as the computed key `["__proto__"]`.
//!
//! # Host namespace
//!
//! The dashboard page owns a global object named [`HOST_NAMESPACE`] (`D`) that
//! collects all data sets. Scripts loaded after it attach their variable to it
//! under the same name; scripts loaded without it still expose the top-level
//! `const`. The page must define `D` before the data script for the merge to
//! take effect.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Variable name used when the caller does not pick one.
pub const DEFAULT_VARIABLE_NAME: &str = "weeklyData";

/// Global object on the dashboard page that artifacts merge into.
pub const HOST_NAMESPACE: &str = "D";

/// Header timestamp format (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("JSON file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("invalid JSON in '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode data literal")]
    Encode(#[source] serde_json::Error),

    #[error("'{name}' is not a valid JavaScript identifier")]
    InvalidIdentifier { name: String },
}

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub bytes: u64,
}

impl ConvertedFile {
    /// Size in KiB.
    pub fn size_kib(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Convert the JSON document at `json_path` into a data script at `js_path`.
///
/// Parent directories of `js_path` are created as needed and an existing file
/// is overwritten. Nothing is written when reading or parsing fails.
pub fn convert_json_to_js(
    json_path: &Path,
    js_path: &Path,
    variable_name: &str,
) -> Result<ConvertedFile, ConvertError> {
    validate_identifier(variable_name)?;

    let document = read_document(json_path)?;
    let origin = json_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| json_path.display().to_string());
    let text = render_artifact(&document, &origin, Local::now().naive_local(), variable_name)?;

    if let Some(parent) = js_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConvertError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(js_path, &text).map_err(|source| ConvertError::Io {
        path: js_path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        source = %json_path.display(),
        output = %js_path.display(),
        bytes = text.len(),
        "wrote data artifact"
    );

    Ok(ConvertedFile {
        source: json_path.to_path_buf(),
        output: js_path.to_path_buf(),
        bytes: text.len() as u64,
    })
}

/// Load one JSON document.
pub fn read_document(path: &Path) -> Result<Value, ConvertError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConvertError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Compose the full artifact text.
pub fn render_artifact(
    document: &Value,
    origin: &str,
    generated_at: NaiveDateTime,
    variable_name: &str,
) -> Result<String, ConvertError> {
    let mut literal = String::new();
    write_literal(&mut literal, document, 0)?;
    let ns = HOST_NAMESPACE;
    let var = variable_name;

    Ok(format!(
        "// Auto-generated data file
// Source: {origin}
// Generated: {generated}

const {var} = {literal};

// Dashboard hook: merge into the host namespace when the page defines it.
if (typeof {ns} !== 'undefined') {{
    {ns}.{var} = {var};

    // Example access:
    // {ns}.{var}.brands.MLB.weekly[1].sales
    // {ns}.{var}.brands.MLB.channels['CH001'].sales
}}
",
        generated = generated_at.format(TIMESTAMP_FORMAT),
    ))
}

const INDENT: &str = "  ";

/// Append `value` as a JavaScript literal, laid out like `serde_json::to_string_pretty`.
fn write_literal(out: &mut String, value: &Value, depth: usize) -> Result<(), ConvertError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s)?,
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_indent(out, depth + 1);
                write_literal(out, item, depth + 1)?;
            }
            out.push('\n');
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                push_indent(out, depth + 1);
                if key == "__proto__" {
                    out.push_str("[\"__proto__\"]");
                } else {
                    write_string(out, key)?;
                }
                out.push_str(": ");
                write_literal(out, item, depth + 1)?;
            }
            out.push('\n');
            push_indent(out, depth);
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) -> Result<(), ConvertError> {
    out.push_str(&serde_json::to_string(s).map_err(ConvertError::Encode)?);
    Ok(())
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Default single-file output: the input path with `.js` appended (`a.json` → `a.json.js`).
pub fn default_js_path(json_path: &Path) -> PathBuf {
    let mut name = json_path.as_os_str().to_owned();
    name.push(".js");
    PathBuf::from(name)
}

/// Accept plain ASCII JavaScript identifiers that are not reserved words.
pub fn validate_identifier(name: &str) -> Result<(), ConvertError> {
    let mut chars = name.chars();
    let valid_start =
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid_start && valid_rest && !RESERVED_WORDS.contains(&name) {
        Ok(())
    } else {
        Err(ConvertError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    /// The text between `const <var> = ` and the terminating `;` of the declaration.
    fn declared_literal<'a>(artifact: &'a str, var: &str) -> &'a str {
        let start = artifact.find(&format!("const {var} = ")).unwrap() + var.len() + 9;
        let end = artifact.find(";\n\n// Dashboard hook").unwrap();
        &artifact[start..end]
    }

    #[test]
    fn renders_declaration_and_merge_block() {
        let doc: Value = serde_json::from_str(r#"{"brands": {"MLB": {"weekly": [1,2,3]}}}"#).unwrap();
        let text = render_artifact(&doc, "202403_week2.json", fixed_time(), "weeklyData").unwrap();

        assert!(text.starts_with("// Auto-generated data file\n// Source: 202403_week2.json\n"));
        assert!(text.contains("// Generated: 2024-03-11 09:05:07\n"));
        assert!(text.contains(
            "const weeklyData = {\n  \"brands\": {\n    \"MLB\": {\n      \"weekly\": [\n        1,\n        2,\n        3\n      ]\n    }\n  }\n};\n"
        ));
        assert!(text.contains("if (typeof D !== 'undefined') {\n    D.weeklyData = weeklyData;\n"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn declared_literal_round_trips_with_key_order() {
        let source = r#"{"zeta":1,"alpha":{"b":[true,null,"x"],"a":-0.5},"mid":"엠엘비 🚀","big":123456789012345678901234567890,"price":1.10}"#;
        let doc: Value = serde_json::from_str(source).unwrap();
        let text = render_artifact(&doc, "x.json", fixed_time(), "sales").unwrap();

        let parsed: Value = serde_json::from_str(declared_literal(&text, "sales")).unwrap();
        assert_eq!(parsed, doc);
        // Compact re-encoding compares key order and exact number text.
        assert_eq!(serde_json::to_string(&parsed).unwrap(), source);
    }

    #[test]
    fn literal_layout_matches_pretty_json() {
        let doc: Value = serde_json::from_str(
            r#"{"brands":{"MLB":{"weekly":[{"week":1,"sales":10.5}],"channels":{},"tags":[]}},"note":"a\"b\n"}"#,
        )
        .unwrap();
        let text = render_artifact(&doc, "x.json", fixed_time(), "weeklyData").unwrap();

        assert_eq!(declared_literal(&text, "weeklyData"), serde_json::to_string_pretty(&doc).unwrap());
    }

    #[test]
    fn proto_key_is_written_as_computed_property() {
        let source = r#"{"brands":{"__proto__":{"sales":1},"MLB":{"sales":2}}}"#;
        let doc: Value = serde_json::from_str(source).unwrap();
        let text = render_artifact(&doc, "x.json", fixed_time(), "weeklyData").unwrap();

        let literal = declared_literal(&text, "weeklyData");
        assert!(literal.contains("    [\"__proto__\"]: {\n      \"sales\": 1\n    },\n"));
        assert!(!literal.contains("\"__proto__\":"));

        // Apart from the computed key the literal is the same JSON document.
        let restored: Value = serde_json::from_str(&literal.replace("[\"__proto__\"]", "\"__proto__\"")).unwrap();
        assert_eq!(restored, doc);
        assert_eq!(serde_json::to_string(&restored).unwrap(), source);
    }

    #[test]
    fn non_ascii_is_written_literally() {
        let doc: Value = serde_json::from_str(r#"{"name": "서울 매장"}"#).unwrap();
        let text = render_artifact(&doc, "x.json", fixed_time(), "weeklyData").unwrap();
        assert!(text.contains("\"name\": \"서울 매장\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn scalar_documents_are_supported() {
        let doc: Value = serde_json::from_str("[]").unwrap();
        let text = render_artifact(&doc, "x.json", fixed_time(), "empty").unwrap();
        assert!(text.contains("const empty = [];\n"));
    }

    #[test]
    fn identifier_validation() {
        assert!(validate_identifier("weeklyData").is_ok());
        assert!(validate_identifier("_data$2").is_ok());
        assert!(validate_identifier("$").is_ok());
        for bad in ["", "2weeks", "weekly-data", "weekly data", "class", "데이터"] {
            assert!(
                matches!(validate_identifier(bad), Err(ConvertError::InvalidIdentifier { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_js_path_appends_suffix() {
        assert_eq!(
            default_js_path(Path::new("out/202403_week2.json")),
            PathBuf::from("out/202403_week2.json.js")
        );
    }

    #[test]
    fn convert_writes_artifact_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("202403_week2.json");
        fs::write(&json, r#"{"brands": {"MLB": {"weekly": [1,2,3]}}}"#).unwrap();
        let js = dir.path().join("dashboard/data/nested/out.js");

        let converted = convert_json_to_js(&json, &js, DEFAULT_VARIABLE_NAME).unwrap();

        let text = fs::read_to_string(&js).unwrap();
        assert_eq!(converted.bytes, text.len() as u64);
        assert_eq!(converted.output, js);
        assert!(text.contains("// Source: 202403_week2.json\n"));
        assert!(text.contains("D.weeklyData = weeklyData;"));
    }

    #[test]
    fn convert_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("a.json");
        let js = dir.path().join("a.js");
        fs::write(&js, "stale contents that are much longer than the new artifact will be ".repeat(100)).unwrap();
        fs::write(&json, "{}").unwrap();

        convert_json_to_js(&json, &js, "fresh").unwrap();

        let text = fs::read_to_string(&js).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.contains("const fresh = {};"));
    }

    #[test]
    fn missing_input_is_not_found_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("out/never.js");

        let err = convert_json_to_js(&dir.path().join("missing.json"), &js, "weeklyData").unwrap_err();

        assert!(matches!(err, ConvertError::NotFound { .. }));
        assert!(!js.exists());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("bad.json");
        fs::write(&json, r#"{"brands": "#).unwrap();
        let js = dir.path().join("bad.js");

        let err = convert_json_to_js(&json, &js, "weeklyData").unwrap_err();

        assert!(matches!(err, ConvertError::Parse { .. }));
        assert!(!js.exists());
    }

    #[test]
    fn invalid_variable_name_is_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("x.js");

        let err = convert_json_to_js(&dir.path().join("missing.json"), &js, "not valid").unwrap_err();

        assert!(matches!(err, ConvertError::InvalidIdentifier { .. }));
    }
}
