use std::fs;
use std::path::Path;

use serde_yaml::Mapping;

/// Front matter delimiter, at the start of the file and again after the
/// metadata text.
const DELIMITER: &str = "---";

/// Outcome of front matter extraction. Callers must handle both variants;
/// no decode error escapes this module.
#[derive(Debug)]
pub enum FrontMatter {
    /// A well-formed YAML mapping and the body text that follows it.
    Parsed { metadata: Mapping, body: String },
    /// Missing delimiters, a decode failure, or a non-mapping top level.
    /// The document must be left untouched.
    Unparseable,
}

/// Read a document as text, best-effort. Invalid UTF-8 never aborts
/// processing; the file is decoded lossily.
pub fn read_text(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("reading {}: {}", path.display(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split document text into front matter and body.
///
/// The text must begin with the literal delimiter; the metadata is whatever
/// sits between the first two delimiter occurrences, and the body is
/// everything after the second. Anything malformed is `Unparseable`.
pub fn parse_front_matter(text: &str) -> FrontMatter {
    if !text.starts_with(DELIMITER) {
        return FrontMatter::Unparseable;
    }

    let rest = &text[DELIMITER.len()..];
    let Some(end) = rest.find(DELIMITER) else {
        return FrontMatter::Unparseable;
    };

    let yaml_text = &rest[..end];
    let body = &rest[end + DELIMITER.len()..];

    let value: serde_yaml::Value = match serde_yaml::from_str(yaml_text) {
        Ok(v) => v,
        Err(_) => return FrontMatter::Unparseable,
    };

    match value {
        serde_yaml::Value::Mapping(metadata) => FrontMatter::Parsed {
            metadata,
            body: body.to_string(),
        },
        _ => FrontMatter::Unparseable,
    }
}

/// Rebuild full document content from metadata and body.
///
/// Serializes the mapping in insertion order, trims trailing whitespace from
/// the YAML, and strips leading whitespace from the body so repeated
/// rewrites don't accumulate blank lines.
pub fn rebuild(metadata: &Mapping, body: &str) -> Result<String, String> {
    let yaml = serde_yaml::to_string(metadata).map_err(|e| format!("serializing YAML: {}", e))?;

    let mut sb = String::new();
    sb.push_str(DELIMITER);
    sb.push('\n');
    sb.push_str(yaml.trim_end());
    sb.push('\n');
    sb.push_str(DELIMITER);
    sb.push('\n');
    sb.push_str(body.trim_start());
    Ok(sb)
}
