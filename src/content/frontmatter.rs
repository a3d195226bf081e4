//! YAML frontmatter splitting and typed field access.
//!
//! A content file looks like:
//!
//! ```text
//! ---
//! title: Zero-Downtime Deploys on EKS
//! tags: [kubernetes, aws]
//! ---
//!
//! Markdown body
//! ```
//!
//! Accessors never fail: a missing key, a `null` or a value of the wrong
//! shape all read as absent, and callers apply their defaults.

use serde_yaml_ng::Value;

const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    value: Value,
}

impl Frontmatter {
    pub fn empty() -> Self {
        Frontmatter { value: Value::Null }
    }

    /// Parses the text between the delimiters. Empty text is an empty map;
    /// anything but a mapping is rejected.
    pub fn parse(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::empty());
        }

        let value: Value = serde_yaml_ng::from_str(yaml).map_err(|e| e.to_string())?;
        match value {
            Value::Mapping(_) | Value::Null => Ok(Frontmatter { value }),
            _ => Err("frontmatter must be a YAML mapping".to_string()),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        match self.value.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Scalar field as text. Numbers and booleans are converted.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    /// Scalar field as text, treating blank values as absent.
    pub fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get_string(key).filter(|s| !s.trim().is_empty())
    }

    /// Positive integer field, e.g. `readTime: 5`.
    pub fn get_positive_int(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(Value::as_u64)
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
    }

    /// Sequence field; `None` when the value is not a sequence at all.
    pub fn get_sequence(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_sequence)
    }

    /// Sequence of scalars as text. A non-sequence value yields an empty
    /// list; non-scalar elements are skipped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_sequence(key)
            .map(|seq| seq.iter().filter_map(scalar_to_string).collect())
            .unwrap_or_default()
    }
}

pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Splits a content file into its frontmatter and markdown body.
///
/// Without an opening `---` line the whole text is the body. An opening
/// delimiter that is never closed, or YAML that does not parse, is an error.
pub fn split_frontmatter(text: &str) -> Result<(Frontmatter, &str), String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((Frontmatter::empty(), text));
    };
    if !is_delimiter(first) {
        return Ok((Frontmatter::empty(), text));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            let frontmatter = Frontmatter::parse(yaml)?;
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err("missing closing --- delimiter".to_string())
}
