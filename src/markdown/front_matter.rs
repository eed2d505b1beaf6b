//! YAML front matter between `---` fences at the top of a document.

use serde_yaml::{Mapping, Value};

use crate::errors::Result;

/// Key holding the tool-specific section of the front matter.
pub const WALTZ_KEY: &str = "waltz";

/// A document split into its front matter and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Every top-level key except the `waltz` section.
    pub metadata: Mapping,
    /// The `waltz` section, or an empty mapping.
    pub waltz: Value,
    /// The Markdown after the closing fence.
    pub content: String,
}

/// Splits `raw` into front matter and body. A document that does not open
/// with a `---` line has no front matter. An empty block yields empty maps.
pub fn extract_front_matter(raw: &str) -> Result<FrontMatter> {
    let Some((yaml, content)) = split_fences(raw) else {
        return Ok(FrontMatter {
            metadata: Mapping::new(),
            waltz: Value::Mapping(Mapping::new()),
            content: raw.to_string(),
        });
    };

    let mut metadata = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => {
            log::warn!("Front matter is not a mapping; ignoring {other:?}");
            Mapping::new()
        }
    };
    let waltz = metadata
        .remove(WALTZ_KEY)
        .unwrap_or_else(|| Value::Mapping(Mapping::new()));
    Ok(FrontMatter {
        metadata,
        waltz,
        content: content.to_string(),
    })
}

fn split_fences(raw: &str) -> Option<(&str, &str)> {
    let rest = raw
        .strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return Some((&rest[..offset], body.strip_prefix('\n').unwrap_or(body)));
        }
        offset += line.len();
    }
    None
}
