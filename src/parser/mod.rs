//! Slide document parsing.
//!
//! Pure transformation from raw text to an ordered slide list plus metadata.
//! Acquisition (file reads, shebang stripping, pre-processing) happens in
//! `crate::source` before text reaches this module.

use crate::model::metadata::Metadata;
use serde::Deserialize;

/// Slide separator: a line holding exactly three dashes.
pub const DELIMITER: &str = "\n---\n";

/// Result of parsing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Ordered slide bodies. Never empty.
    pub slides: Vec<String>,
    /// Metadata from the first segment, or defaults.
    pub metadata: Metadata,
    /// Whether the first segment was consumed as metadata.
    pub had_metadata: bool,
}

/// Optional keys of a metadata block.
///
/// Unknown keys are ignored so that any YAML mapping counts as configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MetadataBlock {
    author: Option<String>,
    date: Option<String>,
    theme: Option<String>,
    paging: Option<String>,
}

/// Parse a document into slides and metadata.
///
/// The first segment is metadata only if it is a YAML mapping AND more than
/// one segment exists; otherwise every segment is a slide and defaults apply.
pub fn parse(raw: &str) -> ParsedDocument {
    let mut slides = split_slides(raw);

    let metadata = if slides.len() > 1 {
        parse_metadata(&slides[0])
    } else {
        None
    };

    match metadata {
        Some(metadata) => {
            slides.remove(0);
            ParsedDocument {
                slides,
                metadata,
                had_metadata: true,
            }
        }
        None => ParsedDocument {
            slides,
            metadata: Metadata::default(),
            had_metadata: false,
        },
    }
}

/// Split raw text on [`DELIMITER`].
///
/// Line endings are normalized and a leading `---` line (front-matter style)
/// is dropped first. Always yields at least one segment.
pub fn split_slides(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n");
    let content = normalized
        .strip_prefix(DELIMITER.trim_start_matches('\n'))
        .unwrap_or(&normalized);

    content.split(DELIMITER).map(str::to_string).collect()
}

/// Try to read a segment as a metadata block.
///
/// Returns `None` for anything that is not a YAML mapping with string-valued
/// known keys. Empty values fall back to defaults.
pub fn parse_metadata(segment: &str) -> Option<Metadata> {
    let value: serde_yaml::Value = serde_yaml::from_str(segment).ok()?;
    if !value.is_mapping() {
        return None;
    }
    let block: MetadataBlock = serde_yaml::from_value(value).ok()?;

    let defaults = Metadata::default();
    let pick = |field: Option<String>, default: String| {
        field.filter(|value| !value.is_empty()).unwrap_or(default)
    };

    Some(Metadata {
        author: pick(block.author, defaults.author),
        date: pick(block.date, defaults.date),
        theme: pick(block.theme, defaults.theme),
        paging: pick(block.paging, defaults.paging),
    })
}
