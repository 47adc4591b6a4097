//! Anchor extraction: one scan per chapter.

use std::collections::HashSet;

use crate::dom::Document;
use crate::error::{Error, Result};

/// Structural ids that are never addressable anchors.
const RESERVED_IDS: &[&str] = &["header", "content", "footnotes", "footer", "footer-text"];

/// Prefix marking auto-generated ids as internal.
const INTERNAL_PREFIX: char = '_';

/// The anchors extracted from one chapter document.
#[derive(Debug, Clone)]
pub struct AnchorScan {
    /// Id of the chapter's main heading, falling back to the `<body>` id.
    pub primary: Option<String>,
    /// Raw text of the main heading, before any relabeling.
    pub title: String,
    /// Ids of `<h3>` subsection headings, in document order.
    pub subsections: Vec<String>,
    /// All addressable anchor ids (internal and reserved ids excluded).
    pub public: HashSet<String>,
}

/// Scan a chapter document for its anchors and heading text.
///
/// The primary heading is the first `<h2>`, or the first `<h1>` when the
/// chapter has no `<h2>`. A chapter with neither is malformed.
pub fn scan(doc: &Document, file: &str) -> Result<AnchorScan> {
    let heading = doc
        .find_by_tag("h2")
        .or_else(|| doc.find_by_tag("h1"))
        .ok_or_else(|| Error::MissingHeading {
            file: file.to_string(),
        })?;

    let primary = doc
        .element_id(heading)
        .or_else(|| doc.find_by_tag("body").and_then(|b| doc.element_id(b)))
        .map(|id| id.to_string());

    let title = doc.text_content(heading);

    let subsections: Vec<String> = doc
        .find_all_by_tag(doc.document(), "h3")
        .iter()
        .filter_map(|&h| doc.element_id(h))
        .map(|id| id.to_string())
        .collect();

    let public: HashSet<String> = doc
        .descendants(doc.document())
        .filter_map(|n| doc.element_id(n))
        .filter(|id| !id.starts_with(INTERNAL_PREFIX) && !RESERVED_IDS.contains(id))
        .map(|id| id.to_string())
        .collect();

    Ok(AnchorScan {
        primary,
        title,
        subsections,
        public,
    })
}
