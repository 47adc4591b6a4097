//! Chapter catalog: the ordered list of content chapters.
//!
//! The catalog is parsed from the book's `atlas.json` manifest (an ordered
//! `files` array), with source extensions mapped to `.html` and front/back
//! matter filtered out. Each entry is classified into a [`ChapterKind`] once
//! here; downstream passes never re-derive it from the filename.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::Result;

/// Front/back matter stems that never become content pages.
const EXCLUDED_STEMS: &[&str] = &[
    "cover",
    "titlepage",
    "copyright",
    "toc",
    "ix",
    "author_bio",
    "colo",
];

/// Chapter classification, driving the numbering and labeling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChapterKind {
    Chapter,
    Appendix,
    Part,
    Epilogue,
    Plain,
}

impl ChapterKind {
    /// Classify a chapter file by its filename prefix.
    pub fn classify(file: &str) -> Self {
        if file.starts_with("chapter_") {
            ChapterKind::Chapter
        } else if file.starts_with("appendix_") {
            ChapterKind::Appendix
        } else if file.starts_with("part") {
            ChapterKind::Part
        } else if file.starts_with("epilogue") {
            ChapterKind::Epilogue
        } else {
            ChapterKind::Plain
        }
    }
}

impl fmt::Display for ChapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChapterKind::Chapter => "chapter",
            ChapterKind::Appendix => "appendix",
            ChapterKind::Part => "part",
            ChapterKind::Epilogue => "epilogue",
            ChapterKind::Plain => "plain",
        };
        f.write_str(name)
    }
}

/// One catalog entry: the chapter's output filename and its kind.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub file: String,
    pub kind: ChapterKind,
}

/// Ordered list of content chapters. Order is significant: it determines
/// numbering and the xref resolution sequence.
#[derive(Debug, Clone)]
pub struct ChapterCatalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct Manifest {
    files: Vec<String>,
}

impl ChapterCatalog {
    /// Parse a catalog from manifest JSON (`{"files": [...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        let entries = manifest
            .files
            .iter()
            .filter(|f| !EXCLUDED_STEMS.contains(&stem(f)))
            .map(|f| {
                let file = f.replace(".asciidoc", ".html");
                let kind = ChapterKind::classify(&file);
                debug!("catalog entry {file} ({kind})");
                CatalogEntry { file, kind }
            })
            .collect();
        Ok(Self { entries })
    }

    /// Load a catalog from a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChapterCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Filename stem: everything before the first dot.
pub(crate) fn stem(file: &str) -> &str {
    file.split('.').next().unwrap_or(file)
}
