//! The per-chapter index built before any rewriting starts.
//!
//! Rewriting chapter *i* may need anchor data from chapter *j* that has not
//! been visited yet, so the whole [`BookIndex`] is built up front and treated
//! as immutable by every rewriting pass.

pub mod anchors;
pub mod numbering;

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::catalog::{ChapterCatalog, ChapterKind};
use crate::dom::Document;
use crate::error::Result;

pub use anchors::AnchorScan;
pub use numbering::NumberingState;

/// Everything the rewriting passes need to know about one chapter.
#[derive(Debug, Clone)]
pub struct ChapterInfo {
    /// Output filename, e.g. `chapter_02_core.html`.
    pub file: String,
    pub kind: ChapterKind,
    /// Id of the chapter's main heading (or the `<body>` fallback). Chapters
    /// without one contribute no entry of their own to the href map but are
    /// still processed.
    pub primary_anchor: Option<String>,
    /// Computed human-facing title, e.g. `"3: Error Handling"`.
    pub display_title: String,
    /// Raw heading text before numbering, kept for TOC title fixups.
    pub original_title: String,
    /// Ids of `<h3>` subsections, in document order.
    pub subsection_anchors: Vec<String>,
    /// All addressable anchor ids in the chapter.
    pub public_anchors: HashSet<String>,
}

/// Catalog-ordered chapter records with by-file lookup. Built once per run;
/// read-only afterwards.
#[derive(Debug)]
pub struct BookIndex {
    chapters: Vec<ChapterInfo>,
    by_file: HashMap<String, usize>,
}

impl BookIndex {
    /// Build the index from the catalog and the parsed chapter documents
    /// (parallel to the catalog, in catalog order).
    pub fn build(catalog: &ChapterCatalog, docs: &[Document]) -> Result<Self> {
        debug_assert_eq!(catalog.len(), docs.len());

        let mut numbering = NumberingState::new();
        let mut chapters = Vec::with_capacity(catalog.len());
        let mut by_file = HashMap::with_capacity(catalog.len());

        for (entry, doc) in catalog.iter().zip(docs) {
            let scan = anchors::scan(doc, &entry.file)?;
            let display_title = numbering.display_title(entry.kind, &scan.title)?;
            debug!(
                "indexed {}: {:?} -> {display_title:?}, {} subsections, {} anchors",
                entry.file,
                scan.primary,
                scan.subsections.len(),
                scan.public.len()
            );

            by_file.insert(entry.file.clone(), chapters.len());
            chapters.push(ChapterInfo {
                file: entry.file.clone(),
                kind: entry.kind,
                primary_anchor: scan.primary,
                display_title,
                original_title: scan.title,
                subsection_anchors: scan.subsections,
                public_anchors: scan.public,
            });
        }

        Ok(Self { chapters, by_file })
    }

    /// Chapters in catalog order.
    pub fn chapters(&self) -> &[ChapterInfo] {
        &self.chapters
    }

    /// Look up a chapter by its output filename.
    pub fn get(&self, file: &str) -> Option<&ChapterInfo> {
        self.by_file.get(file).map(|&i| &self.chapters[i])
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
