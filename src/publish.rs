//! End-to-end publish orchestration.
//!
//! Phases, in order: load the manifest, parse every chapter, build the
//! [`BookIndex`], extract and rewrite the TOC, then rewrite and assemble
//! every chapter in memory. Output files are only written once every page
//! has been rewritten, so a failed build publishes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::assemble::{Fragments, assemble_page};
use crate::catalog::ChapterCatalog;
use crate::dom::Document;
use crate::error::{Error, Result};
use crate::index::BookIndex;
use crate::rewrite::{XrefPolicy, rewrite_toc, rewrite_xrefs, title::rewrite_title};
use crate::util::{decode_text, sniff_charset};

/// Manifest filename inside the book source directory.
const MANIFEST_FILE: &str = "atlas.json";

/// Combined book document containing the `#toc` element.
const BOOK_FILE: &str = "book.html";

/// A publish run's inputs.
pub struct PublishOptions {
    /// Book source directory (manifest, chapters, combined book document).
    pub source: PathBuf,
    /// Destination directory for the rewritten pages.
    pub dest: PathBuf,
    /// Optional directory of boilerplate fragments.
    pub fragments: Option<PathBuf>,
    /// Fail on cross-references that resolve to no chapter at all.
    pub xref_policy: XrefPolicy,
}

/// Summary of a completed publish run.
#[derive(Debug)]
pub struct PublishReport {
    /// Pages written, in catalog order.
    pub pages: Vec<PathBuf>,
}

/// Publish the book: index, rewrite, assemble, write.
pub fn publish(opts: &PublishOptions) -> Result<PublishReport> {
    let catalog = ChapterCatalog::load(&opts.source.join(MANIFEST_FILE))?;
    info!("catalog has {} chapters", catalog.len());

    let mut docs = Vec::with_capacity(catalog.len());
    for entry in &catalog {
        docs.push(read_document(&opts.source.join(&entry.file))?);
    }

    let index = BookIndex::build(&catalog, &docs)?;

    let mut book_doc = read_document(&opts.source.join(BOOK_FILE))?;
    let toc = book_doc.get_by_id("toc").ok_or(Error::MissingToc)?;
    rewrite_toc(&mut book_doc, toc, &index)?;

    let fragments = match &opts.fragments {
        Some(dir) => Fragments::load(dir)?,
        None => Fragments::none(),
    };

    // Rewrite everything in memory before touching the output tree.
    let mut pages = Vec::with_capacity(catalog.len());
    for (info, doc) in index.chapters().iter().zip(docs.iter_mut()) {
        rewrite_xrefs(doc, &info.file, &index, opts.xref_policy)?;
        rewrite_title(doc, info);
        assemble_page(doc, &book_doc, toc, &fragments, &info.file);
        pages.push((info.file.clone(), doc.to_html()));
    }

    fs::create_dir_all(&opts.dest)?;
    let mut written = Vec::with_capacity(pages.len());
    for (file, html) in pages {
        let target = opts.dest.join(&file);
        debug!("writing {}", target.display());
        fs::write(&target, html)?;
        written.push(target);
    }

    info!("wrote {} pages to {}", written.len(), opts.dest.display());
    Ok(PublishReport { pages: written })
}

fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)?;
    let charset = sniff_charset(&bytes);
    let text = decode_text(&bytes, charset.as_deref());
    Ok(Document::parse(&text))
}
