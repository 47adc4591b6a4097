//! Error types for bindery operations.

use thiserror::Error;

use crate::catalog::ChapterKind;

/// Errors that can occur while indexing or rewriting a book.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Chapter {file} has no <h1> or <h2> heading")]
    MissingHeading { file: String },

    #[error("Combined book document has no #toc element")]
    MissingToc,

    #[error("TOC link {href:?} does not match any chapter anchor")]
    UnmappedReference { href: String },

    #[error("Ran out of {kind} numbers (too many {kind} files in the catalog)")]
    CounterExhausted { kind: ChapterKind },

    #[error("Unresolved cross-reference {href:?} in chapter {file}")]
    UnresolvedXref { file: String, href: String },
}

pub type Result<T> = std::result::Result<T, Error>;
