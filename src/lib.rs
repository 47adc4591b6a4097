//! # bindery
//!
//! Assembles a multi-chapter HTML book into a publishable set of standalone
//! pages: every internal cross-reference rewritten to the correct chapter
//! file and anchor, every chapter given a synthesized display title with
//! sequential chapter/appendix/part numbering, and a single consistent
//! table-of-contents fragment spliced into every page's header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use bindery::publish::{PublishOptions, publish};
//! use bindery::rewrite::XrefPolicy;
//!
//! let report = publish(&PublishOptions {
//!     source: PathBuf::from("book"),
//!     dest: PathBuf::from("_site/book"),
//!     fragments: None,
//!     xref_policy: XrefPolicy::Permissive,
//! }).unwrap();
//! println!("wrote {} pages", report.pages.len());
//! ```
//!
//! ## Pipeline
//!
//! The pieces compose in dependency order: [`catalog::ChapterCatalog`] lists
//! the chapters, [`index::BookIndex`] records each chapter's anchors and
//! display title, and the [`rewrite`] passes plus [`assemble`] consume that
//! frozen index to produce the final pages. The index must be complete
//! before any rewriting starts, because rewriting one chapter needs anchor
//! data from chapters that have not been visited yet.

pub mod assemble;
pub mod catalog;
pub mod dom;
pub mod error;
pub mod index;
pub mod publish;
pub mod rewrite;
pub(crate) mod util;

pub use catalog::{ChapterCatalog, ChapterKind};
pub use error::{Error, Result};
pub use index::{BookIndex, ChapterInfo, NumberingState};
pub use rewrite::{HrefMap, XrefPolicy};
