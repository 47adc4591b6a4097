//! Rewriting passes: cross-references, chapter titles, and the TOC.
//!
//! All passes consume the frozen [`crate::index::BookIndex`] read-only and
//! mutate one document in place.

pub mod title;
pub mod toc;
pub mod xref;

pub use toc::{HrefMap, href_map, rewrite_toc};
pub use xref::{XrefPolicy, rewrite_xrefs};

use crate::dom::{Document, NodeId};

/// Class marking decorative print-pagination wrappers.
const KEEP_TOGETHER_CLASS: &str = "keep-together";

/// Detach decorative keep-together spans nested under an element, so they
/// cannot resurface after its text is overwritten.
pub(crate) fn strip_keep_togethers(doc: &mut Document, el: NodeId) {
    let spans: Vec<NodeId> = doc
        .descendants(el)
        .filter(|&n| {
            doc.element_name(n) == Some("span")
                && doc
                    .element_classes(n)
                    .iter()
                    .any(|c| c == KEEP_TOGETHER_CLASS)
        })
        .collect();
    for span in spans {
        doc.detach(span);
    }
}
