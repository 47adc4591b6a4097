//! Chapter heading rewriting.

use crate::dom::Document;
use crate::index::ChapterInfo;

use super::strip_keep_togethers;

/// Replace the first `<h2>`'s content with the chapter's computed display
/// title. Keep-together spans inside the heading are detached first so the
/// decorative markup cannot resurface. No-op for chapters without an `<h2>`.
pub fn rewrite_title(doc: &mut Document, info: &ChapterInfo) {
    let Some(h2) = doc.find_by_tag("h2") else {
        return;
    };
    strip_keep_togethers(doc, h2);
    doc.set_text(h2, &info.display_title);
}
