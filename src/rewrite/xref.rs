//! Cross-reference rewriting.
//!
//! Turns locally-scoped `#anchor` links that target another chapter into
//! absolute `/book/<file>` or `/book/<file>#<anchor>` links. Resolution is
//! two-pass: a link matching some other chapter's primary anchor becomes a
//! link to that chapter's root (the anchor is the chapter entry point, so it
//! is dropped); only when no chapter matches that way is the anchor looked
//! up in the other chapters' public anchor sets.

use log::{debug, trace};

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::index::BookIndex;

/// What to do with a `#` link that matches no other chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XrefPolicy {
    /// Leave unresolved links untouched. Same-chapter links are the common
    /// case, but genuinely broken xrefs slip through silently.
    #[default]
    Permissive,
    /// Fail on links that match no other chapter and no anchor in their own
    /// chapter either.
    Strict,
}

/// Rewrite the chapter's cross-chapter links in place.
pub fn rewrite_xrefs(
    doc: &mut Document,
    file: &str,
    index: &BookIndex,
    policy: XrefPolicy,
) -> Result<()> {
    let links = doc.find_all_by_tag(doc.document(), "a");

    for link in links {
        let Some(href) = doc.attr(link, "href") else {
            continue;
        };
        if !href.starts_with('#') {
            continue;
        }
        let href = href.to_string();
        let anchor = &href[1..];

        if let Some(new_href) = resolve(&href, anchor, file, index) {
            trace!("{file}: {href} -> {new_href}");
            doc.set_attr(link, "href", &new_href);
        } else if policy == XrefPolicy::Strict && !doc.has_id(anchor) {
            return Err(Error::UnresolvedXref {
                file: file.to_string(),
                href,
            });
        } else {
            debug!("{file}: leaving {href} unresolved");
        }
    }

    Ok(())
}

fn resolve(href: &str, anchor: &str, file: &str, index: &BookIndex) -> Option<String> {
    // Primary anchors first, across all chapters: a collision between one
    // chapter's primary anchor and another's subsection anchor resolves to
    // the chapter root.
    for other in index.chapters() {
        if other.file == file {
            continue;
        }
        if other.primary_anchor.as_deref() == Some(anchor) {
            return Some(format!("/book/{}", other.file));
        }
    }
    for other in index.chapters() {
        if other.file == file {
            continue;
        }
        if other.public_anchors.contains(anchor) {
            return Some(format!("/book/{}{href}", other.file));
        }
    }
    None
}
