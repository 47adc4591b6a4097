//! Page assembly: splice the rewritten TOC and boilerplate fragments into a
//! chapter document.

use std::fs;
use std::path::Path;

use log::debug;

use crate::catalog::stem;
use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Placeholder token in the comment-widget fragment, replaced with the
/// chapter file's stem.
pub const PAGE_IDENTIFIER_TOKEN: &str = "PAGE_IDENTIFIER";

/// Classes set on `<body>` when the page carries a navigation panel.
const NAV_BODY_CLASS: &str = "article toc2 toc-left";

/// Optional boilerplate fragments supplied by the surrounding build.
///
/// Each is an opaque pre-parsed snippet; the comment widget is kept as raw
/// text because its placeholder token is substituted per page before parsing.
#[derive(Default)]
pub struct Fragments {
    banner: Option<Document>,
    comments: Option<String>,
    analytics: Option<Document>,
}

impl Fragments {
    /// No fragments at all; pages are assembled without boilerplate.
    pub fn none() -> Self {
        Self::default()
    }

    /// Load fragments from a directory. Missing files simply skip that
    /// fragment.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            banner: read_optional(&dir.join("banner.html"))?.map(|s| Document::parse(&s)),
            comments: read_optional(&dir.join("comments.html"))?,
            analytics: read_optional(&dir.join("analytics.html"))?.map(|s| Document::parse(&s)),
        })
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no fragment at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Splice the TOC and fragments into a rewritten chapter document.
///
/// The TOC lands inside the `#header` region when the chapter has one, and
/// only then does the body get the navigation classes. The banner becomes
/// the body's first child; the comment widget and analytics snippet its last
/// children.
pub fn assemble_page(
    doc: &mut Document,
    toc_src: &Document,
    toc: NodeId,
    fragments: &Fragments,
    file: &str,
) {
    let Some(body) = doc.find_by_tag("body") else {
        return;
    };

    if let Some(header) = doc.get_by_id("header") {
        doc.set_attr(body, "class", NAV_BODY_CLASS);
        let toc_copy = doc.import(toc_src, toc);
        doc.append(header, toc_copy);
    }

    if let Some(banner) = &fragments.banner
        && let Some(root) = banner.fragment_root()
    {
        let copy = doc.import(banner, root);
        doc.insert_first(body, copy);
    }

    if let Some(template) = &fragments.comments {
        let widget = Document::parse(&template.replace(PAGE_IDENTIFIER_TOKEN, stem(file)));
        if let Some(root) = widget.fragment_root() {
            let copy = doc.import(&widget, root);
            doc.append(body, copy);
        }
    }

    if let Some(analytics) = &fragments.analytics
        && let Some(root) = analytics.fragment_root()
    {
        let copy = doc.import(analytics, root);
        doc.append(body, copy);
    }
}
