//! Table-of-contents rewriting.
//!
//! The TOC is authoritative and pre-generated from the same source as the
//! chapters, so every one of its links must resolve through the href map;
//! a miss means the TOC and the chapter anchors have drifted out of sync
//! and the build aborts.

use std::collections::HashMap;

use log::debug;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::index::BookIndex;

use super::strip_keep_togethers;

/// Mapping from a source-internal anchor reference (`#anchor`) to its final
/// output reference (`/book/<file>` or `/book/<file>#<anchor>`).
pub type HrefMap = HashMap<String, String>;

/// Presentation class that renders the TOC as a left-side navigation panel.
const TOC_CLASS: &str = "toc2";

/// Build the global anchor-to-output-path map from the index.
pub fn href_map(index: &BookIndex) -> HrefMap {
    let mut map = HrefMap::new();
    for chapter in index.chapters() {
        if let Some(primary) = &chapter.primary_anchor {
            map.insert(format!("#{primary}"), format!("/book/{}", chapter.file));
        }
        for sub in &chapter.subsection_anchors {
            map.insert(
                format!("#{sub}"),
                format!("/book/{}#{sub}", chapter.file),
            );
        }
    }
    map
}

/// Corrections from a short title (text after the first colon) to the
/// canonical display title. Appendix entries are keyed off the original
/// heading text; part entries off the computed title, since raw part
/// headings carry no label to split on.
fn title_corrections(index: &BookIndex) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for chapter in index.chapters() {
        if chapter.original_title.contains("Appendix") {
            let short = after_colon(&chapter.original_title);
            map.insert(short.to_string(), chapter.display_title.clone());
        }
        if chapter.display_title.contains("Part") {
            let short = after_colon(&chapter.display_title);
            map.insert(short.to_string(), chapter.display_title.clone());
        }
    }
    map
}

/// Text after the first colon, trimmed; empty when there is no colon.
fn after_colon(s: &str) -> &str {
    s.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("")
}

/// Short form of a TOC entry's visible text: text after the first colon, or
/// the whole text when there is no colon.
fn short_title(s: &str) -> &str {
    s.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or(s.trim())
}

/// Rewrite every link under the TOC element to its final output path and
/// normalize appendix/part entry text to the canonical display title.
pub fn rewrite_toc(doc: &mut Document, toc: NodeId, index: &BookIndex) -> Result<()> {
    let hrefs = href_map(index);
    let corrections = title_corrections(index);

    let links = doc.find_all_by_tag(toc, "a");
    for link in links {
        let Some(href) = doc.attr(link, "href") else {
            continue;
        };
        let new_href = hrefs.get(href).ok_or_else(|| Error::UnmappedReference {
            href: href.to_string(),
        })?;
        let new_href = new_href.clone();
        doc.set_attr(link, "href", &new_href);

        let text = doc.text_content(link);
        let short = short_title(&text);
        if text.contains("Appendix") || corrections.contains_key(short) {
            if let Some(corrected) = corrections.get(short) {
                debug!("toc entry {text:?} -> {corrected:?}");
                let corrected = corrected.clone();
                strip_keep_togethers(doc, link);
                doc.set_text(link, &corrected);
            }
        }
    }

    doc.set_attr(toc, "class", TOC_CLASS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChapterCatalog;

    fn sample_index() -> BookIndex {
        let catalog = ChapterCatalog::from_json(
            r#"{"files": [
                "part1.html",
                "chapter_intro.html",
                "chapter_core.html",
                "appendix_tools.html"
            ]}"#,
        )
        .unwrap();
        let docs = vec![
            Document::parse(r#"<body><h2 id="part01">The Basics</h2></body>"#),
            Document::parse(r#"<body><h2 id="ch01">Introduction</h2></body>"#),
            Document::parse(
                r#"<body><h2 id="ch02">Core</h2><h3 id="ch02-details">Details</h3></body>"#,
            ),
            Document::parse(r#"<body><h2 id="appA">Appendix A: Tooling</h2></body>"#),
        ];
        BookIndex::build(&catalog, &docs).unwrap()
    }

    #[test]
    fn test_href_map_shape() {
        let map = href_map(&sample_index());

        assert_eq!(map.get("#ch01").unwrap(), "/book/chapter_intro.html");
        assert_eq!(map.get("#ch02").unwrap(), "/book/chapter_core.html");
        assert_eq!(
            map.get("#ch02-details").unwrap(),
            "/book/chapter_core.html#ch02-details"
        );
        assert_eq!(map.get("#part01").unwrap(), "/book/part1.html");
    }

    #[test]
    fn test_rewrite_toc_links_and_class() {
        let mut doc = Document::parse(
            r##"<body><div id="toc">
                <a href="#ch01">Introduction</a>
                <a href="#ch02">Chapter Two: Core</a>
                <a href="#ch02-details">Details</a>
            </div></body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut doc, toc, &sample_index()).unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"href="/book/chapter_intro.html""#));
        assert!(html.contains(r#"href="/book/chapter_core.html""#));
        assert!(html.contains(r#"href="/book/chapter_core.html#ch02-details""#));
        assert!(html.contains(r#"<div id="toc" class="toc2">"#));
    }

    #[test]
    fn test_appendix_entry_text_normalized() {
        let mut doc = Document::parse(
            r##"<body><div id="toc">
                <a href="#appA">Appendix A: <span class="keep-together">Tooling</span></a>
            </div></body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut doc, toc, &sample_index()).unwrap();

        let html = doc.to_html();
        assert!(html.contains(">Appendix A: Tooling</a>"));
        assert!(!html.contains("keep-together"));
    }

    #[test]
    fn test_part_entry_text_normalized() {
        // The raw part heading has no label; the short title of the computed
        // "Part 1: The Basics" keys the correction.
        let mut doc = Document::parse(
            r##"<body><div id="toc"><a href="#part01">The Basics</a></div></body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut doc, toc, &sample_index()).unwrap();

        assert!(doc.to_html().contains(">Part 1: The Basics</a>"));
    }

    #[test]
    fn test_appendix_text_without_correction_left_alone() {
        let mut doc = Document::parse(
            r##"<body><div id="toc"><a href="#ch01">Appendix references: Introduction</a></div></body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut doc, toc, &sample_index()).unwrap();

        assert!(doc.to_html().contains(">Appendix references: Introduction</a>"));
    }

    #[test]
    fn test_unmapped_reference_is_fatal() {
        let mut doc = Document::parse(
            r##"<body><div id="toc"><a href="#gone">Vanished</a></div></body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        let err = rewrite_toc(&mut doc, toc, &sample_index()).unwrap_err();
        assert!(matches!(err, Error::UnmappedReference { href } if href == "#gone"));
    }

    #[test]
    fn test_links_outside_toc_untouched() {
        let mut doc = Document::parse(
            r##"<body>
                <div id="toc"><a href="#ch01">Introduction</a></div>
                <p><a href="#elsewhere">body link</a></p>
            </body>"##,
        );
        let toc = doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut doc, toc, &sample_index()).unwrap();

        assert!(doc.to_html().contains(r##"href="#elsewhere""##));
    }
}
