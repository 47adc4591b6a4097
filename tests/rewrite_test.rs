//! Rewriting-pass behavior over an in-memory book: the concrete numbering
//! and link scenarios, idempotence, link closure, and TOC totality.

use bindery::dom::Document;
use bindery::rewrite::{self, XrefPolicy, href_map, rewrite_toc, rewrite_xrefs};
use bindery::{BookIndex, ChapterCatalog};

const INTRO_HTML: &str = r##"<body>
    <h2 id="ch01">Introduction</h2>
    <p>See <a href="#ch02">the core chapter</a> and
       <a href="#ch02-model">its data model</a>.</p>
"##;

const CORE_HTML: &str = r#"<body>
    <h2 id="ch02">Core</h2>
    <h3 id="ch02-model">The Data Model</h3>
"#;

const APPENDIX_HTML: &str = r#"<body>
    <h2 id="appendix-tools">Tools</h2>
"#;

fn sample_catalog() -> ChapterCatalog {
    ChapterCatalog::from_json(
        r#"{"files": ["chapter_intro.html", "chapter_core.html", "appendix_tools.html"]}"#,
    )
    .unwrap()
}

fn sample_docs() -> Vec<Document> {
    vec![
        Document::parse(INTRO_HTML),
        Document::parse(CORE_HTML),
        Document::parse(APPENDIX_HTML),
    ]
}

fn sample_index() -> BookIndex {
    BookIndex::build(&sample_catalog(), &sample_docs()).unwrap()
}

#[test]
fn display_titles_follow_catalog_order() {
    let index = sample_index();
    let titles: Vec<_> = index
        .chapters()
        .iter()
        .map(|c| c.display_title.as_str())
        .collect();
    assert_eq!(titles, vec!["1: Introduction", "2: Core", "Appendix A: Tools"]);
}

#[test]
fn primary_anchor_link_rewrites_to_chapter_file() {
    let index = sample_index();
    let mut doc = Document::parse(INTRO_HTML);
    rewrite_xrefs(&mut doc, "chapter_intro.html", &index, XrefPolicy::Permissive).unwrap();

    let html = doc.to_html();
    assert!(html.contains(r#"href="/book/chapter_core.html""#));
    assert!(html.contains(r#"href="/book/chapter_core.html#ch02-model""#));
}

#[test]
fn rewriting_is_idempotent() {
    // Two full runs over the same inputs, each with a freshly built index,
    // produce byte-identical output for every chapter and the TOC.
    let run = || -> Vec<String> {
        let catalog = sample_catalog();
        let mut docs = sample_docs();
        let index = BookIndex::build(&catalog, &docs).unwrap();

        let mut out = Vec::new();
        for (entry, doc) in catalog.iter().zip(docs.iter_mut()) {
            rewrite_xrefs(doc, &entry.file, &index, XrefPolicy::Permissive).unwrap();
            rewrite::title::rewrite_title(doc, index.get(&entry.file).unwrap());
            out.push(doc.to_html());
        }

        let mut toc_doc = Document::parse(
            r##"<body><div id="toc"><a href="#ch01">Introduction</a>
               <a href="#ch02-model">The Data Model</a></div></body>"##,
        );
        let toc = toc_doc.get_by_id("toc").unwrap();
        rewrite_toc(&mut toc_doc, toc, &index).unwrap();
        out.push(toc_doc.to_html());
        out
    };

    assert_eq!(run(), run());
}

#[test]
fn link_closure_over_all_chapters() {
    let catalog = sample_catalog();
    let index = sample_index();
    let mut docs = sample_docs();

    for (entry, doc) in catalog.iter().zip(docs.iter_mut()) {
        rewrite_xrefs(doc, &entry.file, &index, XrefPolicy::Permissive).unwrap();

        // Every rewritten link points at an existing chapter file, and any
        // fragment at an anchor that exists in that chapter.
        for link in doc.find_all_by_tag(doc.document(), "a") {
            let Some(href) = doc.attr(link, "href") else {
                continue;
            };
            let Some(rest) = href.strip_prefix("/book/") else {
                continue;
            };
            let (file, anchor) = match rest.split_once('#') {
                Some((f, a)) => (f, Some(a)),
                None => (rest, None),
            };
            let target = index.get(file).unwrap_or_else(|| {
                panic!("{href} points at unknown chapter {file}");
            });
            if let Some(anchor) = anchor {
                assert!(
                    target.public_anchors.contains(anchor),
                    "{href} points at missing anchor {anchor} in {file}"
                );
            }
        }
    }
}

#[test]
fn toc_totality_every_link_mapped() {
    let index = sample_index();
    let map = href_map(&index);

    let toc_html = r##"<body><div id="toc">
        <a href="#ch01">1: Introduction</a>
        <a href="#ch02">Chapter Two: Core</a>
        <a href="#ch02-model">The Data Model</a>
        <a href="#appendix-tools">Appendix A: Tools</a>
    </div></body>"##;

    let doc = Document::parse(toc_html);
    let toc = doc.get_by_id("toc").unwrap();
    for link in doc.find_all_by_tag(toc, "a") {
        let href = doc.attr(link, "href").unwrap();
        assert!(map.contains_key(href), "{href} missing from href map");
    }

    let mut doc = Document::parse(toc_html);
    let toc = doc.get_by_id("toc").unwrap();
    rewrite_toc(&mut doc, toc, &index).unwrap();
    assert!(doc.to_html().contains(r#"href="/book/chapter_core.html""#));
}

#[test]
fn toc_entry_scenario_href_and_title() {
    // A TOC entry with href #ch02 and text "Chapter Two: Core" rewrites the
    // href; the text is only replaced when the short title has a correction.
    let index = sample_index();
    let mut doc = Document::parse(
        r##"<body><div id="toc"><a href="#ch02">Chapter Two: Core</a></div></body>"##,
    );
    let toc = doc.get_by_id("toc").unwrap();
    rewrite_toc(&mut doc, toc, &index).unwrap();

    let html = doc.to_html();
    assert!(html.contains(r#"href="/book/chapter_core.html""#));
    // "Core" is no appendix/part short title, so the visible text stays.
    assert!(html.contains(">Chapter Two: Core</a>"));
}

#[test]
fn counter_exhaustion_fails_before_any_output() {
    // 13 appendices against 12 letters.
    let files: Vec<String> = (0..13).map(|i| format!("\"appendix_{i:02}.html\"")).collect();
    let json = format!(r#"{{"files": [{}]}}"#, files.join(", "));
    let catalog = ChapterCatalog::from_json(&json).unwrap();
    let docs: Vec<Document> = (0..13)
        .map(|i| Document::parse(&format!(r#"<body><h2 id="app{i}">A</h2></body>"#)))
        .collect();

    assert!(matches!(
        BookIndex::build(&catalog, &docs),
        Err(bindery::Error::CounterExhausted { .. })
    ));
}
