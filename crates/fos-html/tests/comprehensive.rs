//! Comprehensive tests for fos-html
//!
//! Tests parsing into the arena and serializing back out.

use fos_dom::NodeData;
use fos_html::{HtmlParser, inner_html, outer_html, parse};

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("").document;
    // html5ever always synthesizes html/head/body
    assert!(doc.document_element().is_some());
    assert!(doc.head().is_some());
    assert!(doc.body().is_some());
}

#[test]
fn test_parse_text_only() {
    let doc = parse("Hello World").document;
    let body = doc.body().unwrap();
    assert_eq!(inner_html(doc.tree(), body), "Hello World");
}

#[test]
fn test_parse_self_closing_tags() {
    let html = r#"<br><hr><img src="test.png"><input type="text">"#;
    let doc = parse(html).document;
    let body = doc.body().unwrap();
    assert_eq!(inner_html(doc.tree(), body), html);
}

#[test]
fn test_parse_nested_structure() {
    let html = r#"
        <html>
            <head>
                <title>Test Page</title>
                <meta charset="utf-8">
            </head>
            <body>
                <div id="container">
                    <h1>Welcome</h1>
                    <p class="intro">This is a test.</p>
                    <ul>
                        <li>Item 1</li>
                        <li>Item 2</li>
                        <li>Item 3</li>
                    </ul>
                </div>
            </body>
        </html>
    "#;

    let doc = parse(html).document;
    assert_eq!(doc.title(), "Test Page");

    let tree = doc.tree();
    let items = tree
        .descendants(tree.root())
        .filter(|(_, node)| node.as_element().is_some_and(|e| e.name == "li"))
        .count();
    assert_eq!(items, 3);
}

#[test]
fn test_parse_malformed_html() {
    // HTML5 parser should handle malformed HTML gracefully
    let html = "<div><p>Unclosed paragraph<span>Unclosed span</div>";
    let outcome = parse(html);
    assert!(!outcome.is_clean());

    let doc = outcome.document;
    let body = doc.body().unwrap();
    assert_eq!(
        inner_html(doc.tree(), body),
        "<div><p>Unclosed paragraph<span>Unclosed span</span></p></div>"
    );
}

#[test]
fn test_parse_with_attributes() {
    let html = r#"<div id="main" class="container primary" data-value="123"></div>"#;
    let doc = parse(html).document;
    let div = doc.tree().first_element_by_tag_name("div").unwrap();

    assert_eq!(doc.tree().get_attribute(div, "id"), Some("main"));
    assert_eq!(doc.tree().get_attribute(div, "class"), Some("container primary"));
    assert_eq!(doc.tree().get_attribute(div, "data-value"), Some("123"));
    assert_eq!(outer_html(doc.tree(), div), html);
}

#[test]
fn test_parse_script_and_style() {
    let html = r#"<html><head><style>p > a { color: blue; }</style><script>var s = "<div>not parsed</div>";</script></head><body></body></html>"#;

    let doc = parse(html).document;
    let script = doc.tree().first_element_by_tag_name("script").unwrap();
    assert_eq!(
        inner_html(doc.tree(), script),
        r#"var s = "<div>not parsed</div>";"#
    );
    assert_eq!(doc.tree().first_element_by_tag_name("div"), None);

    let style = doc.tree().first_element_by_tag_name("style").unwrap();
    assert_eq!(inner_html(doc.tree(), style), "p > a { color: blue; }");
}

#[test]
fn test_parse_entities() {
    let html = r#"<p>&lt;tag&gt; &amp; &quot;quotes&quot; &#169;</p>"#;
    let doc = parse(html).document;
    let p = doc.tree().first_element_by_tag_name("p").unwrap();
    let text = doc.tree().first_child(p).unwrap();
    assert_eq!(
        doc.tree().get(text).unwrap().as_text(),
        Some("<tag> & \"quotes\" \u{a9}")
    );
    assert_eq!(
        inner_html(doc.tree(), p),
        "&lt;tag&gt; &amp; \"quotes\" \u{a9}"
    );
}

#[test]
fn test_parse_comments() {
    let html = "<div><!-- note --><p>Content</p></div>";
    let doc = parse(html).document;
    let div = doc.tree().first_element_by_tag_name("div").unwrap();
    let first = doc.tree().first_child(div).unwrap();
    assert_eq!(doc.tree().node_name(first), Some("#comment"));
    assert_eq!(outer_html(doc.tree(), div), html);
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body>");
    for i in 0..1000 {
        html.push_str(&format!(
            r#"<div id="div-{}" class="item"><p>Paragraph {}</p></div>"#,
            i, i
        ));
    }
    html.push_str("</body></html>");

    let doc = parse(&html).document;

    // root + html + head + body + 1000 * (div + p + text)
    assert_eq!(doc.tree().len(), 4 + 3000);
}

#[test]
fn test_parse_table() {
    let html = "<table><tr><td>Cell</td></tr></table>";
    let doc = parse(html).document;
    // The parser inserts the implied tbody
    let table = doc.tree().first_element_by_tag_name("table").unwrap();
    assert_eq!(
        outer_html(doc.tree(), table),
        "<table><tbody><tr><td>Cell</td></tr></tbody></table>"
    );
}

#[test]
fn test_parse_doctype() {
    let doc = parse("<!DOCTYPE html><html><body></body></html>").document;
    let root = doc.root();
    let first = doc.tree().first_child(root).unwrap();
    assert!(matches!(
        &doc.tree().get(first).unwrap().data,
        NodeData::Doctype { name, .. } if name == "html"
    ));
    assert_eq!(
        outer_html(doc.tree(), root),
        "<!DOCTYPE html><html><head></head><body></body></html>"
    );
}

#[test]
fn test_parse_with_url() {
    let doc = HtmlParser::new()
        .parse_with_url("<p>x</p>", "http://example.com/")
        .document;
    assert_eq!(doc.url(), "http://example.com/");
}
