//! Comprehensive tests for fos-css
//!
//! Tests selector compilation and matching against parsed documents.

use fos_css::compile;
use fos_dom::{Document, NodeId};
use fos_html::parse;

fn select(doc: &Document, selector: &str) -> Vec<String> {
    select_from(doc, doc.root(), selector)
}

fn select_from(doc: &Document, context: NodeId, selector: &str) -> Vec<String> {
    let tree = doc.tree();
    compile(selector)
        .unwrap()
        .execute(tree, context)
        .into_iter()
        .map(|id| {
            let name = tree.element_name(id).unwrap_or_default();
            match tree.get_attribute(id, "id") {
                Some(key) => format!("{}#{}", name, key),
                None => name.to_string(),
            }
        })
        .collect()
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>t</title></head>
<body>
  <div id="main" class="container primary">
    <h1 id="title">Welcome</h1>
    <p id="p1" class="intro">First <a id="l1" href="/a">one</a></p>
    <p id="p2" lang="en-US">Second <a id="l2" name="anchor">two</a></p>
    <ul id="list">
      <li id="i1">1</li><li id="i2" class="odd">2</li><li id="i3">3</li><li id="i4">4</li>
    </ul>
    <form id="f">
      <input id="c1" type="checkbox" checked>
      <input id="c2" type="checkbox" disabled>
      <select id="s"><option id="o1">a</option><option id="o2" selected>b</option></select>
    </form>
  </div>
</body>
</html>"#;

#[test]
fn test_type_selector() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "p"), ["p#p1", "p#p2"]);
    assert_eq!(select(&doc, "H1"), ["h1#title"]);
}

#[test]
fn test_id_and_class() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "#list"), ["ul#list"]);
    assert_eq!(select(&doc, ".primary.container"), ["div#main"]);
    assert_eq!(select(&doc, ".missing"), Vec::<String>::new());
}

#[test]
fn test_attribute_selectors() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "a[href]"), ["a#l1"]);
    assert_eq!(select(&doc, "[lang|=en]"), ["p#p2"]);
    assert_eq!(select(&doc, "[class~=intro]"), ["p#p1"]);
    assert_eq!(select(&doc, "[id^=i]"), ["li#i1", "li#i2", "li#i3", "li#i4"]);
    assert_eq!(select(&doc, "[id$='2']"), ["p#p2", "a#l2", "li#i2", "input#c2", "option#o2"]);
    assert_eq!(select(&doc, "[href*=a]"), ["a#l1"]);
}

#[test]
fn test_combinators() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "div > p > a"), ["a#l1", "a#l2"]);
    assert_eq!(select(&doc, "h1 + p"), ["p#p1"]);
    assert_eq!(select(&doc, "h1 ~ p"), ["p#p1", "p#p2"]);
    assert_eq!(select(&doc, "body a"), ["a#l1", "a#l2"]);
}

#[test]
fn test_structural_pseudo_classes() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "li:first-child"), ["li#i1"]);
    assert_eq!(select(&doc, "li:last-child"), ["li#i4"]);
    assert_eq!(select(&doc, "li:nth-child(odd)"), ["li#i1", "li#i3"]);
    assert_eq!(select(&doc, "li:nth-last-child(1)"), ["li#i4"]);
    assert_eq!(select(&doc, "p:first-of-type"), ["p#p1"]);
    assert_eq!(select(&doc, "h1:only-of-type"), ["h1#title"]);
    assert_eq!(select(&doc, ":root"), ["html"]);
}

#[test]
fn test_logical_pseudo_classes() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "li:not(.odd, #i4)"), ["li#i1", "li#i3"]);
    assert_eq!(select(&doc, ":is(h1, ul)"), ["h1#title", "ul#list"]);
    assert_eq!(select(&doc, "li:where(#i3)"), ["li#i3"]);
}

#[test]
fn test_form_pseudo_classes() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, ":checked"), ["input#c1", "option#o2"]);
    assert_eq!(select(&doc, "input:disabled"), ["input#c2"]);
    assert_eq!(select(&doc, "input:enabled"), ["input#c1"]);
    assert_eq!(select(&doc, ":link"), ["a#l1"]);
}

#[test]
fn test_group_keeps_document_order() {
    let doc = parse(PAGE).document;
    assert_eq!(select(&doc, "ul, h1, form"), ["h1#title", "ul#list", "form#f"]);
}

#[test]
fn test_context_scoping() {
    let doc = parse(PAGE).document;
    let list = doc.tree().first_element_by_tag_name("ul").unwrap();
    assert_eq!(select_from(&doc, list, "li.odd"), ["li#i2"]);
    assert_eq!(select_from(&doc, list, "div li"), Vec::<String>::new());
    assert_eq!(select_from(&doc, list, "ul"), ["ul#list"]);
}
