//! Building node sets from markup
//!
//! Markup that carries a doctype or an `html`/`head`/`body` tag is parsed
//! as a whole document; anything else is a fragment and gets wrapped into a
//! minimal document first, so the parser always sees a complete page.

use std::borrow::Cow;
use std::sync::LazyLock;

use fos_dom::{NodeId, SharedDocument};
use fos_html::HtmlParser;
use regex::Regex;

use crate::error::QueryResult;
use crate::node_ref::NodeRef;
use crate::node_set::NodeSet;
use crate::url_resolver::UrlResolver;

/// Charset recorded when neither the caller nor the markup names one
pub const DEFAULT_CHARSET: &str = "UTF-8";

static STRUCTURAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(!doctype|html[\s>]|head[\s>]|body[\s>])").expect("structural tag pattern")
});

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset *= *["']?([a-zA-Z\-0-9]+)"#).expect("meta charset pattern")
});

static BASE_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<base[^>]+href *= *["']?([^"'>]+)["']?"#).expect("base href pattern")
});

/// Attributes holding URLs, with the elements that carry them. `src` is
/// only rewritten when present and non-empty; `href` and `action` always.
const URL_ATTRIBUTES: &[(&str, &str, bool)] = &[
    ("frame, iframe, img, input, script", "src", true),
    ("a, area, link", "href", false),
    ("form", "action", false),
];

/// Options for loading markup
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Base for relative URLs; overrides a `<base href>` in the markup
    pub base_url: Option<String>,
    /// Charset label; overrides a `<meta charset>` in the markup
    pub charset: Option<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

/// Which part of the parsed document becomes the node set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Doctype,
    Element(&'static str),
    Fragment,
}

/// What the raw markup says about itself
#[derive(Debug)]
struct Sniffed {
    entry: Entry,
    charset: Option<String>,
    base_url: Option<String>,
}

impl Sniffed {
    fn inspect(markup: &str) -> Self {
        let trimmed = markup.trim();
        let Some(found) = STRUCTURAL_TAG.captures(trimmed).and_then(|c| c.get(1)) else {
            return Self {
                entry: Entry::Fragment,
                charset: None,
                base_url: None,
            };
        };

        let tag = found.as_str().to_ascii_lowercase();
        let entry = match tag.trim_end_matches(|c: char| c == '>' || c.is_whitespace()) {
            "!doctype" => Entry::Doctype,
            "html" => Entry::Element("html"),
            "head" => Entry::Element("head"),
            _ => Entry::Element("body"),
        };

        let capture = |pattern: &Regex| {
            pattern
                .captures(markup)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        };
        Self {
            entry,
            charset: capture(&META_CHARSET),
            base_url: capture(&BASE_HREF),
        }
    }
}

fn wrap_fragment(markup: &str, charset: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta http-equiv=\"content-type\" content=\"text/html; charset={}\"></head><body>{}</body></html>",
        charset, markup
    )
}

impl NodeSet {
    /// Parse markup with default options
    pub fn from_html(markup: &str) -> QueryResult<NodeSet> {
        Self::from_html_with(markup, &LoadOptions::default())
    }

    /// Parse markup and pick the initial nodes.
    ///
    /// A doctype yields the document node, an `html`/`head`/`body` tag the
    /// first element of that name, and a fragment its top-level nodes. When
    /// a base URL is known, URL attributes of the picked nodes and their
    /// descendants are resolved against it.
    pub fn from_html_with(markup: &str, options: &LoadOptions) -> QueryResult<NodeSet> {
        let sniffed = Sniffed::inspect(markup);
        let charset = options
            .charset
            .clone()
            .or(sniffed.charset)
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string());
        let base_url = options.base_url.clone().or(sniffed.base_url);

        // Validate before doing any work
        let resolver = base_url.as_deref().map(UrlResolver::new).transpose()?;

        tracing::debug!(entry = ?sniffed.entry, %charset, base = ?base_url, "loading markup");

        let source = match sniffed.entry {
            Entry::Fragment => Cow::Owned(wrap_fragment(markup, &charset)),
            _ => Cow::Borrowed(markup),
        };

        let outcome = HtmlParser::new().parse_with_url(&source, base_url.as_deref().unwrap_or("about:blank"));
        if !outcome.errors.is_empty() {
            tracing::debug!("ignoring {} recoverable parse errors", outcome.errors.len());
            for error in &outcome.errors {
                tracing::trace!("{}", error);
            }
        }

        let mut document = outcome.document;
        document.set_charset(&charset);
        let document = document.into_shared();

        let set = NodeSet::from_nodes(entry_nodes(&document, sniffed.entry));
        if let Some(resolver) = resolver {
            set.rewrite_urls(&resolver)?;
        }
        Ok(set)
    }

    fn rewrite_urls(&self, resolver: &UrlResolver) -> QueryResult<()> {
        for &(selector, attribute, only_when_set) in URL_ATTRIBUTES {
            let matched = self.filter(selector)?;
            let found = self.find(selector)?;
            let targets = NodeSet::from_nodes(matched.nodes.into_iter().chain(found.nodes));

            for node in &targets.nodes {
                let current = node.with_tree(|tree| {
                    tree.get_attribute(node.id(), attribute).map(str::to_string)
                });
                if only_when_set && current.as_deref().is_none_or(str::is_empty) {
                    continue;
                }
                let resolved = resolver.resolve(current.as_deref().unwrap_or_default());
                node.with_tree_mut(|tree| tree.set_attribute(node.id(), attribute, &resolved))?;
            }
        }
        Ok(())
    }
}

fn entry_nodes(document: &SharedDocument, entry: Entry) -> Vec<NodeRef> {
    let ids: Vec<NodeId> = {
        let doc = document.borrow();
        match entry {
            Entry::Doctype => vec![doc.root()],
            Entry::Element(tag) => doc.tree().first_element_by_tag_name(tag).into_iter().collect(),
            Entry::Fragment => doc
                .body()
                .map(|body| doc.tree().child_ids(body))
                .unwrap_or_default(),
        }
    };
    ids.into_iter().map(|id| NodeRef::new(document, id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_fragment() {
        let sniffed = Sniffed::inspect("<span></span><i></i>");
        assert_eq!(sniffed.entry, Entry::Fragment);
        assert_eq!(sniffed.charset, None);
    }

    #[test]
    fn test_sniff_structural_tags() {
        assert_eq!(Sniffed::inspect("  <!DOCTYPE html>").entry, Entry::Doctype);
        assert_eq!(Sniffed::inspect("<HTML lang=en>").entry, Entry::Element("html"));
        assert_eq!(Sniffed::inspect("<head>").entry, Entry::Element("head"));
        assert_eq!(Sniffed::inspect("<body\n class=x>").entry, Entry::Element("body"));
        // Not a structural tag
        assert_eq!(Sniffed::inspect("<header></header>").entry, Entry::Fragment);
        assert_eq!(Sniffed::inspect("<bodyx>").entry, Entry::Fragment);
    }

    #[test]
    fn test_sniff_hints() {
        let sniffed = Sniffed::inspect(
            r#"<html><head><meta charset="iso-8859-1"><base href="http://x.com/dir/"></head></html>"#,
        );
        assert_eq!(sniffed.charset.as_deref(), Some("iso-8859-1"));
        assert_eq!(sniffed.base_url.as_deref(), Some("http://x.com/dir/"));
    }

    #[test]
    fn test_hints_ignored_for_fragments() {
        let sniffed = Sniffed::inspect(r#"<base href="http://x.com/"><p></p>"#);
        assert_eq!(sniffed.base_url, None);
    }

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new()
            .with_base_url("http://x.com/")
            .with_charset("UTF-8");
        assert_eq!(options.base_url.as_deref(), Some("http://x.com/"));
        assert_eq!(options.charset.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_wrap_fragment() {
        let wrapped = wrap_fragment("<b>x</b>", "UTF-8");
        assert!(wrapped.starts_with("<!DOCTYPE html><html><head><meta"));
        assert!(wrapped.ends_with("<body><b>x</b></body></html>"));
    }
}
