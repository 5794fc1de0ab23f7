//! Selector components and per-element matching
//!
//! Simple selectors, attribute matchers and pseudo-classes, matched against
//! an element of a [`DomTree`] through [`ElementContext`].

use fos_dom::{DomTree, ElementData, NodeData, NodeId};

/// Form-associated elements that carry enabled/disabled state
const FORM_ELEMENTS: &[&str] = &[
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
];

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Link / input pseudo-classes
    Link,
    Enabled,
    Disabled,
    Checked,

    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical pseudo-classes
    Not(Vec<CompoundSelector>),
    Is(Vec<CompoundSelector>),
    Where(Vec<CompoundSelector>),
}

impl PseudoClass {
    /// Look up an argument-less pseudo-class by name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "link" => Self::Link,
            "enabled" => Self::Enabled,
            "disabled" => Self::Disabled,
            "checked" => Self::Checked,
            "root" => Self::Root,
            "empty" => Self::Empty,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "first-of-type" => Self::FirstOfType,
            "last-of-type" => Self::LastOfType,
            "only-of-type" => Self::OnlyOfType,
            _ => return None,
        })
    }
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        // Try to parse as simple number
        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        // Parse An+B format
        let s = s.replace(' ', "");

        let n_pos = s.find('n')?;
        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        // Widened so extreme offsets like n-2147483648 cannot overflow
        let a = i64::from(self.a);
        let diff = i64::from(n) - i64::from(self.b);
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :nth-child(), etc.
    PseudoClass(PseudoClass),
}

/// Sequence of simple selectors without combinators (`a.b[c]:d`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Every component must match
    pub fn matches(&self, element: &ElementContext<'_>) -> bool {
        self.components
            .iter()
            .all(|component| match_component(component, element))
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (_, None) => return false,
            (None, Some(_)) => return true, // [attr] - just check existence
            (Some(matcher), Some(value)) => (matcher, value),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

/// Element context for selector matching
///
/// Sibling positions are derived from the tree on demand.
pub struct ElementContext<'a> {
    pub tree: &'a DomTree,
    pub id: NodeId,
    pub element: &'a ElementData,
}

impl<'a> ElementContext<'a> {
    /// Build a context if `id` names an element
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        let element = tree.get(id)?.as_element()?;
        Some(Self { tree, id, element })
    }

    /// Tag name
    pub fn tag_name(&self) -> &str {
        &self.element.name
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element.get_attr(name)
    }

    /// Element siblings (self included), in document order
    fn element_siblings(&self) -> Vec<(NodeId, &'a str)> {
        let Some(parent) = self.tree.parent(self.id) else {
            return vec![(self.id, self.element.name.as_str())];
        };
        self.tree
            .children(parent)
            .filter_map(|(id, node)| node.as_element().map(|e| (id, e.name.as_str())))
            .collect()
    }

    /// (1-based index, count) among element siblings
    fn sibling_position(&self, same_type: bool) -> (usize, usize) {
        let siblings: Vec<NodeId> = self
            .element_siblings()
            .into_iter()
            .filter(|(_, name)| !same_type || name.eq_ignore_ascii_case(self.tag_name()))
            .map(|(id, _)| id)
            .collect();
        let index = siblings
            .iter()
            .position(|&id| id == self.id)
            .map_or(1, |p| p + 1);
        (index, siblings.len().max(1))
    }

    fn is_root(&self) -> bool {
        match self.tree.parent(self.id).and_then(|p| self.tree.get(p)) {
            Some(parent) => !parent.is_element(),
            None => true,
        }
    }

    fn is_empty(&self) -> bool {
        self.tree.children(self.id).all(|(_, child)| match &child.data {
            NodeData::Element(_) => false,
            NodeData::Text(text) => text.content.is_empty(),
            _ => true,
        })
    }
}

/// Match a selector component against an element
pub fn match_component(component: &SelectorComponent, element: &ElementContext<'_>) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => element.tag_name().eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => element.attribute("id") == Some(id.as_str()),
        SelectorComponent::Class(class) => element
            .attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
        SelectorComponent::Attribute(attr) => attr.matches(element.attribute(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(pseudo, element),
    }
}

/// Match a pseudo-class against an element
pub fn match_pseudo_class(pseudo: &PseudoClass, element: &ElementContext<'_>) -> bool {
    let tag = element.tag_name();
    match pseudo {
        PseudoClass::Link => {
            ["a", "area", "link"].iter().any(|t| tag.eq_ignore_ascii_case(t))
                && element.attribute("href").is_some()
        }
        PseudoClass::Enabled => {
            FORM_ELEMENTS.iter().any(|t| tag.eq_ignore_ascii_case(t))
                && element.attribute("disabled").is_none()
        }
        PseudoClass::Disabled => {
            FORM_ELEMENTS.iter().any(|t| tag.eq_ignore_ascii_case(t))
                && element.attribute("disabled").is_some()
        }
        PseudoClass::Checked => {
            if tag.eq_ignore_ascii_case("option") {
                return element.attribute("selected").is_some();
            }
            tag.eq_ignore_ascii_case("input")
                && element.attribute("checked").is_some()
                && element
                    .attribute("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio"))
        }

        // Tree-structural pseudo-classes
        PseudoClass::Root => element.is_root(),
        PseudoClass::Empty => element.is_empty(),
        PseudoClass::FirstChild => element.sibling_position(false).0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = element.sibling_position(false);
            index == count
        }
        PseudoClass::OnlyChild => element.sibling_position(false).1 == 1,
        PseudoClass::FirstOfType => element.sibling_position(true).0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = element.sibling_position(true);
            index == count
        }
        PseudoClass::OnlyOfType => element.sibling_position(true).1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(element.sibling_position(false).0 as i32),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = element.sibling_position(false);
            expr.matches((count - index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => expr.matches(element.sibling_position(true).0 as i32),
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = element.sibling_position(true);
            expr.matches((count - index + 1) as i32)
        }

        // Logical pseudo-classes
        PseudoClass::Not(selectors) => !selectors.iter().any(|s| s.matches(element)),
        PseudoClass::Is(selectors) | PseudoClass::Where(selectors) => {
            selectors.iter().any(|s| s.matches(element))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::NodeOperations;

    #[test]
    fn test_nth_expression_odd() {
        let expr = NthExpression::odd();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
        assert!(expr.matches(5));
    }

    #[test]
    fn test_nth_expression_even() {
        let expr = NthExpression::even();
        assert!(!expr.matches(1));
        assert!(expr.matches(2));
        assert!(!expr.matches(3));
        assert!(expr.matches(4));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse("even"), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n"), Some(NthExpression::new(2, 0)));
        assert_eq!(NthExpression::parse("2n+1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("2n 1"), None);
        assert_eq!(NthExpression::parse("x"), None);
    }

    #[test]
    fn test_nth_extreme_offsets() {
        // Every index lies past i32::MIN
        assert!(NthExpression::new(1, i32::MIN).matches(1));
        assert!(NthExpression::new(2, i32::MIN).matches(2));
        assert!(!NthExpression::new(2, i32::MIN).matches(1));
        assert!(!NthExpression::new(-1, i32::MIN).matches(1));
        assert!(NthExpression::new(-1, i32::MAX).matches(1));
        assert_eq!(
            NthExpression::parse("n-2147483648"),
            Some(NthExpression::new(1, i32::MIN))
        );
    }

    #[test]
    fn test_nth_expression_negative_coefficient() {
        let expr = NthExpression::new(-1, 3);
        assert!(expr.matches(1));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(Some("password")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_prefix() {
        let sel = AttributeSelector {
            name: "class".to_string(),
            matcher: Some(AttributeMatcher::Prefix("btn-".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("btn-primary")));
        assert!(sel.matches(Some("btn-secondary")));
        assert!(!sel.matches(Some("button")));
    }

    #[test]
    fn test_attribute_selector_case_insensitive() {
        let sel = AttributeSelector {
            name: "lang".to_string(),
            matcher: Some(AttributeMatcher::DashMatch("EN".to_string())),
            case_insensitive: true,
        };
        assert!(sel.matches(Some("en-US")));
        assert!(sel.matches(Some("en")));
        assert!(!sel.matches(Some("english")));
    }

    #[test]
    fn test_structural_positions() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        tree.append_child(tree.root(), ul).unwrap();
        let items: Vec<NodeId> = (0..3)
            .map(|_| {
                let li = tree.create_element("li");
                tree.append_child(ul, li).unwrap();
                li
            })
            .collect();

        let first = ElementContext::new(&tree, items[0]).unwrap();
        let last = ElementContext::new(&tree, items[2]).unwrap();
        assert!(match_pseudo_class(&PseudoClass::FirstChild, &first));
        assert!(!match_pseudo_class(&PseudoClass::FirstChild, &last));
        assert!(match_pseudo_class(&PseudoClass::LastOfType, &last));
        assert!(match_pseudo_class(&PseudoClass::Empty, &first));

        let root = ElementContext::new(&tree, ul).unwrap();
        assert!(match_pseudo_class(&PseudoClass::Root, &root));
        assert!(!match_pseudo_class(&PseudoClass::Root, &first));
    }

    #[test]
    fn test_class_and_id() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "class", " a  b ").unwrap();
        tree.set_attribute(div, "id", "main").unwrap();
        let ctx = ElementContext::new(&tree, div).unwrap();

        assert!(match_component(&SelectorComponent::Class("b".into()), &ctx));
        assert!(!match_component(&SelectorComponent::Class("c".into()), &ctx));
        assert!(match_component(&SelectorComponent::Id("main".into()), &ctx));
        assert!(match_component(&SelectorComponent::Type("DIV".into()), &ctx));
    }

    #[test]
    fn test_pseudo_class_names() {
        assert_eq!(PseudoClass::from_name("First-Child"), Some(PseudoClass::FirstChild));
        assert_eq!(PseudoClass::from_name("hover"), None);
    }
}
