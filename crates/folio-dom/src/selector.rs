//! CSS selectors for querySelector / matches
//!
//! Supports selector lists of compound selectors (`tag`, `*`, `.class`,
//! `#id`, `[attr]`, `[attr=v]`, `[attr^=v]`, `[attr$=v]`, `[attr*=v]`,
//! `[attr~=v]`) joined by descendant or child combinators. Pseudo-classes
//! are rejected.

use crate::{DomError, DomTree, ElementData, NodeId, Result};

/// Attribute match operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
    Includes(String),
}

impl AttrOp {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => value == v,
            AttrOp::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            AttrOp::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            AttrOp::Contains(v) => !v.is_empty() && value.contains(v.as_str()),
            AttrOp::Includes(v) => value.split_whitespace().any(|w| w == v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrSelector {
    name: String,
    op: AttrOp,
}

/// One compound selector, e.g. `a.nav-link[href^="#"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.ids.is_empty() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != elem.tag {
                return false;
            }
        }
        if self.ids.iter().any(|id| elem.id() != Some(id.as_str())) {
            return false;
        }
        if self.classes.iter().any(|c| !elem.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match &a.op {
            AttrOp::Exists => elem.has_attr(&a.name),
            op => elem.attr(&a.name).is_some_and(|value| op.matches(&value)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// A complex selector: compounds joined by combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl Selector {
    /// Check if the element at `node` matches
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.match_at(tree, node, self.compounds.len() - 1)
    }

    fn match_at(&self, tree: &DomTree, node: NodeId, i: usize) -> bool {
        let Some(elem) = tree.element(node) else { return false };
        if !self.compounds[i].matches(elem) {
            return false;
        }
        if i == 0 {
            return true;
        }
        match self.combinators[i - 1] {
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|parent| self.match_at(tree, parent, i - 1)),
            Combinator::Descendant => tree
                .ancestors(node)
                .into_iter()
                .any(|ancestor| self.match_at(tree, ancestor, i - 1)),
        }
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self> {
        Parser::new(input).parse_list()
    }

    /// Check if the element at `node` matches any selector in the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl std::str::FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars().collect(), pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::InvalidSelector { selector: self.source.to_string(), reason: reason.into() }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn parse_list(&mut self) -> Result<SelectorList> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek() == Some(',') {
            self.pos += 1;
            selectors.push(self.parse_selector()?);
        }
        if let Some(c) = self.peek() {
            return Err(self.error(format!("unexpected {c:?}")));
        }
        Ok(SelectorList { selectors })
    }

    fn parse_selector(&mut self) -> Result<Selector> {
        self.skip_whitespace();
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected {c:?}"))),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(Selector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
            compound.tag = Some("*".to_string());
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('#') => {
                    self.pos += 1;
                    compound.ids.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                Some(':') => return Err(self.error("pseudo-classes are not supported")),
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attr(&mut self) -> Result<AttrSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.bump() {
            Some(']') => return Ok(AttrSelector { name, op: AttrOp::Exists }),
            Some('=') => "=",
            Some(c @ ('^' | '$' | '*' | '~')) if self.peek() == Some('=') => {
                self.pos += 1;
                match c {
                    '^' => "^=",
                    '$' => "$=",
                    '*' => "*=",
                    _ => "~=",
                }
            }
            _ => return Err(self.error("malformed attribute selector")),
        };

        self.skip_whitespace();
        let value = self.parse_attr_value()?;
        self.skip_whitespace();
        if self.bump() != Some(']') {
            return Err(self.error("expected ']'"));
        }

        let op = match op {
            "=" => AttrOp::Equals(value),
            "^=" => AttrOp::Prefix(value),
            "$=" => AttrOp::Suffix(value),
            "*=" => AttrOp::Contains(value),
            _ => AttrOp::Includes(value),
        };
        Ok(AttrSelector { name, op })
    }

    fn parse_attr_value(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated string"));
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Ok(value)
            }
            _ => self.parse_ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_link() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let nav = tree.create_element("ul");
        tree.element_mut(nav).unwrap().set_attr("class", "nav-menu");
        let link = tree.create_element("a");
        {
            let elem = tree.element_mut(link).unwrap();
            elem.set_attr("class", "nav-link");
            elem.set_attr("href", "#about");
        }
        tree.append_child(tree.root(), nav);
        tree.append_child(nav, link);
        (tree, nav, link)
    }

    #[test]
    fn test_parse_list() {
        let list = SelectorList::parse(".project-card, .photo-frame").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_attribute_prefix() {
        let (tree, _, link) = tree_with_link();
        assert!(SelectorList::parse(r##"a[href^="#"]"##).unwrap().matches(&tree, link));
        assert!(!SelectorList::parse("a[href^='http']").unwrap().matches(&tree, link));
        assert!(SelectorList::parse("a[href]").unwrap().matches(&tree, link));
        assert!(!SelectorList::parse("a[title]").unwrap().matches(&tree, link));
    }

    #[test]
    fn test_combinators() {
        let (tree, nav, link) = tree_with_link();
        assert!(SelectorList::parse(".nav-menu .nav-link").unwrap().matches(&tree, link));
        assert!(SelectorList::parse("ul > a").unwrap().matches(&tree, link));
        assert!(!SelectorList::parse("a > ul").unwrap().matches(&tree, nav));
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["#", "", ".", "a[href", "a:hover", "a,", "[href^=]"] {
            assert!(SelectorList::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_compound_id_and_class() {
        let mut tree = DomTree::new();
        let section = tree.create_element("section");
        {
            let elem = tree.element_mut(section).unwrap();
            elem.set_attr("id", "projects");
            elem.set_attr("class", "band");
        }
        tree.append_child(tree.root(), section);
        assert!(SelectorList::parse("section[id]").unwrap().matches(&tree, section));
        assert!(SelectorList::parse("#projects.band").unwrap().matches(&tree, section));
        assert!(!SelectorList::parse("#projects.other").unwrap().matches(&tree, section));
    }
}
