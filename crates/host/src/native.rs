//! A `nom`-based parser and matcher for the small native selector subset the
//! XML host understands.
//!
//! Supported syntax: type and universal selectors, `#id`, `.class`, attribute
//! tests (`[a]`, `[a=v]`, `[a~=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]`), the
//! descendant and child (`>`) combinators, and comma-separated lists.

use crate::error::HostError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrTest {
    Exists,
    Equals(String),
    Includes(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
}

impl AttrTest {
    fn accepts(&self, actual: &str) -> bool {
        match self {
            AttrTest::Exists => true,
            AttrTest::Equals(v) => actual == v,
            AttrTest::Includes(v) => actual.split_whitespace().any(|word| word == v),
            AttrTest::Prefix(v) => !v.is_empty() && actual.starts_with(v.as_str()),
            AttrTest::Suffix(v) => !v.is_empty() && actual.ends_with(v.as_str()),
            AttrTest::Substring(v) => !v.is_empty() && actual.contains(v.as_str()),
        }
    }
}

/// A sequence of simple selectors with no combinator, e.g. `a.nav[href]`.
/// A `tag` of `None` is the universal selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, AttrTest)>,
}

impl Compound {
    fn matches(&self, node: roxmltree::Node<'_, '_>) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag
            && node.tag_name().name() != tag
        {
            return false;
        }
        if self
            .ids
            .iter()
            .any(|id| node.attribute("id") != Some(id.as_str()))
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = node.attribute("class").unwrap_or("");
            let has_all = self
                .classes
                .iter()
                .all(|class| class_attr.split_whitespace().any(|c| c == class));
            if !has_all {
                return false;
            }
        }
        self.attrs.iter().all(|(name, test)| {
            node.attribute(name.as_str())
                .is_some_and(|actual| test.accepts(actual))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators. `combinators[i]` sits between
/// `parts[i]` and `parts[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complex {
    pub parts: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

impl Complex {
    fn matches(&self, node: roxmltree::Node<'_, '_>) -> bool {
        let last = self.parts.len() - 1;
        self.parts[last].matches(node) && self.matches_left_of(last, node)
    }

    // Right-to-left with backtracking over descendant combinators.
    fn matches_left_of(&self, idx: usize, node: roxmltree::Node<'_, '_>) -> bool {
        if idx == 0 {
            return true;
        }
        let prev = &self.parts[idx - 1];
        match self.combinators[idx - 1] {
            Combinator::Child => node
                .parent_element()
                .is_some_and(|parent| prev.matches(parent) && self.matches_left_of(idx - 1, parent)),
            Combinator::Descendant => node
                .ancestors()
                .skip(1)
                .filter(|a| a.is_element())
                .any(|a| prev.matches(a) && self.matches_left_of(idx - 1, a)),
        }
    }
}

/// A parsed, comma-separated native selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Complex>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, HostError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(HostError::invalid(input, "empty selector"));
        }
        match selector_list(trimmed) {
            Ok(("", complexes)) => Ok(SelectorList(complexes)),
            Ok((rest, _)) => Err(HostError::invalid(
                input,
                format!("unexpected input at '{}'", rest),
            )),
            Err(e) => Err(HostError::invalid(input, e.to_string())),
        }
    }

    /// Whether `node` is an element matching any selector in the list.
    pub fn matches(&self, node: roxmltree::Node<'_, '_>) -> bool {
        node.is_element() && self.0.iter().any(|complex| complex.matches(node))
    }
}

// --- Grammar ---

enum Simple {
    Id(String),
    Class(String),
    Attr(String, AttrTest),
}

#[derive(Clone, Copy)]
enum AttrOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_').parse(input)
}

fn selector_list(input: &str) -> IResult<&str, Vec<Complex>> {
    separated_list1(delimited(multispace0, char(','), multispace0), complex).parse(input)
}

fn complex(input: &str) -> IResult<&str, Complex> {
    let (input, head) = compound(input)?;
    let (input, tail) = many0(pair(combinator, compound)).parse(input)?;

    let mut parts = vec![head];
    let mut combinators = Vec::with_capacity(tail.len());
    for (comb, part) in tail {
        combinators.push(comb);
        parts.push(part);
    }
    Ok((input, Complex { parts, combinators }))
}

fn combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        value(
            Combinator::Child,
            delimited(multispace0, char('>'), multispace0),
        ),
        value(Combinator::Descendant, multispace1),
    ))
    .parse(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (rest, (type_sel, simples)) = pair(opt(type_selector), many0(simple)).parse(input)?;
    if type_sel.is_none() && simples.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let mut compound = Compound {
        tag: type_sel.flatten(),
        ..Default::default()
    };
    for s in simples {
        match s {
            Simple::Id(id) => compound.ids.push(id),
            Simple::Class(class) => compound.classes.push(class),
            Simple::Attr(name, test) => compound.attrs.push((name, test)),
        }
    }
    Ok((rest, compound))
}

fn type_selector(input: &str) -> IResult<&str, Option<String>> {
    alt((
        value(None, char('*')),
        map(ident, |name: &str| Some(name.to_string())),
    ))
    .parse(input)
}

fn simple(input: &str) -> IResult<&str, Simple> {
    alt((
        map(preceded(char('#'), ident), |id: &str| Simple::Id(id.to_string())),
        map(preceded(char('.'), ident), |class: &str| {
            Simple::Class(class.to_string())
        }),
        attribute,
    ))
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, Simple> {
    let (input, _) = char('[').parse(input)?;
    let (input, name) = delimited(multispace0, ident, multispace0).parse(input)?;
    let (input, op) = opt(pair(
        attr_operator,
        delimited(multispace0, attr_value, multispace0),
    ))
    .parse(input)?;
    let (input, _) = char(']').parse(input)?;

    let test = match op {
        None => AttrTest::Exists,
        Some((op, v)) => {
            let v = v.to_string();
            match op {
                AttrOp::Equals => AttrTest::Equals(v),
                AttrOp::Includes => AttrTest::Includes(v),
                AttrOp::Prefix => AttrTest::Prefix(v),
                AttrOp::Suffix => AttrTest::Suffix(v),
                AttrOp::Substring => AttrTest::Substring(v),
            }
        }
    };
    Ok((input, Simple::Attr(name.to_string(), test)))
}

fn attr_operator(input: &str) -> IResult<&str, AttrOp> {
    alt((
        value(AttrOp::Equals, tag("=")),
        value(AttrOp::Includes, tag("~=")),
        value(AttrOp::Prefix, tag("^=")),
        value(AttrOp::Suffix, tag("$=")),
        value(AttrOp::Substring, tag("*=")),
    ))
    .parse(input)
}

fn attr_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        ident,
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_element<'a, 'i>(doc: &'a roxmltree::Document<'i>, tag: &str) -> roxmltree::Node<'a, 'i> {
        doc.descendants()
            .find(|n| n.has_tag_name(tag))
            .unwrap()
    }

    #[test]
    fn test_parse_compound_parts() {
        let list = SelectorList::parse("a.nav.main#home[href^='/docs']").unwrap();
        assert_eq!(list.0.len(), 1);
        let compound = &list.0[0].parts[0];
        assert_eq!(compound.tag.as_deref(), Some("a"));
        assert_eq!(compound.classes, vec!["nav", "main"]);
        assert_eq!(compound.ids, vec!["home"]);
        assert_eq!(
            compound.attrs,
            vec![("href".to_string(), AttrTest::Prefix("/docs".to_string()))]
        );
    }

    #[test]
    fn test_parse_combinators_and_lists() {
        let list = SelectorList::parse("ul > li a, p  span").unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(
            list.0[0].combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
        assert_eq!(list.0[1].combinators, vec![Combinator::Descendant]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse("a,").is_err());
        assert!(SelectorList::parse("a ::before").is_err());
        assert!(SelectorList::parse("div[").is_err());
    }

    #[test]
    fn test_matching_against_tree() {
        let doc = roxmltree::Document::parse(
            r#"<root><ul class="menu"><li id="one"><a href="/x">X</a></li></ul><p><a>Y</a></p></root>"#,
        )
        .unwrap();
        let anchor = first_element(&doc, "a");

        assert!(SelectorList::parse("a").unwrap().matches(anchor));
        assert!(SelectorList::parse("ul.menu a").unwrap().matches(anchor));
        assert!(SelectorList::parse("li#one > a[href]").unwrap().matches(anchor));
        assert!(SelectorList::parse("root a").unwrap().matches(anchor));
        assert!(!SelectorList::parse("ul > a").unwrap().matches(anchor));
        assert!(!SelectorList::parse("p a").unwrap().matches(anchor));
        assert!(SelectorList::parse("p a, li a").unwrap().matches(anchor));
    }
}
