//! Selector input: one selector, or an ordered list of alternatives that are
//! evaluated independently and in order.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alternatives(Vec<String>);

impl Alternatives {
    pub fn new(selectors: Vec<String>) -> Self {
        Alternatives(selectors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The alternatives as one native selector list, for primitives that
    /// take a single comma-separated selector.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<&str> for Alternatives {
    fn from(selector: &str) -> Self {
        Alternatives(vec![selector.to_string()])
    }
}

impl From<String> for Alternatives {
    fn from(selector: String) -> Self {
        Alternatives(vec![selector])
    }
}

impl From<&String> for Alternatives {
    fn from(selector: &String) -> Self {
        Alternatives(vec![selector.clone()])
    }
}

impl From<Vec<String>> for Alternatives {
    fn from(selectors: Vec<String>) -> Self {
        Alternatives(selectors)
    }
}

impl From<Vec<&str>> for Alternatives {
    fn from(selectors: Vec<&str>) -> Self {
        selectors.as_slice().into()
    }
}

impl From<&[&str]> for Alternatives {
    fn from(selectors: &[&str]) -> Self {
        Alternatives(selectors.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Alternatives {
    fn from(selectors: [&str; N]) -> Self {
        selectors.as_slice().into()
    }
}

impl From<&Alternatives> for Alternatives {
    fn from(alternatives: &Alternatives) -> Self {
        alternatives.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_preserve_order() {
        let a: Alternatives = ["a.x", "a.y"].into();
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["a.x", "a.y"]);
        assert_eq!(a.joined(), "a.x, a.y");

        let single: Alternatives = "li".into();
        assert_eq!(single.len(), 1);
        assert!(Alternatives::default().is_empty());
    }
}
