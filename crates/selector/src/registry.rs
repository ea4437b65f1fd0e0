//! The registry of pseudo-selector names.

use crate::builtins;
use crate::element::Element;
use crate::error::SelectorError;
use std::collections::HashMap;
use std::rc::Rc;

/// A predicate instantiated from one pseudo-selector occurrence.
pub trait Pseudo {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError>;
}

/// Builds a predicate from the occurrence's (unescaped) argument.
pub type PseudoFactory = Box<dyn Fn(&str) -> Box<dyn Pseudo>>;

/// Maps pseudo-selector names to predicate factories.
///
/// Entries can be overwritten by registering the same name again; they are
/// never removed.
pub struct PseudoRegistry {
    factories: HashMap<String, PseudoFactory>,
}

impl PseudoRegistry {
    /// An empty registry, without the built-ins.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Box<dyn Pseudo> + 'static,
    {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            log::warn!(
                "Pseudo-selector '{}' contains non-word characters and can never be matched by the parser",
                name
            );
        }
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            log::debug!("Pseudo-selector '{}' re-registered", name);
        }
    }

    /// Registers a plain predicate over the element and the argument.
    pub fn register_predicate<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&dyn Element, &str) -> bool + 'static,
    {
        let predicate: Rc<dyn Fn(&dyn Element, &str) -> bool> = Rc::new(predicate);
        self.register(name, move |argument: &str| {
            Box::new(FnPseudo {
                argument: argument.to_string(),
                predicate: Rc::clone(&predicate),
            }) as Box<dyn Pseudo>
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiates the predicate registered under `name`, if any.
    pub fn create(&self, name: &str, argument: &str) -> Option<Box<dyn Pseudo>> {
        self.factories.get(name).map(|factory| factory(argument))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PseudoRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }
}

struct FnPseudo {
    argument: String,
    predicate: Rc<dyn Fn(&dyn Element, &str) -> bool>,
}

impl Pseudo for FnPseudo {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        Ok((self.predicate)(element, &self.argument))
    }
}
