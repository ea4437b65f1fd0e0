//! The element view handed to pseudo-selector predicates.
//!
//! Predicates are registered once and evaluated against any host, so they see
//! candidates through the object-safe `Element` trait instead of the concrete
//! node type. Nested queries issued through the view go back through the same
//! engine (and therefore the same template and registry) as the outer query.

use crate::builtins::ConditionalRule;
use crate::engine::QueryEngine;
use crate::error::SelectorError;
use serde_json::Value;
use sieve_host::HostNode;

pub trait Element {
    fn text_content(&self) -> String;

    /// Native self match.
    fn matches(&self, selector: &str) -> Result<bool, SelectorError>;

    /// Native inclusive ancestor match.
    fn has_closest(&self, selector: &str) -> Result<bool, SelectorError>;

    /// Whether a query rooted at this element, pseudo-selectors included,
    /// finds anything.
    fn has_match(&self, selector: &str) -> Result<bool, SelectorError>;

    /// See [`QueryEngine::apply_conditional`].
    fn apply_conditional(&self, rule: &ConditionalRule) -> Result<bool, SelectorError>;

    fn set_property(&self, name: &str, value: Value);
}

/// A host node bound to the engine evaluating it.
pub struct Candidate<'e, N: HostNode> {
    node: &'e N,
    engine: QueryEngine<'e>,
}

impl<'e, N: HostNode> Candidate<'e, N> {
    pub fn new(node: &'e N, engine: QueryEngine<'e>) -> Self {
        Self { node, engine }
    }
}

impl<'e, N: HostNode> Element for Candidate<'e, N> {
    fn text_content(&self) -> String {
        self.node.text_content()
    }

    fn matches(&self, selector: &str) -> Result<bool, SelectorError> {
        Ok(self.node.matches(selector)?)
    }

    fn has_closest(&self, selector: &str) -> Result<bool, SelectorError> {
        Ok(self.node.closest(selector)?.is_some())
    }

    fn has_match(&self, selector: &str) -> Result<bool, SelectorError> {
        Ok(self.engine.find_first(self.node, selector)?.is_some())
    }

    fn apply_conditional(&self, rule: &ConditionalRule) -> Result<bool, SelectorError> {
        self.engine.apply_conditional(self.node, rule)
    }

    fn set_property(&self, name: &str, value: Value) {
        self.node.set_property(name, value);
    }
}
