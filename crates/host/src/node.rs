//! Defines the contract between the query engine and the tree it searches.
use crate::error::HostError;
use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;

/// The universal contract for a node in a host tree.
///
/// The query engine never walks the tree itself. It is written exclusively
/// against the four native primitives below (scoped single match, scoped
/// multi match, self match, inclusive ancestor match), so any document model
/// that can answer them can be queried with pseudo-selectors.
///
/// Node identity is `Eq + Hash`: two handles compare equal exactly when they
/// refer to the same node. Handles are expected to be cheap to clone.
pub trait HostNode: Debug + Clone + Eq + Hash {
    /// The first descendant of this node (excluding the node itself) that
    /// matches `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Result<Option<Self>, HostError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Every descendant of this node (excluding the node itself) that matches
    /// `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, HostError>;

    /// Whether this node itself matches `selector`.
    fn matches(&self, selector: &str) -> Result<bool, HostError>;

    /// This node or its nearest ancestor matching `selector`.
    fn closest(&self, selector: &str) -> Result<Option<Self>, HostError>;

    /// The concatenated text of every descendant text node.
    fn text_content(&self) -> String;

    /// Stores `value` under `name` on the node.
    fn set_property(&self, name: &str, value: Value);
}
