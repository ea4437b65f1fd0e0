//! Built-in pseudo-selectors.

use crate::element::Element;
use crate::error::SelectorError;
use crate::registry::{Pseudo, PseudoRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn register_all(registry: &mut PseudoRegistry) {
    // Text
    registry.register("contains", |arg: &str| {
        Box::new(Contains(arg.to_lowercase())) as Box<dyn Pseudo>
    });
    registry.register("containsAny", |arg: &str| {
        Box::new(ContainsAny::new(arg)) as Box<dyn Pseudo>
    });
    registry.register("exact", |arg: &str| {
        Box::new(Exact(arg.trim().to_string())) as Box<dyn Pseudo>
    });
    registry.register("startsWith", |arg: &str| {
        Box::new(StartsWith(arg.to_lowercase())) as Box<dyn Pseudo>
    });
    registry.register("endsWith", |arg: &str| {
        Box::new(EndsWith(arg.to_lowercase())) as Box<dyn Pseudo>
    });
    // Structure
    registry.register("self", |arg: &str| {
        Box::new(SelfMatches(arg.to_string())) as Box<dyn Pseudo>
    });
    registry.register("closest", |arg: &str| {
        Box::new(Closest(arg.to_string())) as Box<dyn Pseudo>
    });
    // Side effects
    registry.register("smuggleIf", |arg: &str| {
        Box::new(SmuggleIf(arg.to_string())) as Box<dyn Pseudo>
    });
}

// --- Text predicates ---

struct Contains(String);

impl Pseudo for Contains {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        Ok(element.text_content().to_lowercase().contains(&self.0))
    }
}

struct ContainsAny(Vec<String>);

impl ContainsAny {
    fn new(arg: &str) -> Self {
        ContainsAny(
            arg.split(',')
                .map(|part| part.trim().to_lowercase())
                .filter(|part| !part.is_empty())
                .collect(),
        )
    }
}

impl Pseudo for ContainsAny {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        let text = element.text_content().to_lowercase();
        Ok(self.0.iter().any(|needle| text.contains(needle.as_str())))
    }
}

struct Exact(String);

impl Pseudo for Exact {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        Ok(element.text_content().trim() == self.0)
    }
}

struct StartsWith(String);

impl Pseudo for StartsWith {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        Ok(element
            .text_content()
            .trim()
            .to_lowercase()
            .starts_with(&self.0))
    }
}

struct EndsWith(String);

impl Pseudo for EndsWith {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        Ok(element.text_content().trim().to_lowercase().ends_with(&self.0))
    }
}

// --- Structural predicates ---

struct SelfMatches(String);

impl Pseudo for SelfMatches {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        element.matches(&self.0)
    }
}

struct Closest(String);

impl Pseudo for Closest {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        element.has_closest(&self.0)
    }
}

// --- Conditional mutation ---

/// One `property = value` assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAssignment {
    pub property: String,
    pub value: Value,
}

/// Runs `selector` rooted at an element and applies `when_match` or
/// `when_no_match` to that element depending on the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub selector: String,
    #[serde(default)]
    pub when_match: Option<PropertyAssignment>,
    #[serde(default)]
    pub when_no_match: Option<PropertyAssignment>,
}

impl ConditionalRule {
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Applies a `ConditionalRule` given as JSON and never matches, so the
/// element is always excluded from the result.
///
/// The payload is unescaped before it is read as JSON, so a JSON-escaped
/// quote in a nested selector is written `\\\"` in the selector string.
struct SmuggleIf(String);

impl Pseudo for SmuggleIf {
    fn matches(&self, element: &dyn Element) -> Result<bool, SelectorError> {
        let rule = ConditionalRule::from_json(&self.0).map_err(|e| SelectorError::Payload {
            pseudo: "smuggleIf".to_string(),
            message: e.to_string(),
        })?;
        element.apply_conditional(&rule)?;
        Ok(false)
    }
}
