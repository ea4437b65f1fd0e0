pub mod alternatives;
pub mod builtins;
pub mod element;
pub mod engine;
pub mod error;
pub mod parser;
pub mod registry;
pub mod template;

pub use alternatives::Alternatives;
pub use builtins::{ConditionalRule, PropertyAssignment};
pub use element::{Candidate, Element};
pub use engine::{Match, QueryEngine};
pub use error::SelectorError;
pub use parser::{ParsedSelector, has_advanced_selector, parse_selector};
pub use registry::{Pseudo, PseudoFactory, PseudoRegistry};
pub use template::{Template, TemplatePatch};
