//! Splits a selector string into its native base selector and the ordered
//! pseudo-selector predicates embedded in it.

use crate::error::SelectorError;
use crate::registry::{Pseudo, PseudoRegistry};
use crate::template::Template;
use std::fmt;

pub struct ParsedSelector {
    /// What remains after every occurrence is removed, trimmed. Empty means
    /// "the context element itself".
    pub base_selector: String,
    /// Predicates in left-to-right order of appearance.
    pub pseudos: Vec<Box<dyn Pseudo>>,
}

impl fmt::Debug for ParsedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedSelector")
            .field("base_selector", &self.base_selector)
            .field("pseudos", &self.pseudos.len())
            .finish()
    }
}

/// Cheap dispatch gate: looks for `<prefix><name><suffix>(` only. It accepts
/// every string the full parser would reduce and may accept some it cannot.
pub fn has_advanced_selector(selector: &str, template: &Template) -> Result<bool, SelectorError> {
    Ok(template.gate_pattern()?.is_match(selector))
}

pub fn parse_selector(
    selector: &str,
    template: &Template,
    registry: &PseudoRegistry,
) -> Result<ParsedSelector, SelectorError> {
    let pattern = template.occurrence_pattern()?;

    let mut pseudos = Vec::new();
    for caps in pattern.captures_iter(selector) {
        let name = &caps[1];
        let argument = template.unescape_value(&caps[2]);
        match registry.create(name, &argument) {
            Some(pseudo) => pseudos.push(pseudo),
            None => log::warn!(
                "Unknown pseudo-selector '{}' in '{}', ignoring it",
                name,
                selector
            ),
        }
    }

    let base_selector = pattern.replace_all(selector, "").trim().to_string();
    Ok(ParsedSelector {
        base_selector,
        pseudos,
    })
}
