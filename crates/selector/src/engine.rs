//! The evaluation engine: native candidate discovery, predicate filtering and
//! the ordered-alternative semantics of single and multi queries.

use crate::alternatives::Alternatives;
use crate::builtins::ConditionalRule;
use crate::element::Candidate;
use crate::error::SelectorError;
use crate::parser::{self, ParsedSelector};
use crate::registry::PseudoRegistry;
use crate::template::Template;
use sieve_host::HostNode;
use std::collections::HashSet;

/// A node together with the alternative that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<N> {
    pub node: N,
    pub alternative: String,
}

/// Borrows the template and registry for the duration of a query. Nested
/// queries started by predicates reuse the same engine.
#[derive(Clone, Copy)]
pub struct QueryEngine<'e> {
    template: &'e Template,
    registry: &'e PseudoRegistry,
}

impl<'e> QueryEngine<'e> {
    pub fn new(template: &'e Template, registry: &'e PseudoRegistry) -> Self {
        Self { template, registry }
    }

    pub fn template(&self) -> &'e Template {
        self.template
    }

    pub fn has_advanced_selector(&self, selector: &str) -> Result<bool, SelectorError> {
        parser::has_advanced_selector(selector, self.template)
    }

    pub fn parse(&self, selector: &str) -> Result<ParsedSelector, SelectorError> {
        parser::parse_selector(selector, self.template, self.registry)
    }

    // --- Single selector ---

    /// The first node under `root` matching `selector`, in document order.
    pub fn find_first<N: HostNode>(
        &self,
        root: &N,
        selector: &str,
    ) -> Result<Option<N>, SelectorError> {
        if !self.has_advanced_selector(selector)? {
            log::trace!("Plain selector '{}', delegating to host", selector);
            return Ok(root.query_selector(selector)?);
        }
        let parsed = self.parse(selector)?;
        let candidates = self.candidates(root, &parsed)?;
        Ok(candidates
            .into_iter()
            .find(|candidate| self.retains(candidate, selector, &parsed)))
    }

    /// Every node under `root` matching `selector`, in document order.
    pub fn find_all<N: HostNode>(&self, root: &N, selector: &str) -> Result<Vec<N>, SelectorError> {
        if !self.has_advanced_selector(selector)? {
            log::trace!("Plain selector '{}', delegating to host", selector);
            return Ok(root.query_selector_all(selector)?);
        }
        let parsed = self.parse(selector)?;
        let candidates = self.candidates(root, &parsed)?;
        Ok(candidates
            .into_iter()
            .filter(|candidate| self.retains(candidate, selector, &parsed))
            .collect())
    }

    fn candidates<N: HostNode>(
        &self,
        root: &N,
        parsed: &ParsedSelector,
    ) -> Result<Vec<N>, SelectorError> {
        if parsed.base_selector.is_empty() {
            return Ok(vec![root.clone()]);
        }
        Ok(root.query_selector_all(&parsed.base_selector)?)
    }

    /// Every predicate must hold, evaluated in order and short-circuiting.
    /// A failing predicate excludes the candidate.
    fn retains<N: HostNode>(&self, candidate: &N, selector: &str, parsed: &ParsedSelector) -> bool {
        let element = Candidate::new(candidate, *self);
        parsed.pseudos.iter().enumerate().all(|(i, pseudo)| match pseudo.matches(&element) {
            Ok(true) => true,
            Ok(false) => {
                log::trace!("Predicate {} of '{}' rejected {:?}", i, selector, candidate);
                false
            }
            Err(e) => {
                log::warn!(
                    "Pseudo-selector in '{}' failed on {:?}, excluding it: {}",
                    selector,
                    candidate,
                    e
                );
                false
            }
        })
    }

    // --- Alternatives ---

    /// Tries each alternative in order; the first one that finds anything
    /// decides the result.
    pub fn query<N: HostNode>(
        &self,
        root: &N,
        alternatives: &Alternatives,
    ) -> Result<Option<Match<N>>, SelectorError> {
        for alternative in alternatives.iter() {
            if let Some(node) = self.find_first(root, alternative)? {
                log::debug!("Alternative '{}' matched {:?}", alternative, node);
                return Ok(Some(Match {
                    node,
                    alternative: alternative.to_string(),
                }));
            }
        }
        Ok(None)
    }

    /// Concatenates the results of every alternative, in alternative order,
    /// keeping only the first occurrence of each node. When `greedy` is false
    /// each alternative contributes at most its first match.
    pub fn query_all<N: HostNode>(
        &self,
        root: &N,
        alternatives: &Alternatives,
        greedy: bool,
    ) -> Result<Vec<Match<N>>, SelectorError> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for alternative in alternatives.iter() {
            let found = if greedy {
                self.find_all(root, alternative)?
            } else {
                self.find_first(root, alternative)?.into_iter().collect()
            };
            for node in found {
                if seen.insert(node.clone()) {
                    results.push(Match {
                        node,
                        alternative: alternative.to_string(),
                    });
                }
            }
        }
        Ok(results)
    }

    // --- Conditional mutation ---

    /// Runs `rule.selector` rooted at `element` and stores the `when_match`
    /// or `when_no_match` assignment on `element`. Returns whether the
    /// nested query matched.
    pub fn apply_conditional<N: HostNode>(
        &self,
        element: &N,
        rule: &ConditionalRule,
    ) -> Result<bool, SelectorError> {
        let found = self.find_first(element, &rule.selector)?.is_some();
        let branch = if found {
            &rule.when_match
        } else {
            &rule.when_no_match
        };
        if let Some(assign) = branch {
            log::debug!(
                "Conditional '{}' {} on {:?}: setting '{}'",
                rule.selector,
                if found { "matched" } else { "did not match" },
                element,
                assign.property
            );
            element.set_property(&assign.property, assign.value.clone());
        }
        Ok(found)
    }
}
