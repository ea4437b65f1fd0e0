//! The owner of all query configuration: the token template, the
//! pseudo-selector registry and the provenance side table.

use crate::error::Error;
use crate::session::{Found, Session};
use sieve_host::HostNode;
use sieve_selector::{
    ConditionalRule, Element, Pseudo, PseudoRegistry, QueryEngine, Template, TemplatePatch,
};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Record, per found node, the alternative selector that produced it.
    pub record_provenance: bool,
}

/// Template, registry and provenance for one family of sessions.
///
/// Configuration methods take `&mut self`, so they cannot run while a
/// `Session` or `Found` borrowed from this context is alive. Every query
/// started after a change sees the new configuration.
pub struct Context<N: HostNode> {
    template: Template,
    registry: PseudoRegistry,
    options: ContextOptions,
    provenance: RefCell<HashMap<N, String>>,
}

impl<N: HostNode> Context<N> {
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            template: Template::default(),
            registry: PseudoRegistry::default(),
            options,
            provenance: RefCell::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> ContextOptions {
        self.options
    }

    pub fn set_record_provenance(&mut self, record: bool) {
        self.options.record_provenance = record;
    }

    // --- Template ---

    /// A copy of the current template.
    pub fn template(&self) -> Template {
        self.template.clone()
    }

    pub fn configure(&mut self, patch: TemplatePatch) {
        self.template.apply(patch);
        log::debug!("Template configured: {:?}", self.template);
    }

    /// Applies a JSON `TemplatePatch`, e.g. `{"prefix": "x-"}`. The template
    /// is left untouched if the JSON is malformed.
    pub fn configure_json(&mut self, json: &str) -> Result<(), Error> {
        let patch: TemplatePatch = serde_json::from_str(json)?;
        self.configure(patch);
        Ok(())
    }

    /// Restores the built-in template.
    pub fn reset(&mut self) {
        self.template = Template::default();
    }

    // --- Registry ---

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Box<dyn Pseudo> + 'static,
    {
        self.registry.register(name, factory);
    }

    pub fn register_predicate<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&dyn Element, &str) -> bool + 'static,
    {
        self.registry.register_predicate(name, predicate);
    }

    pub fn registry(&self) -> &PseudoRegistry {
        &self.registry
    }

    // --- Querying ---

    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.template, &self.registry)
    }

    pub fn has_advanced_selector(&self, selector: &str) -> Result<bool, Error> {
        Ok(self.engine().has_advanced_selector(selector)?)
    }

    /// A session rooted at `root`.
    pub fn session(&self, root: N) -> Session<'_, N> {
        Session::new(self, root)
    }

    /// Runs `rule` rooted at `element`; see [`QueryEngine::apply_conditional`].
    pub fn apply_conditional(&self, element: &N, rule: &ConditionalRule) -> Result<bool, Error> {
        Ok(self.engine().apply_conditional(element, rule)?)
    }

    // --- Wrapping ---

    /// Binds `node` to this context. When `selector` is given it is recorded
    /// as the node's provenance, replacing any earlier record.
    pub fn wrap(&self, node: Option<N>, selector: Option<&str>) -> Option<Found<'_, N>> {
        let node = node?;
        if let Some(selector) = selector {
            self.provenance
                .borrow_mut()
                .insert(node.clone(), selector.to_string());
        }
        Some(Found::new(self, node))
    }

    /// The selector last recorded for `node`.
    ///
    /// Records live as long as the context unless cleared with
    /// [`Context::clear_provenance`].
    pub fn provenance(&self, node: &N) -> Option<String> {
        self.provenance.borrow().get(node).cloned()
    }

    /// Forgets every recorded selector. Handles already returned report
    /// `None` until their node is found again.
    pub fn clear_provenance(&self) {
        let dropped = {
            let mut table = self.provenance.borrow_mut();
            let len = table.len();
            table.clear();
            len
        };
        log::debug!("Cleared {} provenance records", dropped);
    }
}

impl<N: HostNode> Default for Context<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_host::{XmlDocument, XmlNode};

    #[test]
    fn test_configure_and_reset() {
        let mut ctx: Context<XmlNode<'_>> = Context::new();
        assert!(ctx.has_advanced_selector(r#"a advanced-selector-contains("x")"#).unwrap());

        ctx.configure(TemplatePatch::default().prefix("custom-"));
        assert_eq!(ctx.template().prefix, "custom-");
        assert!(ctx.has_advanced_selector(r#"a custom-contains("x")"#).unwrap());
        assert!(!ctx.has_advanced_selector(r#"a advanced-selector-contains("x")"#).unwrap());

        ctx.reset();
        assert!(ctx.has_advanced_selector(r#"a advanced-selector-contains("x")"#).unwrap());
        assert_eq!(ctx.template(), Template::default());
    }

    #[test]
    fn test_configure_json() {
        let mut ctx: Context<XmlNode<'_>> = Context::new();
        ctx.configure_json(r#"{"suffix": "!", "valueWrapper": "'"}"#).unwrap();
        assert_eq!(ctx.template().suffix, "!");
        assert_eq!(ctx.template().value_wrapper, "'");

        let err = ctx.configure_json("{prefix").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(ctx.template().suffix, "!");
    }

    #[test]
    fn test_wrap_absent_and_provenance() {
        let doc = XmlDocument::parse("<r><a/></r>").unwrap();
        let ctx = Context::new();
        assert!(ctx.wrap(None, Some("a")).is_none());

        let a = doc.root().query_selector("a").unwrap();
        let found = ctx.wrap(a, Some("a")).unwrap();
        assert_eq!(found.selector().as_deref(), Some("a"));

        ctx.wrap(a, Some("r > a"));
        assert_eq!(found.selector().as_deref(), Some("r > a"));

        ctx.wrap(a, None);
        assert_eq!(found.selector().as_deref(), Some("r > a"));
    }

    #[test]
    fn test_clear_provenance() {
        let doc = XmlDocument::parse("<r><a/><b/></r>").unwrap();
        let ctx = Context::with_options(ContextOptions {
            record_provenance: true,
        });
        let session = ctx.session(doc.root());
        let found = session.query_all(["a", "b"]).unwrap();
        assert_eq!(found[1].selector().as_deref(), Some("b"));

        ctx.clear_provenance();
        assert!(found.iter().all(|f| f.selector().is_none()));

        let again = session.query("b").unwrap().unwrap();
        assert_eq!(again.selector().as_deref(), Some("b"));
    }
}
