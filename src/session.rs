//! Sessions rooted at a node, and the wrapped results they return.

use crate::context::Context;
use crate::error::Error;
use sieve_host::HostNode;
use sieve_selector::{Alternatives, ConditionalRule, Match};
use std::fmt;
use std::ops::Deref;

/// Queries scoped to one root node.
///
/// `query` is the primary operation; [`Session::as_fn`] turns a session into
/// a plain closure for call sites that want to invoke it directly.
pub struct Session<'c, N: HostNode> {
    ctx: &'c Context<N>,
    root: N,
}

impl<'c, N: HostNode> Session<'c, N> {
    pub(crate) fn new(ctx: &'c Context<N>, root: N) -> Self {
        Self { ctx, root }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    /// The first match of the first alternative that matches anything.
    pub fn query(&self, selectors: impl Into<Alternatives>) -> Result<Option<Found<'c, N>>, Error> {
        let alternatives = selectors.into();
        let found = self.ctx.engine().query(&self.root, &alternatives)?;
        Ok(found.and_then(|m| self.wrap_match(m)))
    }

    /// All matches of every alternative, de-duplicated.
    pub fn query_all(&self, selectors: impl Into<Alternatives>) -> Result<Vec<Found<'c, N>>, Error> {
        self.query_all_with(selectors, true)
    }

    /// Like [`Session::query_all`]; with `greedy` false each alternative
    /// contributes at most its first match.
    pub fn query_all_with(
        &self,
        selectors: impl Into<Alternatives>,
        greedy: bool,
    ) -> Result<Vec<Found<'c, N>>, Error> {
        let alternatives = selectors.into();
        let matches = self.ctx.engine().query_all(&self.root, &alternatives, greedy)?;
        Ok(matches
            .into_iter()
            .filter_map(|m| self.wrap_match(m))
            .collect())
    }

    /// The root or its nearest ancestor matching any alternative. The
    /// alternatives are joined into one native selector list; pseudo-selectors
    /// are not supported here.
    pub fn closest(&self, selectors: impl Into<Alternatives>) -> Result<Option<Found<'c, N>>, Error> {
        let alternatives = selectors.into();
        if alternatives.is_empty() {
            return Ok(None);
        }
        let joined = alternatives.joined();
        let node = self.root.closest(&joined)?;
        Ok(self.ctx.wrap(node, self.provenance_for(&joined)))
    }

    /// Runs `rule` rooted at this session's root.
    pub fn apply_conditional(&self, rule: &ConditionalRule) -> Result<bool, Error> {
        self.ctx.apply_conditional(&self.root, rule)
    }

    /// A closure equivalent to calling [`Session::query`] with one selector.
    pub fn as_fn(&self) -> impl Fn(&str) -> Result<Option<Found<'c, N>>, Error> + '_ {
        move |selector: &str| self.query(selector)
    }

    fn wrap_match(&self, m: Match<N>) -> Option<Found<'c, N>> {
        self.ctx.wrap(Some(m.node), self.provenance_for(&m.alternative))
    }

    fn provenance_for<'s>(&self, selector: &'s str) -> Option<&'s str> {
        self.ctx.options().record_provenance.then_some(selector)
    }
}

/// A found node bound to the context that found it.
///
/// Dereferences to the node itself, and can start new queries rooted at it.
pub struct Found<'c, N: HostNode> {
    ctx: &'c Context<N>,
    node: N,
}

impl<'c, N: HostNode> Found<'c, N> {
    pub(crate) fn new(ctx: &'c Context<N>, node: N) -> Self {
        Self { ctx, node }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn into_node(self) -> N {
        self.node
    }

    /// The alternative that most recently produced this node, when
    /// provenance recording is enabled.
    pub fn selector(&self) -> Option<String> {
        self.ctx.provenance(&self.node)
    }

    /// A session rooted at this node.
    pub fn session(&self) -> Session<'c, N> {
        self.ctx.session(self.node.clone())
    }

    pub fn query(&self, selectors: impl Into<Alternatives>) -> Result<Option<Found<'c, N>>, Error> {
        self.session().query(selectors)
    }

    pub fn query_all(&self, selectors: impl Into<Alternatives>) -> Result<Vec<Found<'c, N>>, Error> {
        self.session().query_all(selectors)
    }

    pub fn query_all_with(
        &self,
        selectors: impl Into<Alternatives>,
        greedy: bool,
    ) -> Result<Vec<Found<'c, N>>, Error> {
        self.session().query_all_with(selectors, greedy)
    }

    pub fn closest(&self, selectors: impl Into<Alternatives>) -> Result<Option<Found<'c, N>>, Error> {
        self.session().closest(selectors)
    }

    pub fn apply_conditional(&self, rule: &ConditionalRule) -> Result<bool, Error> {
        self.ctx.apply_conditional(&self.node, rule)
    }
}

impl<'c, N: HostNode> Deref for Found<'c, N> {
    type Target = N;

    fn deref(&self) -> &N {
        &self.node
    }
}

impl<'c, N: HostNode> Clone for Found<'c, N> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx,
            node: self.node.clone(),
        }
    }
}

impl<'c, N: HostNode> PartialEq for Found<'c, N> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<'c, N: HostNode> fmt::Debug for Found<'c, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Found")
            .field("node", &self.node)
            .field("selector", &self.selector())
            .finish()
    }
}
