//! Pseudo-selector queries over any host tree.
//!
//! Native selectors are extended with named predicates written as
//! `advanced-selector-<name>("<value>")` (the tokens are configurable), and
//! every found node can be queried again.
//!
//! ```no_run
//! use sieve::{Context, XmlDocument};
//!
//! let doc = XmlDocument::parse("<ul><li>One</li><li>Two</li></ul>").unwrap();
//! let ctx = Context::new();
//! let session = ctx.session(doc.root());
//! let two = session
//!     .query(r#"li advanced-selector-exact("Two")"#)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(two.tag_name(), "li");
//! ```

pub mod context;
pub mod error;
pub mod session;

pub use context::{Context, ContextOptions};
pub use error::Error;
pub use session::{Found, Session};

pub use sieve_host::{HostError, HostNode, XmlDocument, XmlNode};
pub use sieve_selector::{
    Alternatives, ConditionalRule, Element, Match, PropertyAssignment, Pseudo, PseudoRegistry,
    SelectorError, Template, TemplatePatch,
};
