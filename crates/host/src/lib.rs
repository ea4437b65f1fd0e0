pub mod error;
pub mod native;
pub mod node;
pub mod xml;

pub use error::HostError;
pub use native::SelectorList;
pub use node::HostNode;
pub use xml::{XmlDocument, XmlNode};
