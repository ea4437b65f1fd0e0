#![allow(dead_code)]

pub mod fixtures;

use sieve::{Found, HostNode, XmlNode};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Whitespace-normalised text of each found node.
pub fn texts(found: &[Found<'_, XmlNode<'_>>]) -> Vec<String> {
    found
        .iter()
        .map(|f| f.text_content().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}
