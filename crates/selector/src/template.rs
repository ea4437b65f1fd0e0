//! The token template that defines pseudo-selector syntax.
//!
//! A pseudo-selector occurrence reads `<prefix><name><suffix>(<wrapper><value><wrapper>)`.
//! Patterns are compiled from the current tokens on every call and never
//! cached, so a configuration change is visible to the very next parse.

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: &str = "advanced-selector-";
pub const DEFAULT_SUFFIX: &str = "";
pub const DEFAULT_VALUE_WRAPPER: &str = "\"";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub prefix: String,
    pub suffix: String,
    pub value_wrapper: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            value_wrapper: DEFAULT_VALUE_WRAPPER.to_string(),
        }
    }
}

/// A partial template. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePatch {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub value_wrapper: Option<String>,
}

impl TemplatePatch {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn value_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.value_wrapper = Some(wrapper.into());
        self
    }
}

impl Template {
    /// Shallow-merges the fields present in `patch`.
    pub fn apply(&mut self, patch: TemplatePatch) {
        if let Some(prefix) = patch.prefix {
            self.prefix = prefix;
        }
        if let Some(suffix) = patch.suffix {
            self.suffix = suffix;
        }
        if let Some(wrapper) = patch.value_wrapper {
            self.value_wrapper = wrapper;
        }
    }

    /// Full occurrence pattern. Group 1 is the name, group 2 the raw
    /// (still escaped) value. The value ends at the first unescaped
    /// `<wrapper>)`.
    pub fn occurrence_pattern(&self) -> Result<Regex, regex::Error> {
        let wrapper = regex::escape(&self.value_wrapper);
        Regex::new(&format!(
            r"{prefix}(\w+){suffix}\({wrapper}((?:\\.|[^\\])*?){wrapper}\)",
            prefix = regex::escape(&self.prefix),
            suffix = regex::escape(&self.suffix),
            wrapper = wrapper,
        ))
    }

    /// Existence gate: matches `<prefix><name><suffix>(` without looking at
    /// the value.
    pub fn gate_pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            r"{}\w+{}\(",
            regex::escape(&self.prefix),
            regex::escape(&self.suffix),
        ))
    }

    /// Resolves `\\` and `\<wrapper>` escapes in a captured value. Any other
    /// backslash is kept verbatim.
    ///
    /// A value that itself carries an escaped wrapper, such as a JSON string
    /// inside a `smuggleIf` payload, needs both characters escaped: `\\\"`
    /// unescapes to `\"`.
    pub fn unescape_value(&self, raw: &str) -> String {
        let wrapper = self.value_wrapper.as_str();
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find('\\') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            if let Some(tail) = after.strip_prefix('\\') {
                out.push('\\');
                rest = tail;
            } else if !wrapper.is_empty()
                && let Some(tail) = after.strip_prefix(wrapper)
            {
                out.push_str(wrapper);
                rest = tail;
            } else {
                out.push('\\');
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }
}
