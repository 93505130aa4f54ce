//! Ignore rules for directory upload
//!
//! Rules are given as a comma-separated list of regular expressions and
//! matched against the relative file name, anchored at the start only
//! (prefix match, not full-string match). The first matching rule wins.

use regex::Regex;

use crate::error::Result;

/// An ordered set of compiled ignore patterns
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    rules: Vec<Regex>,
}

impl IgnoreRules {
    /// Compile a comma-separated pattern list.
    ///
    /// Fails on the first invalid pattern.
    pub fn parse(patterns: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for pattern in patterns.split(',') {
            rules.push(Regex::new(&format!(r"\A(?:{pattern})"))?);
        }
        Ok(Self { rules })
    }

    /// Whether any rule matches the start of `name`
    pub fn matched(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(name))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
