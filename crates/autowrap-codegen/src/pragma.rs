//! Compiler warning suppression emitted ahead of generated declarations

use serde::Serialize;
use std::fmt;

/// Warning numbers to disable at the top of a compilation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PragmaWarnings {
    codes: Vec<u32>,
}

impl PragmaWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable a warning; repeated codes are kept once, first position wins
    pub fn disable(&mut self, code: u32) -> &mut Self {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
        self
    }

    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Append the codes of another set that are not present yet
    pub fn extend(&mut self, other: &PragmaWarnings) {
        for &code in &other.codes {
            self.disable(code);
        }
    }
}

impl FromIterator<u32> for PragmaWarnings {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut pragma = Self::new();
        for code in iter {
            pragma.disable(code);
        }
        pragma
    }
}

impl fmt::Display for PragmaWarnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.codes.is_empty() {
            return Ok(());
        }

        let codes: Vec<String> = self.codes.iter().map(u32::to_string).collect();
        write!(f, "#pragma warning disable {}", codes.join(", "))
    }
}
