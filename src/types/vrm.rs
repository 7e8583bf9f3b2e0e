use std::fmt;

use serde::Serialize;

/// Canonical Vehicle Registration Mark: whitespace stripped, uppercased.
///
/// No length or charset checks happen here; the upstream service rejects
/// malformed marks itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vrm(String);

impl Vrm {
    pub fn normalize(raw: &str) -> Self {
        let canonical: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vrm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
