use serde::{Deserialize, Serialize};

/// Which source won precedence for a reconciled collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Draft,
    Canonical,
    ExplicitEmpty,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Canonical => "canonical",
            Self::ExplicitEmpty => "explicit-empty",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
