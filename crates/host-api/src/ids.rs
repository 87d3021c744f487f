//! Opaque identifiers and offer-id generation.
//!
//! The host keys every trader, item template, and sale offer by an opaque
//! string id. Plugins never invent offer ids themselves: they receive an
//! [`IdGenerator`] from the host and must treat the produced ids as
//! collision-free. A colliding id would corrupt the host's lookup tables,
//! which is why [`crate::AssortTable`] rejects duplicates outright.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies a trader in the host database and config objects.
    TraderId
);

string_id!(
    /// References an item template (a sellable item kind, or a currency).
    ///
    /// Template ids are never validated here; whether a template exists is
    /// the host's concern.
    TemplateId
);

string_id!(
    /// Identifies one sale offer inside a trader's assort.
    OfferId
);

/// Source of fresh offer ids.
///
/// The host's implementation must never repeat an id within the process
/// lifetime.
pub trait IdGenerator {
    fn next_id(&mut self) -> OfferId;
}

/// Default generator: SHA-256 over a seed and a monotonic counter,
/// truncated to the host's 24-hex-char id format.
pub struct Sha2IdGenerator {
    seed: u64,
    counter: u64,
}

impl Sha2IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }
}

impl Default for Sha2IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl IdGenerator for Sha2IdGenerator {
    fn next_id(&mut self) -> OfferId {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;

        let digest = hasher.finalize();
        OfferId::new(&hex::encode(digest)[..24])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let mut ids = Sha2IdGenerator::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id()), "generator repeated an id");
        }
    }

    #[test]
    fn generated_ids_match_host_format() {
        let mut ids = Sha2IdGenerator::default();
        let id = ids.next_id();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn seeds_produce_distinct_streams() {
        let a = Sha2IdGenerator::new(1).next_id();
        let b = Sha2IdGenerator::new(2).next_id();
        assert_ne!(a, b);
    }
}
