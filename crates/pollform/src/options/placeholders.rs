//! Example values shown as greyed-out hints in option inputs.

use serde::{Deserialize, Serialize};

const DEFAULT_PLACEHOLDERS: &[&str] = &[
    "New York", "Paris", "London", "Tokyo", "Jakarta", "Berlin", "Munich", "Montreal",
];

/// An ordered, read-only list of placeholder strings.
///
/// Looked up positionally by the option count at creation time. Lookups
/// past the end yield the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderList {
    entries: Vec<String>,
}

impl PlaceholderList {
    /// Create a list from any sequence of strings.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// A list with no entries: every lookup yields "".
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The placeholder for the option at 0-based `index`, or "" past the end.
    pub fn get(&self, index: usize) -> &str {
        self.entries.get(index).map_or("", String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for PlaceholderList {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDERS.iter().copied())
    }
}
