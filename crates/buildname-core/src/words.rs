//! The fixed adjective and noun lists used for codename selection.
//!
//! The lists are the word lists embedded in the `petname` crate. They are an
//! ordered, versioned asset: the pinned crate version fixes both the content
//! and the order of each list, which is what keeps codename selection stable
//! across machines and runs.

use petname::Petnames;

use crate::Error;
use crate::Result;

/// The fixed word lists that codenames are drawn from.
#[derive(Debug, Clone)]
pub struct WordLists {
    /// The embedded petname word lists.
    names: Petnames<'static>,
}

impl WordLists {
    /// Loads the embedded word lists.
    ///
    /// An empty list is a configuration error and is rejected here, at
    /// startup, so that selection itself stays total.
    pub fn embedded() -> Result<Self> {
        let names = Petnames::default();

        if names.adjectives.is_empty() {
            return Err(Error::EmptyWordList("adjective"));
        }

        if names.nouns.is_empty() {
            return Err(Error::EmptyWordList("noun"));
        }

        Ok(Self { names })
    }

    /// Gets the ordered adjective list.
    pub fn adjectives(&self) -> &[&'static str] {
        &self.names.adjectives
    }

    /// Gets the ordered noun list.
    pub fn nouns(&self) -> &[&'static str] {
        &self.names.nouns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lists_are_not_empty() {
        let words = WordLists::embedded().expect("embedded lists should load");
        assert!(!words.adjectives().is_empty());
        assert!(!words.nouns().is_empty());
    }
}
