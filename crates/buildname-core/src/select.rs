//! Deterministic selection of an adjective and a noun for a build name.
//!
//! Selection is a pure function of the input string and the word lists: the
//! same input yields the same pair on any platform, any run, any time zone.
//! No randomness, clock, or stored state is involved; downstream systems key
//! artifacts by the resulting codename and rely on independent runs over the
//! same commit reproducing it.

use crate::words::WordLists;

/// The FNV-1a 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// The FNV-1a 32-bit prime.
const FNV_PRIME: u32 = 0x0100_0193;

/// Computes the 32-bit FNV-1a hash of a byte string.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Selects one adjective and one noun for the given input string.
///
/// The adjective index comes from a hash of the input. The noun index comes
/// from a second full hash pass over the input extended with the adjective
/// index, so that the two selections stay statistically independent even for
/// short inputs or list lengths sharing a common factor.
pub fn select_words<'w>(words: &'w WordLists, input: &str) -> (&'w str, &'w str) {
    let adjectives = words.adjectives();
    let nouns = words.nouns();

    let h = fnv1a(input.as_bytes());
    let adjective_index = h as usize % adjectives.len();

    let h2 = fnv1a(format!("{input}:{adjective_index}").as_bytes());
    let noun_index = h2 as usize % nouns.len();

    (adjectives[adjective_index], nouns[noun_index])
}
