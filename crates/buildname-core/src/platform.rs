//! The closed set of target platforms a build name is produced for.

use serde::Serialize;
use strum::Display;
use strum::IntoStaticStr;
use strum::VariantArray;

/// A target platform.
///
/// Every pipeline run produces one fully substituted build name per variant;
/// the variants do not affect each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr, VariantArray,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Nintendo Switch.
    NX,

    /// Windows PC.
    PC,

    /// PlayStation 4.
    PS4,

    /// PlayStation 5.
    PS5,

    /// Xbox One.
    XB1,

    /// Xbox Series.
    XBS,
}

impl Platform {
    /// Gets the literal tag substituted for `{platform}`.
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Gets the name of this platform's output value.
    pub fn output_key(&self) -> String {
        self.tag().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn six_fixed_variants() {
        assert_eq!(Platform::VARIANTS.len(), 6);
    }

    #[test]
    fn tags_match_the_substituted_literals() {
        let tags: Vec<_> = Platform::VARIANTS.iter().map(Platform::tag).collect();
        assert_eq!(tags, ["NX", "PC", "PS4", "PS5", "XB1", "XBS"]);
    }
}
