use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, EnumIter, EnumString};
use tracing::warn;

use crate::normalize::fold_text;

/// Skill proficiency, ordered BASICO < INTERMEDIO < AVANZADO < EXPERTO.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProficiencyLevel {
    #[default]
    Basico,
    Intermedio,
    Avanzado,
    Experto,
}

impl ProficiencyLevel {
    pub fn satisfies(self, minimum: ProficiencyLevel) -> bool {
        self >= minimum
    }

    /// Strict parse after folding case and accents ("básico" → BASICO).
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_str(&fold_text(raw).to_uppercase()).ok()
    }

    /// Lenient parse for boundary code: unknown strings become the lowest
    /// level and are reported as a data-quality warning.
    pub fn parse_or_lowest(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            warn!(raw_level = raw, "unknown proficiency level, treating as BASICO");
            ProficiencyLevel::Basico
        })
    }
}

impl Serialize for ProficiencyLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for ProficiencyLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_lowest(&raw))
    }
}
