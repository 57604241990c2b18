// ── Station domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A stop the season-pass network serves.
///
/// Passes are only sold between these stations; the serialized form is the
/// capitalized town name used by the backend (`"Colombo"`, `"Galle"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Station {
    Colombo,
    Galle,
    Kandy,
    Kalutara,
}

impl Station {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("colombo".parse::<Station>().ok(), Some(Station::Colombo));
        assert_eq!("KANDY".parse::<Station>().ok(), Some(Station::Kandy));
        assert!("Matara".parse::<Station>().is_err());
    }

    #[test]
    fn serializes_as_town_name() {
        let json = serde_json::to_string(&Station::Kalutara).unwrap();
        assert_eq!(json, "\"Kalutara\"");
        assert_eq!(Station::iter().count(), 4);
    }
}
