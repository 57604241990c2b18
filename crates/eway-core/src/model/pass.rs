// ── Pass options ──
//
// Rider category, pass duration and payment method: the small closed
// choices a purchase is made of. Wire spellings match the backend.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Who the pass is for. Students ride at half fare.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiderCategory {
    Adult,
    Student,
}

impl RiderCategory {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// How long the pass runs.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PassDuration {
    #[default]
    Week,
    Month,
}

impl PassDuration {
    /// Fare multiplier over the weekly base fare.
    pub fn multiplier(self) -> u32 {
        match self {
            Self::Week => 1,
            Self::Month => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// How the pass was paid for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethod {
    /// Mobile wallet (eZCash).
    #[serde(rename = "ezcash")]
    #[strum(to_string = "ezcash", serialize = "e-wallet", serialize = "ewallet")]
    EWallet,
    #[serde(rename = "card")]
    #[strum(to_string = "card")]
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Human label used in prompts and receipts.
    pub fn label(self) -> &'static str {
        match self {
            Self::EWallet => "eZCash",
            Self::Card => "Card",
        }
    }
}
