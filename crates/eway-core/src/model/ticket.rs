// ── Ticket record ──
//
// The issued pass: what gets encoded into the QR code, printed on the PDF
// and persisted by the backend. Serializes to the backend's camelCase shape.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::pass::{PassDuration, PaymentMethod, RiderCategory};
use super::station::Station;

/// Time-derived ticket identifier, e.g. `SP41234567`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fare in whole rupees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    pub const fn new(rupees: u32) -> Self {
        Self(rupees)
    }

    pub const fn rupees(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "LKR {grouped}")
    }
}

/// Whether a pass is still usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TicketStatus {
    Active,
    Expired,
}

impl TicketStatus {
    /// A pass is usable through its end date and expires the day after.
    pub fn on(end_date: NaiveDate, today: NaiveDate) -> Self {
        if today > end_date {
            Self::Expired
        } else {
            Self::Active
        }
    }
}

/// An issued season pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub ticket_id: TicketId,
    pub name: String,
    #[serde(rename = "type")]
    pub category: RiderCategory,
    pub start_location: Station,
    pub end_location: Station,
    pub duration: PassDuration,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Price,
    pub payment: PaymentMethod,
    pub issued: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: TicketStatus,
    pub created_by: u64,
}

impl TicketRecord {
    /// `Origin → Destination`, as printed on the pass.
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.start_location, self.end_location)
    }

    /// `Valid: <start> to <end>`, as printed on the pass.
    pub fn validity_label(&self) -> String {
        format!("Valid: {} to {}", self.start_date, self.end_date)
    }

    /// Status as of `today`. Never written back into the record.
    pub fn status_on(&self, today: NaiveDate) -> TicketStatus {
        TicketStatus::on(self.end_date, today)
    }

    /// File name of the exported PDF.
    pub fn pdf_file_name(&self) -> String {
        format!("SeasonPass_{}.pdf", self.ticket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn price_display_groups_thousands() {
        assert_eq!(Price::new(750).to_string(), "LKR 750");
        assert_eq!(Price::new(2000).to_string(), "LKR 2,000");
        assert_eq!(Price::new(1_234_567).to_string(), "LKR 1,234,567");
    }

    #[test]
    fn status_flips_the_day_after_end() {
        let end = date("2025-01-21");
        assert_eq!(TicketStatus::on(end, date("2025-01-20")), TicketStatus::Active);
        assert_eq!(TicketStatus::on(end, end), TicketStatus::Active);
        assert_eq!(TicketStatus::on(end, date("2025-01-22")), TicketStatus::Expired);
    }

    #[test]
    fn status_wire_form() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::Expired).unwrap(),
            "\"EXPIRED\""
        );
        assert_eq!("active".parse::<TicketStatus>().ok(), Some(TicketStatus::Active));
    }
}
