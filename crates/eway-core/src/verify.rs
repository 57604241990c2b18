// ── Pass verification ──
//
// Reading a scanned QR payload back and judging it against today's date.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::CoreError;
use crate::issuance::decode_payload;
use crate::model::{TicketRecord, TicketStatus};
use crate::validity::ValidityWindow;

/// Outcome of checking a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// The record as encoded, with `status` recomputed for `checked_on`.
    pub record: TicketRecord,
    /// The status stored in the payload at issue time.
    pub issued_status: TicketStatus,
    pub checked_on: NaiveDate,
}

impl Verification {
    pub fn is_active(&self) -> bool {
        self.record.status == TicketStatus::Active
    }

    /// Days of validity left, counting today. Zero once expired.
    pub fn days_remaining(&self) -> i64 {
        ((self.record.end_date - self.checked_on).num_days() + 1).max(0)
    }

    pub fn window(&self) -> ValidityWindow {
        ValidityWindow {
            start: self.record.start_date,
            end: self.record.end_date,
        }
    }

    /// True when the pass is inside its window, not merely before its end.
    pub fn in_window(&self) -> bool {
        self.window().contains(self.checked_on)
    }
}

/// Decode `payload` and recompute its status as of `today`.
pub fn verify_payload(payload: &str, today: NaiveDate) -> Result<Verification, CoreError> {
    let mut record = decode_payload(payload)?;
    let issued_status = record.status;
    record.status = record.status_on(today);
    debug!(
        ticket_id = %record.ticket_id,
        status = %record.status,
        "payload verified"
    );
    Ok(Verification {
        record,
        issued_status,
        checked_on: today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuance::encode_payload;
    use crate::model::{
        PassDuration, PaymentMethod, Price, RiderCategory, Station, TicketId,
    };
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record() -> TicketRecord {
        TicketRecord {
            ticket_id: TicketId::new("SP12345678"),
            name: "Nimal Perera".into(),
            category: RiderCategory::Student,
            start_location: Station::Kandy,
            end_location: Station::Kalutara,
            duration: PassDuration::Month,
            start_date: date("2025-01-15"),
            end_date: date("2025-02-14"),
            price: Price::new(3400),
            payment: PaymentMethod::EWallet,
            issued: date("2025-01-10"),
            valid_until: date("2025-02-14"),
            status: TicketStatus::Active,
            created_by: 7,
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let payload = encode_payload(&record()).unwrap();
        let v = verify_payload(&payload, date("2025-01-20")).unwrap();
        assert_eq!(v.record, record());
        assert!(v.is_active());
        assert!(v.in_window());
        assert_eq!(v.days_remaining(), 26);
    }

    #[test]
    fn status_is_recomputed_not_trusted() {
        let payload = encode_payload(&record()).unwrap();

        let v = verify_payload(&payload, date("2025-02-14")).unwrap();
        assert_eq!(v.record.status, TicketStatus::Active);
        assert_eq!(v.days_remaining(), 1);

        let v = verify_payload(&payload, date("2025-02-15")).unwrap();
        assert_eq!(v.record.status, TicketStatus::Expired);
        assert_eq!(v.issued_status, TicketStatus::Active);
        assert_eq!(v.days_remaining(), 0);

        let mut rest = v.record.clone();
        rest.status = TicketStatus::Active;
        assert_eq!(rest, record());
    }

    #[test]
    fn not_started_yet_is_still_active() {
        let payload = encode_payload(&record()).unwrap();
        let v = verify_payload(&payload, date("2025-01-12")).unwrap();
        assert!(v.is_active());
        assert!(!v.in_window());
    }

    #[test]
    fn window_covers_both_end_dates() {
        let payload = encode_payload(&record()).unwrap();

        let first = verify_payload(&payload, date("2025-01-15")).unwrap();
        assert_eq!(first.window().days(), 31);
        assert!(first.in_window());

        let last = verify_payload(&payload, date("2025-02-14")).unwrap();
        assert!(last.in_window());

        let after = verify_payload(&payload, date("2025-02-15")).unwrap();
        assert!(!after.in_window());
    }

    #[test]
    fn reads_backend_wire_shape() {
        let payload = r#"{
            "ticketId": "SP00000042", "name": "A", "type": "adult",
            "startLocation": "Colombo", "endLocation": "Galle", "duration": "week",
            "startDate": "2025-01-15", "endDate": "2025-01-21", "price": 2000,
            "payment": "card", "issued": "2025-01-10", "validUntil": "2025-01-21",
            "status": "ACTIVE", "createdBy": 1
        }"#;
        let v = verify_payload(payload, date("2025-03-01")).unwrap();
        assert_eq!(v.record.ticket_id.as_str(), "SP00000042");
        assert_eq!(v.record.status, TicketStatus::Expired);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            verify_payload("SP12345678", date("2025-01-01")),
            Err(CoreError::InvalidPayload { .. })
        ));
    }
}
