// ── Record issuance ──
//
// Turning a completed purchase into a `TicketRecord`, and the QR payload
// that carries it.

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::CoreError;
use crate::model::{PaymentMethod, TicketId, TicketRecord, TicketStatus};
use crate::wizard::{Passenger, Trip};

/// `"SP"` followed by the last eight digits of the Unix millisecond clock.
///
/// Unique enough for one rider clicking through one wizard; not a
/// collision-free identifier.
pub fn ticket_id_at(now: DateTime<Local>) -> TicketId {
    let millis = now.timestamp_millis().rem_euclid(100_000_000);
    TicketId::new(format!("SP{millis:08}"))
}

/// Assemble the record for a purchase completed at `now`.
pub fn issue_record(
    passenger: &Passenger,
    trip: &Trip,
    payment: PaymentMethod,
    created_by: u64,
    now: DateTime<Local>,
) -> TicketRecord {
    let window = trip.window();
    let record = TicketRecord {
        ticket_id: ticket_id_at(now),
        name: passenger.name().to_owned(),
        category: passenger.category(),
        start_location: trip.route().origin(),
        end_location: trip.route().destination(),
        duration: trip.duration(),
        start_date: window.start,
        end_date: window.end,
        price: trip.price(),
        payment,
        issued: now.date_naive(),
        valid_until: window.end,
        status: TicketStatus::Active,
        created_by,
    };
    info!(
        ticket_id = %record.ticket_id,
        route = %record.route_label(),
        price = record.price.rupees(),
        "season pass issued"
    );
    record
}

/// Compact JSON encoded into the QR code and sent to the backend.
pub fn encode_payload(record: &TicketRecord) -> Result<String, CoreError> {
    serde_json::to_string(record).map_err(|e| CoreError::Internal(format!("encode payload: {e}")))
}

/// Parse a QR payload back into a record.
pub fn decode_payload(payload: &str) -> Result<TicketRecord, CoreError> {
    serde_json::from_str(payload.trim()).map_err(|e| CoreError::InvalidPayload {
        message: e.to_string(),
    })
}
