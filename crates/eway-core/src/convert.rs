// ── Domain → wire conversion ──
//
// The backend takes plain strings where the domain has enums and dates.

use eway_api::TicketPayload;

use crate::model::TicketRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl From<&TicketRecord> for TicketPayload {
    fn from(r: &TicketRecord) -> Self {
        Self {
            ticket_id: r.ticket_id.to_string(),
            name: r.name.clone(),
            rider_type: r.category.as_str().to_owned(),
            start_location: r.start_location.as_str().to_owned(),
            end_location: r.end_location.as_str().to_owned(),
            duration: r.duration.as_str().to_owned(),
            start_date: r.start_date.format(DATE_FORMAT).to_string(),
            end_date: r.end_date.format(DATE_FORMAT).to_string(),
            price: r.price.rupees(),
            payment: r.payment.as_str().to_owned(),
            issued: r.issued.format(DATE_FORMAT).to_string(),
            valid_until: r.valid_until.format(DATE_FORMAT).to_string(),
            status: r.status.to_string(),
            created_by: r.created_by,
        }
    }
}
