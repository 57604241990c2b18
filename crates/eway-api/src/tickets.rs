// Ticket endpoints
//
// Persisting an issued pass and the admin listing of all passes.

use tracing::debug;

use crate::client::BackendClient;
use crate::error::Error;
use crate::models::{AdminTicket, AdminTicketsResponse, StatusResponse, TicketPayload};

impl BackendClient {
    /// Persist an issued ticket.
    ///
    /// `POST /api/saveTicket`
    ///
    /// Succeeds only when the backend acknowledges with `status: success`.
    pub async fn save_ticket(&self, ticket: &TicketPayload) -> Result<StatusResponse, Error> {
        let url = self.endpoint("api/saveTicket")?;
        debug!(ticket_id = %ticket.ticket_id, "saving ticket");

        let resp: StatusResponse = self.post(url, ticket).await?;
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(Error::Rejected {
                message: resp.message_or_status(),
            })
        }
    }

    /// List every ticket known to the backend.
    ///
    /// `GET /admin/tickets`
    pub async fn list_tickets(&self) -> Result<Vec<AdminTicket>, Error> {
        let url = self.endpoint("admin/tickets")?;
        debug!("listing tickets");

        let resp: AdminTicketsResponse = self.get(url).await?;
        if resp.status.eq_ignore_ascii_case("success") {
            Ok(resp.data)
        } else {
            Err(Error::Rejected {
                message: resp
                    .message
                    .unwrap_or_else(|| format!("status={}", resp.status)),
            })
        }
    }
}
