// ── Admin views ──
//
// Client-side search over the backend's ticket listing.

use eway_api::AdminTicket;

/// Whether `ticket` matches `query` on holder name, username or email.
///
/// Case-insensitive substring match; an empty query matches everything.
pub fn ticket_matches(ticket: &AdminTicket, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&ticket.name, &ticket.username, &ticket.email]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Tickets matching `query`, in listing order.
pub fn filter_tickets<'a>(tickets: &'a [AdminTicket], query: &str) -> Vec<&'a AdminTicket> {
    tickets.iter().filter(|t| ticket_matches(t, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, name: &str, username: &str, email: Option<&str>) -> AdminTicket {
        AdminTicket {
            ticket_id: id.into(),
            name: Some(name.into()),
            username: Some(username.into()),
            email: email.map(Into::into),
            ..AdminTicket::default()
        }
    }

    #[test]
    fn matches_any_identity_field() {
        let tickets = vec![
            ticket("SP1", "Nimal Perera", "nimal", Some("nimal@example.lk")),
            ticket("SP2", "Kamala Silva", "ksilva", None),
            ticket("SP3", "Sunil", "sunil", Some("PERERA.S@mail.lk")),
        ];

        let ids = |q: &str| {
            filter_tickets(&tickets, q)
                .iter()
                .map(|t| t.ticket_id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("perera"), ["SP1", "SP3"]);
        assert_eq!(ids("KSILVA"), ["SP2"]);
        assert_eq!(ids("example.lk"), ["SP1"]);
        assert_eq!(ids("  "), ["SP1", "SP2", "SP3"]);
        assert!(ids("matara").is_empty());
    }

    #[test]
    fn ticket_id_is_not_searched() {
        let t = ticket("SP123", "A", "a", None);
        assert!(!ticket_matches(&t, "SP123"));
    }
}
