//! Administrator views: dashboard counters and the ticket listing.

use tabled::Tabled;

use eway_core::{AdminTicket, DashboardStats, Portal, Role};

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Ticket ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    rider_type: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "User")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl TicketRow {
    fn new(t: &AdminTicket, color: bool) -> Self {
        Self {
            id: t.ticket_id.clone(),
            name: t.name.clone().unwrap_or_default(),
            rider_type: t.rider_type.clone().unwrap_or_default(),
            route: t.route.clone().unwrap_or_default(),
            price: t.price.map(|p| format!("{p:.0}")).unwrap_or_default(),
            status: t
                .status
                .as_deref()
                .map(|s| output::paint_status_str(s, color))
                .unwrap_or_default(),
            username: t.username.clone().unwrap_or_default(),
            email: t.email.clone().unwrap_or_default(),
        }
    }
}

fn stats_detail(s: &DashboardStats) -> String {
    output::detail_lines(&[
        ("Total users", s.total_users.to_string()),
        ("Active users", s.active_users.to_string()),
        ("Total orders", s.total_orders.to_string()),
        ("Revenue", format!("LKR {:.2}", s.revenue)),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(portal: &Portal, args: AdminArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if util::sign_in(portal, global).await? != Role::Admin {
        tracing::warn!("signed-in account is not an administrator; the backend may refuse");
    }

    match args.command {
        AdminCommand::Stats => {
            let pb = output::spinner("Fetching dashboard…", global);
            let result = portal.stats().await;
            pb.finish_and_clear();
            let stats = result?;

            let out = output::render_single(global.output, &stats, stats_detail, |s| {
                s.total_orders.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Tickets { search } => {
            let pb = output::spinner("Fetching tickets…", global);
            let result = portal.tickets(search.as_deref()).await;
            pb.finish_and_clear();
            let tickets = result?;

            let color = output::should_color(global.color);
            let out = output::render_list(
                global.output,
                &tickets,
                |t| TicketRow::new(t, color),
                |t| t.ticket_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
