// ── Domain model ──
//
// Canonical types shared by the wizard, the exporters and the CLI.

pub mod pass;
pub mod route;
pub mod station;
pub mod ticket;

pub use pass::{PassDuration, PaymentMethod, RiderCategory};
pub use route::BusRoute;
pub use station::Station;
pub use ticket::{Price, TicketId, TicketRecord, TicketStatus};
