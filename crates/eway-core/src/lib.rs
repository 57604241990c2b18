// eway-core: Fares, validity windows and the purchase wizard, plus the
// portal facade that carries issued passes to the backend.

pub mod admin;
pub mod attachment;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod issuance;
pub mod model;
pub mod portal;
pub mod pricing;
pub mod session;
pub mod validity;
pub mod verify;
pub mod wizard;

// ── Primary re-exports ──────────────────────────────────────────────
pub use attachment::{Attachment, AttachmentKind, UploadState};
pub use config::{BackendConfig, Credentials, DEFAULT_BACKEND_URL, DEFAULT_USER_REF};
pub use error::CoreError;
pub use export::{PassPdf, QrArtifact, write_pass_pdf};
pub use issuance::{decode_payload, encode_payload};
pub use portal::{Portal, Role};
pub use pricing::compute_price;
pub use session::{Session, SessionState, UserProfile};
pub use validity::{ValidityWindow, compute_end_date};
pub use verify::{Verification, verify_payload};
pub use wizard::{Step, StepKind, TicketDraft, Wizard, WizardError};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BusRoute, PassDuration, PaymentMethod, Price, RiderCategory, Station, TicketId, TicketRecord,
    TicketStatus,
};

// Wire types consumers print directly.
pub use eway_api::{AdminTicket, DashboardStats};
