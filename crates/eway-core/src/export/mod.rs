// ── Pass artifacts ──
//
// The QR code that carries a record, and the printable PDF built around it.

pub mod pdf;
pub mod qr;

pub use pdf::{PassPdf, write_pass_pdf};
pub use qr::QrArtifact;
