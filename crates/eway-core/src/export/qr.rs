use qrcode::render::unicode::Dense1x2;
use qrcode::{Color, EcLevel, QrCode};

use crate::error::CoreError;
use crate::issuance::encode_payload;
use crate::model::TicketRecord;

/// A QR code over a record's JSON payload, at high error correction.
#[derive(Debug, Clone)]
pub struct QrArtifact {
    payload: String,
    width: usize,
    /// Row-major, `true` for a dark module. No quiet zone.
    modules: Vec<bool>,
    terminal: String,
}

impl QrArtifact {
    /// Encode the full record.
    pub fn for_record(record: &TicketRecord) -> Result<Self, CoreError> {
        Self::from_payload(encode_payload(record)?)
    }

    /// Encode an arbitrary payload string.
    pub fn from_payload(payload: String) -> Result<Self, CoreError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H).map_err(
            |e| CoreError::Export {
                message: format!("QR encoding failed: {e}"),
            },
        )?;
        let terminal = code
            .render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(Self {
            payload,
            width: code.width(),
            modules,
            terminal,
        })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark. Out of range is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width {
            return false;
        }
        self.modules
            .get(y * self.width + x)
            .copied()
            .unwrap_or(false)
    }

    /// Horizontal runs of dark modules as `(row, first_column, length)`.
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if self.is_dark(x, y) {
                    let start = x;
                    while x < self.width && self.is_dark(x, y) {
                        x += 1;
                    }
                    runs.push((y, start, x - start));
                } else {
                    x += 1;
                }
            }
        }
        runs
    }

    /// Half-block rendering for a terminal with a dark background.
    pub fn to_terminal(&self) -> &str {
        &self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finder_pattern_corners_are_dark() {
        let qr = QrArtifact::from_payload("SP12345678".into()).unwrap();
        let w = qr.width();
        assert!(w >= 21);
        assert!(qr.is_dark(0, 0));
        assert!(qr.is_dark(w - 1, 0));
        assert!(qr.is_dark(0, w - 1));
        assert!(!qr.is_dark(w, 0));
    }

    #[test]
    fn runs_cover_every_dark_module() {
        let qr = QrArtifact::from_payload("{\"ticketId\":\"SP1\"}".into()).unwrap();
        let from_runs: usize = qr.dark_runs().iter().map(|(_, _, len)| len).sum();
        let counted = (0..qr.width())
            .flat_map(|y| (0..qr.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| qr.is_dark(x, y))
            .count();
        assert_eq!(from_runs, counted);
    }

    #[test]
    fn terminal_rendering_is_not_empty() {
        let qr = QrArtifact::from_payload("hello".into()).unwrap();
        assert!(qr.to_terminal().lines().count() > 10);
        assert_eq!(qr.payload(), "hello");
    }
}
