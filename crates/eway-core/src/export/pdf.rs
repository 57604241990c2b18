// Printable pass: a 70 × 110 mm card with the holder's name, route,
// validity, ticket id and the QR code drawn as vector shapes.

use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};
use tracing::info;

use super::qr::QrArtifact;
use crate::error::CoreError;
use crate::model::TicketRecord;

const PAGE_WIDTH: f32 = 70.0;
const PAGE_HEIGHT: f32 = 110.0;
const MARGIN: f32 = 6.0;
const HEADER_HEIGHT: f32 = 16.0;
const QR_SIZE: f32 = 44.0;
const QR_TOP: f32 = 76.0;

/// A rendered pass, ready to write.
#[derive(Debug, Clone)]
pub struct PassPdf {
    file_name: String,
    bytes: Vec<u8>,
}

impl PassPdf {
    /// Lay out the pass for `record` around its QR code.
    pub fn render(record: &TicketRecord, qr: &QrArtifact) -> Result<Self, CoreError> {
        let (doc, page, layer) = PdfDocument::new(
            format!("eWay Season Pass {}", record.ticket_id),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "pass",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        // Header band
        layer.set_fill_color(brand());
        fill_rect(
            &layer,
            0.0,
            PAGE_HEIGHT - HEADER_HEIGHT,
            PAGE_WIDTH,
            HEADER_HEIGHT,
        );
        layer.set_fill_color(white());
        layer.use_text("eWay Bus", 14.0, Mm(MARGIN), Mm(PAGE_HEIGHT - 8.0), &bold);
        layer.use_text(
            "Season Pass",
            9.0,
            Mm(MARGIN),
            Mm(PAGE_HEIGHT - 13.0),
            &regular,
        );

        // Holder and route
        layer.set_fill_color(ink());
        layer.use_text(record.name.as_str(), 13.0, Mm(MARGIN), Mm(87.0), &bold);
        layer.use_text(
            format!("{} - {}", record.start_location, record.end_location),
            10.0,
            Mm(MARGIN),
            Mm(81.0),
            &regular,
        );

        draw_qr(&layer, qr);

        // Validity sits below the code, never over it.
        layer.use_text(record.validity_label(), 9.0, Mm(MARGIN), Mm(24.0), &regular);
        text_line(
            &layer,
            &bold,
            format!("Ticket ID: {}", record.ticket_id),
            17.0,
        );
        text_line(
            &layer,
            &regular,
            format!(
                "{} / {} / {}",
                record.category,
                record.duration,
                record.price
            ),
            11.0,
        );

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        Ok(Self {
            file_name: record.pdf_file_name(),
            bytes,
        })
    }

    /// `SeasonPass_<ticketId>.pdf`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write into `dir` under [`Self::file_name`], returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), size = self.bytes.len(), "pass PDF written");
        Ok(path)
    }
}

/// Render and write the pass for `record` into `dir`.
pub fn write_pass_pdf(record: &TicketRecord, dir: &Path) -> Result<PathBuf, CoreError> {
    let qr = QrArtifact::for_record(record)?;
    PassPdf::render(record, &qr)?.write_to(dir)
}

fn text_line(layer: &PdfLayerReference, font: &IndirectFontRef, text: String, y: f32) {
    layer.use_text(text, 9.0, Mm(MARGIN), Mm(y), font);
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn draw_qr(layer: &PdfLayerReference, qr: &QrArtifact) {
    let width = qr.width();
    if width == 0 {
        return;
    }
    let module = QR_SIZE / width as f32;
    let left = (PAGE_WIDTH - QR_SIZE) / 2.0;

    layer.set_fill_color(ink());
    for (row, col, len) in qr.dark_runs() {
        let x = left + col as f32 * module;
        let top = QR_TOP - row as f32 * module;
        fill_rect(layer, x, top - module, len as f32 * module, module);
    }
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32) {
    let corner = |px: f32, py: f32| (Point::new(Mm(px), Mm(py)), false);
    layer.add_polygon(Polygon {
        rings: vec![vec![
            corner(x, y),
            corner(x + w, y),
            corner(x + w, y + h),
            corner(x, y + h),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn brand() -> Color {
    Color::Rgb(Rgb::new(0.05, 0.36, 0.69, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn ink() -> Color {
    Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None))
}

#[allow(clippy::needless_pass_by_value)]
fn pdf_error(e: printpdf::Error) -> CoreError {
    CoreError::Export {
        message: format!("PDF rendering failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        PassDuration, PaymentMethod, Price, RiderCategory, Station, TicketId, TicketStatus,
    };

    fn record() -> TicketRecord {
        let d = |s: &str| s.parse().unwrap();
        TicketRecord {
            ticket_id: TicketId::new("SP00000042"),
            name: "Nimal Perera".into(),
            category: RiderCategory::Adult,
            start_location: Station::Colombo,
            end_location: Station::Galle,
            duration: PassDuration::Week,
            start_date: d("2025-01-15"),
            end_date: d("2025-01-21"),
            price: Price::new(2000),
            payment: PaymentMethod::Card,
            issued: d("2025-01-10"),
            valid_until: d("2025-01-21"),
            status: TicketStatus::Active,
            created_by: 1,
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let record = record();
        let qr = QrArtifact::for_record(&record).unwrap();
        let pdf = PassPdf::render(&record, &qr).unwrap();
        assert!(pdf.bytes().starts_with(b"%PDF"));
        assert_eq!(pdf.file_name(), "SeasonPass_SP00000042.pdf");
    }

    #[test]
    fn writes_named_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("passes");
        let path = write_pass_pdf(&record(), &target).unwrap();

        assert_eq!(path, target.join("SeasonPass_SP00000042.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
