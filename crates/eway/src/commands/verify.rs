//! Offline pass handlers: verify a payload, regenerate its PDF.

use chrono::Local;

use eway_core::{PassPdf, QrArtifact, TicketRecord, TicketStatus, decode_payload, verify_payload};

use crate::cli::{ExportArgs, GlobalOpts, VerifyArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// Detail view of a record, as printed after issue and on verification.
pub fn record_detail(record: &TicketRecord, color: bool) -> String {
    output::detail_lines(&[
        ("Ticket ID", record.ticket_id.to_string()),
        ("Name", record.name.clone()),
        ("Category", record.category.to_string()),
        ("Route", record.route_label()),
        ("Duration", record.duration.to_string()),
        ("Valid", format!("{} to {}", record.start_date, record.end_date)),
        ("Price", record.price.to_string()),
        ("Payment", record.payment.label().to_owned()),
        ("Issued", record.issued.to_string()),
        ("Status", output::paint_status(record.status, color)),
    ])
}

pub fn handle(args: &VerifyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let payload = util::read_payload(&args.input)?;
    let today = match args.on.as_deref() {
        Some(raw) => util::parse_date("on", raw)?,
        None => Local::now().date_naive(),
    };

    let verification = verify_payload(&payload, today)?;
    let color = output::should_color(global.color);
    let record = &verification.record;

    let out = output::render_single(
        global.output,
        record,
        |r| {
            let mut text = record_detail(r, color);
            if verification.is_active() {
                let note = if verification.in_window() {
                    format!("{} day(s) remaining", verification.days_remaining())
                } else {
                    format!("starts {}", r.start_date)
                };
                text.push_str(&format!("\n\n{note}"));
            }
            text
        },
        |r| r.status.to_string(),
    );
    output::print_output(&out, global.quiet);

    if record.status == TicketStatus::Expired {
        return Err(CliError::PassExpired {
            ticket_id: record.ticket_id.to_string(),
            end_date: record.end_date.to_string(),
        });
    }
    Ok(())
}

pub fn export(args: &ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let payload = util::read_payload(&args.input)?;
    let record = decode_payload(&payload)?;

    let qr = QrArtifact::for_record(&record)?;
    let path = PassPdf::render(&record, &qr)?.write_to(&args.out)?;

    if args.qr && !global.quiet {
        eprintln!("{}", qr.to_terminal());
    }
    if !global.quiet {
        eprintln!("✓ Wrote {}", path.display());
    }
    Ok(())
}
