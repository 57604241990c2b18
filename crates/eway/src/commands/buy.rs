//! Purchase wizard handler.
//!
//! Flags pre-fill the draft; anything still missing is prompted for step by
//! step, with a back option on every step after the first. Without a
//! terminal (or with `--no-input`) the wizard runs straight through and
//! reports the first blocked step as an error.

use chrono::{Local, NaiveDate};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

use eway_core::attachment::UploadState;
use eway_core::{
    Attachment, AttachmentKind, PassDuration, PaymentMethod, Portal,
    RiderCategory, Station, StepKind, TicketRecord, Wizard, WizardError, encode_payload,
    write_pass_pdf,
};

use crate::cli::{BuyArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{util, verify};

const BACK: &str = "← Back";
const CONTINUE: &str = "Continue";

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(portal: &Portal, args: BuyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let interactive = !args.no_input && util::is_interactive();
    let mut wizard = portal.new_wizard();
    apply_flags(&mut wizard, &args)?;

    loop {
        let record = if interactive {
            run_interactive(&mut wizard, global)?
        } else {
            run_straight(&mut wizard, &args, global)?
        };
        let Some(record) = record else {
            if !global.quiet {
                eprintln!("Purchase cancelled");
            }
            return Ok(());
        };

        deliver(portal, &record, &args, global).await?;

        if !interactive || !ask_book_another()? {
            return Ok(());
        }
        wizard.reset();
    }
}

/// Copy every supplied flag into the draft. Runs before any step advances.
fn apply_flags(wizard: &mut Wizard, args: &BuyArgs) -> Result<(), CliError> {
    if let Some(ref name) = args.name {
        wizard.set_full_name(name.clone())?;
    }
    if let Some(category) = args.category {
        wizard.set_category(category.into())?;
    }
    if let Some(ref path) = args.id_photo {
        wizard.attach(load_attachment(AttachmentKind::IdPhoto, path))?;
    }
    if let Some(ref path) = args.student_doc {
        wizard.attach(load_attachment(AttachmentKind::StudentDocument, path))?;
    }
    if let Some(from) = args.from {
        wizard.set_origin(from.into())?;
    }
    if let Some(to) = args.to {
        wizard.set_destination(to.into())?;
    }
    if let Some(duration) = args.duration {
        wizard.set_duration(duration.into())?;
    }
    if let Some(ref raw) = args.start {
        wizard.set_start_date(util::parse_date("start", raw)?)?;
    }
    if let Some(payment) = args.payment {
        wizard.set_payment(payment.into())?;
    }
    Ok(())
}

fn load_attachment(kind: AttachmentKind, path: &std::path::Path) -> Attachment {
    let mut attachment = Attachment::pending(kind, path);
    attachment.load();
    attachment
}

// ── Non-interactive ─────────────────────────────────────────────────

fn run_straight(
    wizard: &mut Wizard,
    args: &BuyArgs,
    global: &GlobalOpts,
) -> Result<Option<TicketRecord>, CliError> {
    while wizard.kind() < StepKind::Payment {
        wizard.advance()?;
    }
    let payment = wizard
        .draft()
        .payment()
        .ok_or(WizardError::MissingPayment)?;
    let prompt = payment_prompt(wizard, payment);
    if args.no_input && !global.yes {
        return Err(CliError::NonInteractiveRequiresYes { action: prompt });
    }
    if !util::confirm(&prompt, global.yes)? {
        return Ok(None);
    }
    wizard.advance()?;
    Ok(wizard.record().cloned())
}

// ── Interactive ─────────────────────────────────────────────────────

fn run_interactive(
    wizard: &mut Wizard,
    global: &GlobalOpts,
) -> Result<Option<TicketRecord>, CliError> {
    let color = output::should_color(global.color);
    loop {
        let kind = wizard.kind();
        if kind == StepKind::Issued {
            return Ok(wizard.record().cloned());
        }
        eprintln!(
            "\n{}",
            output::heading(&format!("Step {} of 4 · {kind}", kind.number()), color)
        );

        let proceed = match kind {
            StepKind::Details => prompt_details(wizard)?,
            StepKind::RouteAndDuration => prompt_route(wizard)?,
            StepKind::Payment => prompt_payment(wizard, global)?,
            StepKind::Issued => Nav::Continue,
        };

        match proceed {
            Nav::Continue => {
                if let Err(e) = wizard.advance() {
                    warn_blocked(&e, color);
                }
            }
            Nav::Back => {
                wizard.back()?;
            }
            Nav::Stay => {}
        }
    }
}

enum Nav {
    Continue,
    Back,
    Stay,
}

fn warn_blocked(err: &WizardError, color: bool) {
    if color {
        eprintln!("{} {err}", "✗".red().bold());
    } else {
        eprintln!("✗ {err}");
    }
}

fn prompt_details(wizard: &mut Wizard) -> Result<Nav, CliError> {
    let draft = wizard.draft();
    let mut name_input = Input::<String>::new().with_prompt("Full name");
    if !draft.full_name().trim().is_empty() {
        name_input = name_input.default(draft.full_name().to_owned());
    }
    let name = name_input.interact_text().map_err(util::prompt_err)?;
    wizard.set_full_name(name)?;

    let categories: Vec<RiderCategory> = RiderCategory::iter().collect();
    let current = wizard
        .draft()
        .category()
        .and_then(|c| categories.iter().position(|x| *x == c))
        .unwrap_or(0);
    let labels: Vec<String> = categories.iter().map(|c| capitalize(c.as_str())).collect();
    let picked = Select::new()
        .with_prompt("Rider category")
        .items(&labels)
        .default(current)
        .interact()
        .map_err(util::prompt_err)?;
    let category = categories.get(picked).copied().unwrap_or(RiderCategory::Adult);
    wizard.set_category(category)?;

    let kind = AttachmentKind::required_for(category);
    let existing = wizard.draft().attachment(kind);
    let keep = existing.is_some_and(Attachment::is_uploaded)
        && Confirm::new()
            .with_prompt(format!(
                "Keep {} {}?",
                kind,
                existing.map(|a| a.source().display().to_string()).unwrap_or_default()
            ))
            .default(true)
            .interact()
            .map_err(util::prompt_err)?;
    if !keep {
        let path: String = Input::new()
            .with_prompt(format!("Path to your {kind}"))
            .interact_text()
            .map_err(util::prompt_err)?;
        let attachment = load_attachment(kind, std::path::Path::new(path.trim()));
        match attachment.state() {
            UploadState::Uploaded { size, .. } => eprintln!("  ✓ {kind} attached ({size} bytes)"),
            UploadState::Failed { reason } => eprintln!("  ✗ {reason}"),
            UploadState::Pending => {}
        }
        wizard.attach(attachment)?;
    }
    Ok(Nav::Continue)
}

fn prompt_route(wizard: &mut Wizard) -> Result<Nav, CliError> {
    let stations: Vec<Station> = Station::iter().collect();
    let labels: Vec<&str> = stations.iter().map(|s| s.as_str()).collect();
    let index_of = |s: Station| stations.iter().position(|x| *x == s).unwrap_or(0);

    let origin = Select::new()
        .with_prompt("Start location")
        .items(&labels)
        .default(index_of(wizard.draft().origin()))
        .interact()
        .map_err(util::prompt_err)?;
    let destination = Select::new()
        .with_prompt("End location")
        .items(&labels)
        .default(index_of(wizard.draft().destination()))
        .interact()
        .map_err(util::prompt_err)?;
    if let (Some(o), Some(d)) = (stations.get(origin), stations.get(destination)) {
        wizard.set_origin(*o)?;
        wizard.set_destination(*d)?;
    }

    let durations: Vec<PassDuration> = PassDuration::iter().collect();
    let duration_labels = ["1 week", "1 month"];
    let current = durations
        .iter()
        .position(|d| *d == wizard.draft().duration())
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Duration")
        .items(&duration_labels)
        .default(current)
        .interact()
        .map_err(util::prompt_err)?;
    wizard.set_duration(durations.get(picked).copied().unwrap_or_default())?;

    let default_start = wizard
        .draft()
        .start_date()
        .unwrap_or_else(|| Local::now().date_naive());
    let start: String = Input::new()
        .with_prompt("Start date (YYYY-MM-DD)")
        .default(default_start.to_string())
        .validate_with(|s: &String| s.trim().parse::<NaiveDate>().map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .map_err(util::prompt_err)?;
    wizard.set_start_date(util::parse_date("start", &start)?)?;

    let draft = wizard.draft();
    eprintln!(
        "  Valid until {} · {}",
        draft
            .end_date()
            .map_or_else(|| "-".to_owned(), |d| d.to_string()),
        wizard.price()
    );

    nav_select(&[CONTINUE, BACK])
}

fn prompt_payment(wizard: &mut Wizard, global: &GlobalOpts) -> Result<Nav, CliError> {
    let draft = wizard.draft();
    eprintln!(
        "{}",
        output::detail_lines(&[
            ("Name", draft.full_name().trim().to_owned()),
            ("Route", format!("{} → {}", draft.origin(), draft.destination())),
            (
                "Valid",
                match (draft.start_date(), draft.end_date()) {
                    (Some(s), Some(e)) => format!("{s} to {e}"),
                    _ => "-".into(),
                }
            ),
            ("Price", wizard.price().to_string()),
        ])
    );

    let methods: Vec<PaymentMethod> = PaymentMethod::iter().collect();
    let mut labels: Vec<&str> = methods.iter().map(|m| m.label()).collect();
    labels.push(BACK);
    let current = wizard
        .draft()
        .payment()
        .and_then(|p| methods.iter().position(|m| *m == p))
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Payment method")
        .items(&labels)
        .default(current)
        .interact()
        .map_err(util::prompt_err)?;

    let Some(method) = methods.get(picked).copied() else {
        return Ok(Nav::Back);
    };
    wizard.set_payment(method)?;

    if util::confirm(&payment_prompt(wizard, method), global.yes)? {
        Ok(Nav::Continue)
    } else {
        Ok(Nav::Stay)
    }
}

fn nav_select(items: &[&str]) -> Result<Nav, CliError> {
    let picked = Select::new()
        .items(items)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(match items.get(picked) {
        Some(&BACK) => Nav::Back,
        _ => Nav::Continue,
    })
}

fn payment_prompt(wizard: &Wizard, method: PaymentMethod) -> String {
    format!("Pay {} by {}?", wizard.price(), method.label())
}

fn ask_book_another() -> Result<bool, CliError> {
    Confirm::new()
        .with_prompt("Book another pass?")
        .default(false)
        .interact()
        .map_err(util::prompt_err)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

// ── Delivery ────────────────────────────────────────────────────────

/// Show the issued pass, write the requested artifacts, then save it.
async fn deliver(
    portal: &Portal,
    record: &TicketRecord,
    args: &BuyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        record,
        |r| verify::record_detail(r, color),
        |r| r.ticket_id.to_string(),
    );
    output::print_output(&out, global.quiet);

    if global.output == OutputFormat::Table && !global.quiet {
        let qr = eway_core::QrArtifact::for_record(record)?;
        println!("\n{}", qr.to_terminal());
    }

    if let Some(ref path) = args.payload_out {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, encode_payload(record)?)?;
        if !global.quiet {
            eprintln!("✓ Payload written to {}", path.display());
        }
    }

    if let Some(ref dir) = args.pdf_dir {
        let path = write_pass_pdf(record, dir)?;
        if !global.quiet {
            eprintln!("✓ PDF written to {}", path.display());
        }
    }

    if args.offline {
        tracing::info!(ticket_id = %record.ticket_id, "offline purchase; not saved");
        return Ok(());
    }

    // Saving does not require a session; sign in only when we can.
    if portal.config().credentials.is_some() {
        if let Err(e) = util::sign_in(portal, global).await {
            tracing::warn!(error = %e, "sign-in failed, saving pass without a session");
        }
    }
    let pb = output::spinner("Saving pass…", global);
    let result = portal.submit_ticket(record).await;
    pb.finish_and_clear();

    match result {
        Ok(message) => {
            if !global.quiet {
                eprintln!("✓ {message}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "✗ Pass {} was issued but could not be saved",
                record.ticket_id
            );
            Err(e.into())
        }
    }
}
