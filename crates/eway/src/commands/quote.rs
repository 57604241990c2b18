//! Fare quote without running the wizard.

use chrono::NaiveDate;
use serde::Serialize;

use eway_core::wizard::Route;
use eway_core::{PassDuration, Price, RiderCategory, Station, ValidityWindow, compute_price};

use crate::cli::{GlobalOpts, QuoteArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct Quote {
    from: Station,
    to: Station,
    duration: PassDuration,
    category: RiderCategory,
    price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

fn detail(q: &Quote) -> String {
    let mut pairs = vec![
        ("Route", format!("{} → {}", q.from, q.to)),
        ("Duration", q.duration.to_string()),
        ("Category", q.category.to_string()),
        ("Price", q.price.to_string()),
    ];
    if let (Some(start), Some(end)) = (q.start_date, q.end_date) {
        pairs.push(("Valid", format!("{start} to {end}")));
    }
    output::detail_lines(&pairs)
}

pub fn handle(args: &QuoteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let from = Station::from(args.from);
    let to = Station::from(args.to);
    // Same rule the wizard enforces before payment.
    Route::new(from, to)?;

    let duration = PassDuration::from(args.duration);
    let category = RiderCategory::from(args.category);

    let window = match args.start.as_deref() {
        Some(raw) => {
            let start = util::parse_date("start", raw)?;
            Some(
                ValidityWindow::starting(start, duration).ok_or_else(|| CliError::Validation {
                    field: "start".into(),
                    reason: format!("no validity window can be computed from {start}"),
                })?,
            )
        }
        None => None,
    };

    let quote = Quote {
        from,
        to,
        duration,
        category,
        price: compute_price(from, to, duration, category),
        start_date: window.map(|w| w.start),
        end_date: window.map(|w| w.end),
    };

    let out = output::render_single(global.output, &quote, detail, |q| {
        q.price.rupees().to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
