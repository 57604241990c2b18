//! Route catalogue and fare table handlers.

use serde::Serialize;
use tabled::Tabled;

use eway_core::model::route;
use eway_core::pricing::fare_table;
use eway_core::{BusRoute, Station};

use crate::cli::{GlobalOpts, RoutesArgs, RoutesCommand};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "No")]
    route_no: &'static str,
    #[tabled(rename = "Route")]
    name: &'static str,
    #[tabled(rename = "Highway")]
    highway: &'static str,
    #[tabled(rename = "Duration")]
    duration: &'static str,
}

impl From<&BusRoute> for RouteRow {
    fn from(r: &BusRoute) -> Self {
        Self {
            route_no: r.route_no,
            name: r.name,
            highway: r.highway,
            duration: r.duration,
        }
    }
}

#[derive(Serialize)]
struct Fare {
    from: Station,
    to: Station,
    weekly: u32,
}

#[derive(Tabled)]
struct FareRow {
    #[tabled(rename = "From")]
    from: Station,
    #[tabled(rename = "To")]
    to: Station,
    #[tabled(rename = "Week (adult)")]
    weekly: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: RoutesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RoutesCommand::List { search } => {
            let routes: Vec<&BusRoute> = route::search(search.as_deref().unwrap_or(""));
            let out = output::render_list(
                global.output,
                &routes,
                |r| RouteRow::from(*r),
                |r| r.route_no.to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoutesCommand::Fares => {
            let fares: Vec<Fare> = fare_table()
                .map(|(from, to, price)| Fare {
                    from,
                    to,
                    weekly: price.rupees(),
                })
                .collect();
            let out = output::render_list(
                global.output,
                &fares,
                |f| FareRow {
                    from: f.from,
                    to: f.to,
                    weekly: eway_core::Price::new(f.weekly).to_string(),
                },
                |f| format!("{}-{}", f.from, f.to),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
