// ── Fare calculation ──
//
// Weekly base fares between station pairs, scaled by pass duration and
// halved for students. Pure: every call recomputes from its inputs.

use crate::model::{PassDuration, Price, RiderCategory, Station};

/// Weekly fare for any pair missing from [`FARE_TABLE`].
pub const DEFAULT_WEEKLY_FARE: u32 = 1500;

/// Undirected weekly base fares in rupees.
const FARE_TABLE: &[(Station, Station, u32)] = &[
    (Station::Colombo, Station::Galle, 2000),
    (Station::Colombo, Station::Kandy, 1800),
    (Station::Colombo, Station::Kalutara, 1000),
    (Station::Galle, Station::Kandy, 2200),
    (Station::Galle, Station::Kalutara, 1500),
    (Station::Kandy, Station::Kalutara, 1700),
];

/// Weekly base fare between two stations, in either direction.
pub fn weekly_fare(a: Station, b: Station) -> u32 {
    FARE_TABLE
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map_or(DEFAULT_WEEKLY_FARE, |(_, _, fare)| *fare)
}

/// Every listed pair with its weekly fare, in table order.
pub fn fare_table() -> impl Iterator<Item = (Station, Station, Price)> {
    FARE_TABLE
        .iter()
        .map(|(a, b, fare)| (*a, *b, Price::new(*fare)))
}

/// Price of a pass.
///
/// Base fares are even, so the student half fare is always whole rupees.
pub fn compute_price(
    origin: Station,
    destination: Station,
    duration: PassDuration,
    category: RiderCategory,
) -> Price {
    let full = weekly_fare(origin, destination) * duration.multiplier();
    match category {
        RiderCategory::Adult => Price::new(full),
        RiderCategory::Student => Price::new(full / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn pairs() -> impl Iterator<Item = (Station, Station)> {
        Station::iter().flat_map(|a| Station::iter().map(move |b| (a, b)))
    }

    #[test]
    fn fares_are_symmetric() {
        for (a, b) in pairs() {
            assert_eq!(weekly_fare(a, b), weekly_fare(b, a), "{a} <-> {b}");
        }
    }

    #[test]
    fn month_is_four_weeks() {
        for (a, b) in pairs() {
            for category in RiderCategory::iter() {
                let week = compute_price(a, b, PassDuration::Week, category);
                let month = compute_price(a, b, PassDuration::Month, category);
                assert_eq!(month.rupees(), 4 * week.rupees());
            }
        }
    }

    #[test]
    fn student_pays_half() {
        for (a, b) in pairs() {
            for duration in PassDuration::iter() {
                let adult = compute_price(a, b, duration, RiderCategory::Adult);
                let student = compute_price(a, b, duration, RiderCategory::Student);
                assert_eq!(student.rupees() * 2, adult.rupees());
            }
        }
    }

    #[test]
    fn colombo_galle_examples() {
        assert_eq!(
            compute_price(
                Station::Colombo,
                Station::Galle,
                PassDuration::Week,
                RiderCategory::Adult
            ),
            Price::new(2000)
        );
        assert_eq!(
            compute_price(
                Station::Colombo,
                Station::Galle,
                PassDuration::Month,
                RiderCategory::Student
            ),
            Price::new(4000)
        );
    }

    #[test]
    fn unlisted_pair_uses_default() {
        assert_eq!(weekly_fare(Station::Kandy, Station::Kandy), DEFAULT_WEEKLY_FARE);
        assert_eq!(weekly_fare(Station::Kalutara, Station::Galle), 1500);
        assert_eq!(fare_table().count(), 6);
    }
}
