// ── Route catalogue ──
//
// Highway bus routes advertised to riders. Static for now; the backend
// has no route endpoint.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusRoute {
    pub id: u32,
    /// Public route number, e.g. "Route 100".
    pub route_no: &'static str,
    /// Endpoints, e.g. "Colombo - Galle".
    pub name: &'static str,
    pub highway: &'static str,
    /// Typical journey time, free text.
    pub duration: &'static str,
}

const CATALOGUE: &[BusRoute] = &[
    BusRoute {
        id: 1,
        route_no: "Route 100",
        name: "Colombo - Galle",
        highway: "Southern Expressway (E01)",
        duration: "~2 hours",
    },
    BusRoute {
        id: 2,
        route_no: "Route 101",
        name: "Colombo - Matara",
        highway: "Southern Expressway (E01)",
        duration: "~2.5 hours",
    },
    BusRoute {
        id: 3,
        route_no: "Route 102",
        name: "Colombo - Katunayake",
        highway: "Colombo-Katunayake Expressway (E03)",
        duration: "~45 minutes",
    },
    BusRoute {
        id: 4,
        route_no: "Route 103",
        name: "Colombo - Kandy",
        highway: "Central Expressway (E04)",
        duration: "~3 hours",
    },
    BusRoute {
        id: 5,
        route_no: "Route 104",
        name: "Colombo - Jaffna",
        highway: "Northern Expressway",
        duration: "~6 hours",
    },
];

/// Every advertised route, in route-number order.
pub fn catalogue() -> &'static [BusRoute] {
    CATALOGUE
}

impl BusRoute {
    /// Case-insensitive substring match over name, highway and route number.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self.highway.to_lowercase().contains(&q)
            || self.route_no.to_lowercase().contains(&q)
    }
}

/// Routes matching `query`; an empty query returns the whole catalogue.
pub fn search(query: &str) -> Vec<&'static BusRoute> {
    CATALOGUE.iter().filter(|r| r.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(search("").len(), catalogue().len());
        assert_eq!(search("   ").len(), 5);
    }

    #[test]
    fn matches_highway_and_route_number() {
        let southern: Vec<_> = search("southern").iter().map(|r| r.id).collect();
        assert_eq!(southern, vec![1, 2]);

        let by_no = search("route 103");
        assert_eq!(by_no.len(), 1);
        assert_eq!(by_no[0].name, "Colombo - Kandy");
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("trincomalee").is_empty());
    }
}
