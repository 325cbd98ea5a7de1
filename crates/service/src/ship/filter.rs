//! In-memory narrowing and ordering of ship lists.
//!
//! Every criterion is optional; present criteria are AND-ed together.

use serde::{Deserialize, Serialize};

use super::domain::{Ship, ShipType};

/// Optional predicates over a ship list. `after` / `before` are epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive substring of the name.
    pub name: Option<String>,
    /// Case-sensitive substring of the planet.
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// True when `ship` satisfies every present criterion. All bounds are inclusive.
    pub fn matches(&self, ship: &Ship) -> bool {
        let prod_millis = ship.prod_date.timestamp_millis();

        self.name.as_deref().map_or(true, |n| ship.name.contains(n))
            && self.planet.as_deref().map_or(true, |p| ship.planet.contains(p))
            && self.ship_type.map_or(true, |t| ship.ship_type == t)
            && self.after.map_or(true, |after| prod_millis >= after)
            && self.before.map_or(true, |before| prod_millis <= before)
            && self.is_used.map_or(true, |used| ship.is_used == used)
            && self.min_speed.map_or(true, |min| ship.speed.total_cmp(&min).is_ge())
            && self.max_speed.map_or(true, |max| ship.speed.total_cmp(&max).is_le())
            && self.min_crew_size.map_or(true, |min| ship.crew_size >= min)
            && self.max_crew_size.map_or(true, |max| ship.crew_size <= max)
            && self.min_rating.map_or(true, |min| ship.rating.total_cmp(&min).is_ge())
            && self.max_rating.map_or(true, |max| ship.rating.total_cmp(&max).is_le())
    }

    pub fn apply(&self, mut ships: Vec<Ship>) -> Vec<Ship> {
        ships.retain(|s| self.matches(s));
        ships
    }
}

/// Sort key. Sorting is ascending and stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    #[default]
    Id,
    Speed,
    Date,
    Rating,
}

impl ShipOrder {
    pub fn sort(self, ships: &mut [Ship]) {
        match self {
            ShipOrder::Id => ships.sort_by(|a, b| a.id.cmp(&b.id)),
            ShipOrder::Speed => ships.sort_by(|a, b| a.speed.total_cmp(&b.speed)),
            ShipOrder::Date => ships.sort_by(|a, b| a.prod_date.cmp(&b.prod_date)),
            ShipOrder::Rating => ships.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        }
    }
}
