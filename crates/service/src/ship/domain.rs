use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub use models::ship::ShipType;

/// Ship as returned to clients. `id` is `None` only before the first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: Option<i64>,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    /// Epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTime<Utc>,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl Ship {
    pub fn production_year(&self) -> i32 {
        self.prod_date.year()
    }
}

/// Create payload. Every field is optional on the wire so that a missing one
/// is reported as an invalid request rather than a decoding failure.
/// Client-supplied `id` and `rating` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShip {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub prod_date: Option<DateTime<Utc>>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPatch {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub prod_date: Option<DateTime<Utc>>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

impl ShipPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.planet.is_none()
            && self.ship_type.is_none()
            && self.prod_date.is_none()
            && self.is_used.is_none()
            && self.speed.is_none()
            && self.crew_size.is_none()
    }
}
