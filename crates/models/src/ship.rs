use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Upper bound for `name` and `planet`, in characters.
pub const TEXT_MAX_LEN: usize = 50;
pub const MIN_PROD_YEAR: i32 = 2800;
/// The catalog's "current year"; also the rating baseline.
pub const CURRENT_YEAR: i32 = 3019;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 0.99;
pub const MIN_CREW_SIZE: i32 = 1;
pub const MAX_CREW_SIZE: i32 = 9999;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: String,
    pub prod_date: DateTimeWithTimeZone,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Closed set of ship classes. Stored as the upper-case variant name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipType {
    Transport,
    Military,
    Merchant,
}

impl ShipType {
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::Validation(format!("unknown ship type: {s}")))
    }
}

/// Name and planet: non-empty, at most 50 characters.
pub fn validate_text(field: &str, value: &str) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len == 0 || len > TEXT_MAX_LEN {
        return Err(ModelError::Validation(format!("{field} must be 1..={TEXT_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_prod_date(prod_date: &DateTime<Utc>) -> Result<(), ModelError> {
    let year = prod_date.year();
    if !(MIN_PROD_YEAR..=CURRENT_YEAR).contains(&year) {
        return Err(ModelError::Validation(format!(
            "prodDate year must be in {MIN_PROD_YEAR}..={CURRENT_YEAR}, got {year}"
        )));
    }
    Ok(())
}

pub fn validate_speed(speed: f64) -> Result<(), ModelError> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(ModelError::Validation(format!("speed must be in {MIN_SPEED}..={MAX_SPEED}")));
    }
    Ok(())
}

pub fn validate_crew_size(crew_size: i32) -> Result<(), ModelError> {
    if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size) {
        return Err(ModelError::Validation(format!(
            "crewSize must be in {MIN_CREW_SIZE}..={MAX_CREW_SIZE}"
        )));
    }
    Ok(())
}

pub fn validate_id(id: i64) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation("id must be a positive integer".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn year(y: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn text_bounds() {
        assert!(validate_text("name", "").is_err());
        assert!(validate_text("name", "a").is_ok());
        assert!(validate_text("name", &"x".repeat(50)).is_ok());
        assert!(validate_text("name", &"x".repeat(51)).is_err());
    }

    #[test]
    fn text_length_counts_characters() {
        // 50 multi-byte characters are still within bounds
        assert!(validate_text("planet", &"ж".repeat(50)).is_ok());
    }

    #[test]
    fn prod_date_year_bounds() {
        assert!(validate_prod_date(&year(2799)).is_err());
        assert!(validate_prod_date(&year(2800)).is_ok());
        assert!(validate_prod_date(&year(3019)).is_ok());
        assert!(validate_prod_date(&year(3020)).is_err());
    }

    #[test]
    fn speed_bounds() {
        assert!(validate_speed(0.0).is_err());
        assert!(validate_speed(0.01).is_ok());
        assert!(validate_speed(0.99).is_ok());
        assert!(validate_speed(1.0).is_err());
        assert!(validate_speed(f64::NAN).is_err());
    }

    #[test]
    fn crew_size_bounds() {
        assert!(validate_crew_size(0).is_err());
        assert!(validate_crew_size(1).is_ok());
        assert!(validate_crew_size(9999).is_ok());
        assert!(validate_crew_size(10000).is_err());
    }

    #[test]
    fn id_must_be_positive() {
        assert!(validate_id(-1).is_err());
        assert!(validate_id(0).is_err());
        assert!(validate_id(1).is_ok());
    }

    #[test]
    fn ship_type_parses_upper_case_names_only() {
        assert_eq!("MILITARY".parse::<ShipType>().unwrap(), ShipType::Military);
        assert!("military".parse::<ShipType>().is_err());
        assert!("STARFIGHTER".parse::<ShipType>().is_err());
        assert_eq!(serde_json::to_value(ShipType::Merchant).unwrap(), "MERCHANT");
    }
}
