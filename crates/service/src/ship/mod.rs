//! Ship catalog: domain, repository, and service layers.
//!
//! Reads pull the full list from the repository and narrow it in memory;
//! writes validate and re-rate before anything reaches the store.

pub mod domain;
pub mod filter;
pub mod rating;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{NewShip, Ship, ShipPatch, ShipType};
pub use filter::{ShipFilter, ShipOrder};
pub use service::{DynShipService, ShipService};
