use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::ship::{validate_crew_size, validate_id, validate_prod_date, validate_speed, validate_text};

use super::domain::{NewShip, Ship, ShipPatch};
use super::filter::{ShipFilter, ShipOrder};
use super::rating;
use super::repository::ShipRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Ship catalog service independent of web framework.
/// Runs validation and rating before any write, and the filter/sort/page pipeline on reads.
pub struct ShipService<R: ShipRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as held by the HTTP layer.
pub type DynShipService = ShipService<dyn ShipRepository>;

impl<R: ShipRepository + ?Sized> ShipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Filtered and, when `order` is given, sorted ships. No paging.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ShipFilter, order: Option<ShipOrder>) -> Result<Vec<Ship>, ServiceError> {
        let all = self.repo.find_all().await?;
        let total = all.len();
        let mut ships = filter.apply(all);
        if let Some(order) = order {
            order.sort(&mut ships);
        }
        debug!(total, matched = ships.len(), "ships filtered");
        Ok(ships)
    }

    /// Size of the set `list(filter, None)` would return.
    pub async fn count(&self, filter: &ShipFilter) -> Result<usize, ServiceError> {
        Ok(self.list(filter, None).await?.len())
    }

    pub async fn list_page(
        &self,
        filter: &ShipFilter,
        order: Option<ShipOrder>,
        page: Pagination,
    ) -> Result<Vec<Ship>, ServiceError> {
        let ships = self.list(filter, order).await?;
        Ok(page.apply(ships))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Ship, ServiceError> {
        validate_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ship", id))
    }

    /// Create a ship. All fields except `isUsed` are mandatory; `isUsed` defaults to false.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::{TimeZone, Utc};
    /// use service::ship::{NewShip, ShipService, ShipType, repository::memory::InMemoryShipRepository};
    /// let svc = ShipService::new(Arc::new(InMemoryShipRepository::new()));
    /// let input = NewShip {
    ///     name: Some("Enterprise".into()),
    ///     planet: Some("Earth".into()),
    ///     ship_type: Some(ShipType::Transport),
    ///     prod_date: Some(Utc.with_ymd_and_hms(2900, 1, 1, 0, 0, 0).unwrap()),
    ///     speed: Some(0.5),
    ///     crew_size: Some(100),
    ///     ..Default::default()
    /// };
    /// let ship = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(ship.id, Some(1));
    /// assert!(!ship.is_used);
    /// assert_eq!(ship.rating, 0.33);
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: NewShip) -> Result<Ship, ServiceError> {
        let name = input.name.ok_or_else(|| ServiceError::missing("name"))?;
        let planet = input.planet.ok_or_else(|| ServiceError::missing("planet"))?;
        let ship_type = input.ship_type.ok_or_else(|| ServiceError::missing("shipType"))?;
        let prod_date = input.prod_date.ok_or_else(|| ServiceError::missing("prodDate"))?;
        let speed = input.speed.ok_or_else(|| ServiceError::missing("speed"))?;
        let crew_size = input.crew_size.ok_or_else(|| ServiceError::missing("crewSize"))?;

        validate_text("name", &name)?;
        validate_text("planet", &planet)?;
        validate_speed(speed)?;
        validate_crew_size(crew_size)?;
        validate_prod_date(&prod_date)?;

        let mut ship = Ship {
            id: None,
            name,
            planet,
            ship_type,
            prod_date,
            is_used: input.is_used.unwrap_or(false),
            speed: rating::round2(speed),
            crew_size,
            rating: 0.0,
        };
        ship.rating = rating::compute(ship.speed, ship.is_used, ship.production_year());

        let saved = self.repo.save(ship).await?;
        info!(id = ?saved.id, rating = saved.rating, "ship_created");
        Ok(saved)
    }

    /// Apply the present fields of `patch`, each validated before assignment, then re-rate.
    #[instrument(skip(self, patch))]
    pub async fn update_by_id(&self, id: i64, patch: ShipPatch) -> Result<Ship, ServiceError> {
        validate_id(id)?;
        let mut ship = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("ship", id))?;

        if let Some(name) = patch.name {
            validate_text("name", &name)?;
            ship.name = name;
        }
        if let Some(planet) = patch.planet {
            validate_text("planet", &planet)?;
            ship.planet = planet;
        }
        if let Some(ship_type) = patch.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(is_used) = patch.is_used {
            ship.is_used = is_used;
        }
        if let Some(prod_date) = patch.prod_date {
            validate_prod_date(&prod_date)?;
            ship.prod_date = prod_date;
        }
        if let Some(speed) = patch.speed {
            validate_speed(speed)?;
            ship.speed = rating::round2(speed);
        }
        if let Some(crew_size) = patch.crew_size {
            validate_crew_size(crew_size)?;
            ship.crew_size = crew_size;
        }
        ship.rating = rating::compute(ship.speed, ship.is_used, ship.production_year());

        let saved = self.repo.save(ship).await?;
        info!(id, rating = saved.rating, "ship_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        validate_id(id)?;
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("ship", id));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "ship_deleted");
        Ok(())
    }
}
