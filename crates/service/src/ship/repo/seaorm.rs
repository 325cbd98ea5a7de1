use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};

use models::ship;

use crate::errors::ServiceError;
use crate::ship::domain::{Ship, ShipType};
use crate::ship::repository::ShipRepository;

pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShipRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(m: ship::Model) -> Result<Ship, ServiceError> {
    let ship_type = m.ship_type.parse::<ShipType>().map_err(|e| {
        ServiceError::Repository(format!("ship {} has corrupt ship_type: {}", m.id, e))
    })?;
    Ok(Ship {
        id: Some(m.id),
        name: m.name,
        planet: m.planet,
        ship_type,
        prod_date: m.prod_date.with_timezone(&Utc),
        is_used: m.is_used,
        speed: m.speed,
        crew_size: m.crew_size,
        rating: m.rating,
    })
}

fn to_active(ship: Ship) -> ship::ActiveModel {
    ship::ActiveModel {
        id: ship.id.map_or(NotSet, Set),
        name: Set(ship.name),
        planet: Set(ship.planet),
        ship_type: Set(ship.ship_type.to_string()),
        prod_date: Set(ship.prod_date.into()),
        is_used: Set(ship.is_used),
        speed: Set(ship.speed),
        crew_size: Set(ship.crew_size),
        rating: Set(ship.rating),
    }
}

#[async_trait::async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn find_all(&self) -> Result<Vec<Ship>, ServiceError> {
        let rows = ship::Entity::find()
            .order_by_asc(ship::Column::Id)
            .all(&self.db)
            .await?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError> {
        ship::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = ship::Entity::find_by_id(id).count(&self.db).await?;
        Ok(n > 0)
    }

    async fn save(&self, ship: Ship) -> Result<Ship, ServiceError> {
        let id = ship.id;
        let am = to_active(ship);
        let saved = match id {
            None => am.insert(&self.db).await?,
            Some(id) => am.update(&self.db).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => ServiceError::not_found("ship", id),
                other => ServiceError::from(other),
            })?,
        };
        to_domain(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        ship::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
