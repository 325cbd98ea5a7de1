use async_trait::async_trait;

use super::domain::Ship;
use crate::errors::ServiceError;

/// Persistence abstraction for ships. Identifier generation belongs to the store.
#[async_trait]
pub trait ShipRepository: Send + Sync {
    /// All ships in ascending id order.
    async fn find_all(&self) -> Result<Vec<Ship>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// Insert when `ship.id` is `None`, otherwise overwrite the stored row.
    /// Saving an id that is not stored fails with `NotFound`.
    async fn save(&self, ship: Ship) -> Result<Ship, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// Process-local repository for tests and the `memory` storage backend
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i64, Ship>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct InMemoryShipRepository {
        inner: RwLock<Inner>,
    }

    impl InMemoryShipRepository {
        pub fn new() -> Self { Self::default() }

        /// Seed with already-identified ships, e.g. fixtures.
        pub fn with_ships(ships: impl IntoIterator<Item = Ship>) -> Self {
            let mut inner = Inner::default();
            for ship in ships {
                let id = ship.id.unwrap_or(inner.last_id + 1);
                inner.last_id = inner.last_id.max(id);
                inner.rows.insert(id, Ship { id: Some(id), ..ship });
            }
            Self { inner: RwLock::new(inner) }
        }
    }

    #[async_trait]
    impl ShipRepository for InMemoryShipRepository {
        async fn find_all(&self) -> Result<Vec<Ship>, ServiceError> {
            let inner = self.inner.read().await;
            Ok(inner.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Ship>, ServiceError> {
            let inner = self.inner.read().await;
            Ok(inner.rows.get(&id).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            let inner = self.inner.read().await;
            Ok(inner.rows.contains_key(&id))
        }

        async fn save(&self, mut ship: Ship) -> Result<Ship, ServiceError> {
            let mut inner = self.inner.write().await;
            let id = match ship.id {
                Some(id) if inner.rows.contains_key(&id) => id,
                Some(id) => return Err(ServiceError::not_found("ship", id)),
                None => {
                    inner.last_id += 1;
                    inner.last_id
                }
            };
            ship.id = Some(id);
            inner.rows.insert(id, ship.clone());
            Ok(ship)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            let mut inner = self.inner.write().await;
            inner.rows.remove(&id);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::ship::domain::ShipType;
        use chrono::{TimeZone, Utc};

        fn draft(name: &str) -> Ship {
            Ship {
                id: None,
                name: name.into(),
                planet: "Mars".into(),
                ship_type: ShipType::Merchant,
                prod_date: Utc.with_ymd_and_hms(2990, 3, 1, 0, 0, 0).unwrap(),
                is_used: false,
                speed: 0.3,
                crew_size: 12,
                rating: 0.8,
            }
        }

        #[tokio::test]
        async fn ids_are_assigned_and_never_reused() {
            let repo = InMemoryShipRepository::new();
            let a = repo.save(draft("a")).await.unwrap();
            let b = repo.save(draft("b")).await.unwrap();
            assert_eq!((a.id, b.id), (Some(1), Some(2)));

            repo.delete_by_id(2).await.unwrap();
            assert!(!repo.exists_by_id(2).await.unwrap());
            let c = repo.save(draft("c")).await.unwrap();
            assert_eq!(c.id, Some(3));
        }

        #[tokio::test]
        async fn save_with_id_overwrites() {
            let repo = InMemoryShipRepository::with_ships([Ship { id: Some(10), ..draft("old") }]);
            repo.save(Ship { id: Some(10), ..draft("new") }).await.unwrap();
            let all = repo.find_all().await.unwrap();
            assert_eq!(all.len(), 1);
            assert_eq!(all[0].name, "new");
            let next = repo.save(draft("next")).await.unwrap();
            assert_eq!(next.id, Some(11));
        }

        #[tokio::test]
        async fn save_with_unknown_id_is_not_found() {
            let repo = InMemoryShipRepository::new();
            let res = repo.save(Ship { id: Some(7), ..draft("ghost") }).await;
            assert!(matches!(res, Err(ServiceError::NotFound(_))));
            assert!(repo.find_all().await.unwrap().is_empty());
        }
    }
}
