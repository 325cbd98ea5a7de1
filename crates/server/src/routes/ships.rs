use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::errors::ServiceError;
use service::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use service::ship::{NewShip, Ship, ShipFilter, ShipOrder, ShipPatch, ShipType};

use crate::{errors::JsonApiError, metrics, routes::ServerState};

/// Query string shared by the list and count routes. Count ignores ordering and paging.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipQuery {
    /// Substring of the ship name (case-sensitive)
    pub name: Option<String>,
    /// Substring of the planet (case-sensitive)
    pub planet: Option<String>,
    #[param(value_type = Option<String>, example = "TRANSPORT")]
    pub ship_type: Option<ShipType>,
    /// Lower bound on prodDate, epoch milliseconds
    pub after: Option<i64>,
    /// Upper bound on prodDate, epoch milliseconds
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    #[param(value_type = Option<String>, example = "SPEED")]
    pub order: Option<ShipOrder>,
    /// Zero-based, defaults to 0
    pub page_number: Option<u32>,
    /// Defaults to 3
    pub page_size: Option<u32>,
}

impl ShipQuery {
    pub fn filter(&self) -> ShipFilter {
        ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after,
            before: self.before,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        }
    }

    pub fn pagination(&self) -> Result<Pagination, ServiceError> {
        Pagination::new(
            self.page_number.unwrap_or(0),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

#[utoipa::path(
    get, path = "/rest/ships", tag = "ships",
    params(ShipQuery),
    responses(
        (status = 200, description = "One page of matching ships", body = [crate::openapi::ShipDoc]),
        (status = 400, description = "Invalid Request")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ShipQuery>, QueryRejection>,
) -> Result<Json<Vec<Ship>>, JsonApiError> {
    let Query(q) = metrics::accept("list", query)?;
    let res = match q.pagination() {
        Ok(page) => state.ships.list_page(&q.filter(), q.order, page).await,
        Err(e) => Err(e),
    };
    metrics::observe("list", &res);
    let ships = res?;
    info!(count = ships.len(), order = ?q.order, "list ships");
    Ok(Json(ships))
}

#[utoipa::path(
    get, path = "/rest/ships/count", tag = "ships",
    params(ShipQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = usize),
        (status = 400, description = "Invalid Request")
    )
)]
pub async fn count(
    State(state): State<ServerState>,
    query: Result<Query<ShipQuery>, QueryRejection>,
) -> Result<Json<usize>, JsonApiError> {
    let Query(q) = metrics::accept("count", query)?;
    let res = state.ships.count(&q.filter()).await;
    metrics::observe("count", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ShipDoc),
        (status = 400, description = "Invalid Request"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ship>, JsonApiError> {
    let Path(id) = metrics::accept("get", id)?;
    let res = state.ships.get_by_id(id).await;
    metrics::observe("get", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    post, path = "/rest/ships", tag = "ships",
    request_body = crate::openapi::NewShipDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ShipDoc),
        (status = 400, description = "Invalid Request")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<NewShip>, JsonRejection>,
) -> Result<Json<Ship>, JsonApiError> {
    let Json(input) = metrics::accept("create", input)?;
    let res = state.ships.create(input).await;
    metrics::observe("create", &res);
    let ship = res?;
    info!(id = ?ship.id, name = %ship.name, "created ship");
    Ok(Json(ship))
}

#[utoipa::path(
    post, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    request_body = crate::openapi::ShipPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShipDoc),
        (status = 400, description = "Invalid Request"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    patch: Result<Json<ShipPatch>, JsonRejection>,
) -> Result<Json<Ship>, JsonApiError> {
    let Path(id) = metrics::accept("update", id)?;
    let Json(patch) = metrics::accept("update", patch)?;
    let res = state.ships.update_by_id(id, patch).await;
    metrics::observe("update", &res);
    let ship = res?;
    info!(id, "updated ship");
    Ok(Json(ship))
}

#[utoipa::path(
    delete, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid Request"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = metrics::accept("delete", id)?;
    let res = state.ships.delete_by_id(id).await;
    metrics::observe("delete", &res);
    res?;
    info!(id, "deleted ship");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_first_page_of_three() {
        let page = ShipQuery::default().pagination().unwrap();
        assert_eq!(page, Pagination { page_number: 0, page_size: 3 });
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let q = ShipQuery { page_size: Some(0), ..Default::default() };
        assert!(matches!(q.pagination(), Err(ServiceError::InvalidRequest(_))));
    }

    #[test]
    fn filter_copies_every_criterion() {
        let q = ShipQuery {
            name: Some("Or".into()),
            ship_type: Some(ShipType::Military),
            after: Some(1),
            max_rating: Some(2.5),
            order: Some(ShipOrder::Rating),
            ..Default::default()
        };
        let f = q.filter();
        assert_eq!(f.name.as_deref(), Some("Or"));
        assert_eq!(f.ship_type, Some(ShipType::Military));
        assert_eq!(f.after, Some(1));
        assert_eq!(f.max_rating, Some(2.5));
        assert!(f.planet.is_none());
    }
}
