use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    #[schema(example = "TRANSPORT")]
    pub ship_type: String,
    /// Epoch milliseconds
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    /// Computed by the server
    pub rating: f64,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewShipDoc {
    pub name: String,
    pub planet: String,
    #[schema(example = "MILITARY")]
    pub ship_type: String,
    pub prod_date: i64,
    pub is_used: Option<bool>,
    pub speed: f64,
    pub crew_size: i32,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipPatchDoc {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ships::list,
        crate::routes::ships::count,
        crate::routes::ships::get,
        crate::routes::ships::create,
        crate::routes::ships::update,
        crate::routes::ships::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ShipDoc,
            NewShipDoc,
            ShipPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "ships")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_ship_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/rest/ships"));
        assert!(paths.contains_key("/rest/ships/count"));
        assert!(paths.contains_key("/rest/ships/{id}"));
    }
}
