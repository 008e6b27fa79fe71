use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full route table: public routes at the root, protected routes under `/api`
/// behind the bearer-token gate.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(employee_routes())
        .merge(asset_routes())
        .merge(mapping_routes())
        .route("/dashboard", get(protected::dashboard::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        // Public
        .route("/health", get(public::health))
        .route("/login/auth", post(public::auth::login))
        // Protected
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn employee_routes() -> Router<AppState> {
    use protected::employee;

    Router::new()
        .route("/employee/createemployee", post(employee::create))
        .route("/employee/editemployee/:employeeId", put(employee::edit))
        .route("/employee/deleteemployee/:employeeId", delete(employee::delete))
        .route("/employee/employee/:employeeId", get(employee::get))
}

fn asset_routes() -> Router<AppState> {
    use protected::asset;

    Router::new()
        .route("/asset/createasset", post(asset::create))
        .route("/asset/editasset/:assetId", put(asset::edit))
        .route("/asset/deleteasset/:assetId", delete(asset::delete))
        .route("/asset/asset/:assetId", get(asset::get))
        .route("/asset/getallasset", get(asset::list))
}

fn mapping_routes() -> Router<AppState> {
    use protected::mapping;

    Router::new()
        .route("/mapping/assignassetmapping", post(mapping::assign))
        .route("/mapping/getallassets/:employeeId", get(mapping::list_for_employee))
        .route("/mapping/removeassetmapping/:mappingId", delete(mapping::remove))
}

/// Permissive when no origins are configured, otherwise an explicit allow-list
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
