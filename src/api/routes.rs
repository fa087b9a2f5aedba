use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::animals::animal_routes;
use super::auth::auth_routes;
use super::health::health_check;
use super::users::user_routes;
use crate::auth::middleware::cors_layer;
use crate::auth::AuthService;

pub fn create_routes(db: PgPool, jwt_secret: &str) -> Router {
    let auth_service = AuthService::new(db.clone(), jwt_secret);

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes(auth_service.clone()))
        .nest("/users", user_routes(db.clone(), auth_service.clone()))
        .nest("/animals", animal_routes(db, auth_service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
