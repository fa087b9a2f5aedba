use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use sqlx::PgPool;

use crate::api::error::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{RegisterUserRequest, ResetPasswordRequest, UpdateUserRequest, UserResponse};
use crate::services::UserService;

/// User account routes. Everything except registration requires a token.
pub fn user_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route("/me", get(current_user).delete(delete_current_user))
        .route("/update", patch(update_user))
        .route("/reset-password", post(reset_password))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .route("/register", post(register))
        .with_state(db)
}

/// Create new user
#[tracing::instrument(skip(db, request))]
async fn register(
    State(db): State<PgPool>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    crate::auth::password::validate_password(&request.password)
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let user_service = UserService::new(db);

    if user_service.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    // A concurrent registration can slip past the pre-check and trip the
    // unique email index; that is still the caller's conflict, not a 500.
    let user = user_service
        .register(&request.email, &request.password)
        .await
        .map_err(|err| match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                ApiError::EmailTaken
            }
            _ => ApiError::Internal(err),
        })?;
    Ok(Json(user.into()))
}

/// Get current user
#[tracing::instrument(skip(db))]
async fn current_user(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::new(db)
        .find_by_id(session.user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user.into()))
}

/// Partial profile update
#[tracing::instrument(skip(db, request))]
async fn update_user(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_service = UserService::new(db);

    if user_service.find_by_id(session.user_id).await?.is_none() {
        return Err(ApiError::Validation("User does not exist".to_string()));
    }

    let user = user_service.update(session.user_id, request).await?;
    Ok(Json(user.into()))
}

/// Update current user password
#[tracing::instrument(skip(db, request))]
async fn reset_password(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    crate::auth::password::validate_password(&request.password)
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let user_service = UserService::new(db);

    if user_service.find_by_id(session.user_id).await?.is_none() {
        return Err(ApiError::Validation("User does not exist".to_string()));
    }

    let user = user_service
        .reset_password(session.user_id, &request.password)
        .await?;
    Ok(Json(user.into()))
}

/// Soft-delete current user
#[tracing::instrument(skip(db))]
async fn delete_current_user(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<StatusCode, ApiError> {
    UserService::new(db).delete(session.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
