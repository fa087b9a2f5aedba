use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, patch, post, put},
    Extension, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{
    ActivityLogRequest, ActivityLogResponse, ActivityType, Animal, AnimalResponse,
    CreateAnimalRequest, TimeUnit, UpdateAnimalRequest, WeightEntryRequest, WeightEntryResponse,
};
use crate::services::{ActivityService, AnimalService, WeightService};

/// Animal routes. All of them require a token; all per-animal routes are
/// ownership-checked and answer 404 for animals the caller does not own.
pub fn animal_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route("/create", post(create_animal))
        .route("/all", get(list_animals))
        .route("/update/:id", patch(update_animal))
        .route("/delete/:id", delete(delete_animal))
        .route("/weight/:id", post(add_weight).get(weight_history))
        .route(
            "/weight/:id/:history_id",
            put(replace_weight).delete(delete_weight),
        )
        .route("/log/:id", post(add_log).get(list_logs))
        .route("/log/:id/:log_id", put(replace_log).delete(delete_log))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(db)
}

/// Time-window selection for history queries. An unknown `unit` is rejected
/// by deserialization (400), never silently defaulted.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub range: Option<i64>,
    pub unit: Option<TimeUnit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub range: Option<i64>,
    pub unit: Option<TimeUnit>,
    pub types: Option<String>,
}

/// Cutoff for a history query; `None` means unbounded. Missing unit defaults
/// to unbounded, a bounded unit requires a positive range. A window larger
/// than the representable timeline is unbounded too.
fn resolve_cutoff(
    range: Option<i64>,
    unit: Option<TimeUnit>,
    now: NaiveDateTime,
) -> Result<Option<NaiveDateTime>, ApiError> {
    let unit = unit.unwrap_or(TimeUnit::All);
    if unit == TimeUnit::All {
        return Ok(None);
    }

    let range = range.ok_or_else(|| {
        ApiError::Validation("range is required for a bounded time unit".to_string())
    })?;
    if range < 1 {
        return Err(ApiError::Validation(
            "range must be a positive integer".to_string(),
        ));
    }

    Ok(unit.cutoff(range, now))
}

/// Parse the comma-separated activity-type filter. An empty set or the
/// sentinel `all` disables filtering; unknown tags are a client error.
fn parse_type_filter(raw: Option<&str>) -> Result<Option<Vec<ActivityType>>, ApiError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };

    let mut types = Vec::new();
    for tag in raw.split(',').map(str::trim) {
        if tag == "all" {
            return Ok(None);
        }
        let activity = ActivityType::from_str(tag)
            .ok_or_else(|| ApiError::Validation(format!("unknown activity type: {tag}")))?;
        types.push(activity);
    }

    Ok(Some(types))
}

async fn to_response(service: &AnimalService, animal: Animal) -> Result<AnimalResponse, ApiError> {
    let owners = service.owners(animal.id).await?;
    Ok(AnimalResponse::from_parts(
        animal,
        owners.into_iter().map(Into::into).collect(),
    ))
}

/// Creates new animal, owned by the caller
#[tracing::instrument(skip(db, request))]
async fn create_animal(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateAnimalRequest>,
) -> Result<(StatusCode, Json<AnimalResponse>), ApiError> {
    let service = AnimalService::new(db);
    let animal = service.create(session.user_id, request).await?;
    let response = to_response(&service, animal).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns all of the caller's animals
#[tracing::instrument(skip(db))]
async fn list_animals(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<AnimalResponse>>, ApiError> {
    let service = AnimalService::new(db);
    let animals = service.list_for_owner(session.user_id).await?;

    let mut responses = Vec::with_capacity(animals.len());
    for animal in animals {
        responses.push(to_response(&service, animal).await?);
    }
    Ok(Json(responses))
}

/// Partial update, ownership-checked
#[tracing::instrument(skip(db, request))]
async fn update_animal(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
    Json(request): Json<UpdateAnimalRequest>,
) -> Result<Json<AnimalResponse>, ApiError> {
    let service = AnimalService::new(db);
    let animal = service
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let animal = service.update(animal.id, request).await?;
    let response = to_response(&service, animal).await?;
    Ok(Json(response))
}

/// Soft-delete, ownership-checked
#[tracing::instrument(skip(db))]
async fn delete_animal(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
) -> Result<Json<AnimalResponse>, ApiError> {
    let service = AnimalService::new(db);
    let animal = service
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let animal = service.delete(animal.id).await?;
    let response = to_response(&service, animal).await?;
    Ok(Json(response))
}

/// Add a weight entry
#[tracing::instrument(skip(db, request))]
async fn add_weight(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
    Json(request): Json<WeightEntryRequest>,
) -> Result<Json<WeightEntryResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let entry = WeightService::new(db).add(animal.id, request).await?;
    Ok(Json(entry.into()))
}

/// Replace a weight entry
#[tracing::instrument(skip(db, request))]
async fn replace_weight(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path((animal_id, history_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<WeightEntryRequest>,
) -> Result<Json<WeightEntryResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let entry = WeightService::new(db)
        .replace(animal.id, history_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(entry.into()))
}

/// Hard-delete a weight entry
#[tracing::instrument(skip(db))]
async fn delete_weight(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path((animal_id, history_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<WeightEntryResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let entry = WeightService::new(db)
        .delete(animal.id, history_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(entry.into()))
}

/// Time-filtered weight history
#[tracing::instrument(skip(db))]
async fn weight_history(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<WeightEntryResponse>>, ApiError> {
    let cutoff = resolve_cutoff(query.range, query.unit, Utc::now().naive_utc())?;

    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let entries = WeightService::new(db).history(animal.id, cutoff).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Add an activity log entry
#[tracing::instrument(skip(db, request))]
async fn add_log(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
    Json(request): Json<ActivityLogRequest>,
) -> Result<Json<ActivityLogResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let log = ActivityService::new(db).add(animal.id, request).await?;
    Ok(Json(log.into()))
}

/// Replace an activity log entry
#[tracing::instrument(skip(db, request))]
async fn replace_log(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path((animal_id, log_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ActivityLogRequest>,
) -> Result<Json<ActivityLogResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let log = ActivityService::new(db)
        .replace(animal.id, log_id, request)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(log.into()))
}

/// Hard-delete an activity log entry
#[tracing::instrument(skip(db))]
async fn delete_log(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path((animal_id, log_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ActivityLogResponse>, ApiError> {
    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let log = ActivityService::new(db)
        .delete(animal.id, log_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(log.into()))
}

/// Time- and type-filtered activity logs
#[tracing::instrument(skip(db))]
async fn list_logs(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(animal_id): Path<Uuid>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<ActivityLogResponse>>, ApiError> {
    let cutoff = resolve_cutoff(query.range, query.unit, Utc::now().naive_utc())?;
    let types = parse_type_filter(query.types.as_deref())?;

    let animal = AnimalService::new(db.clone())
        .find_owned(session.user_id, animal_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let logs = ActivityService::new(db)
        .list(animal.id, cutoff, types)
        .await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn missing_unit_means_unbounded() {
        assert_eq!(resolve_cutoff(None, None, now()).unwrap(), None);
        assert_eq!(
            resolve_cutoff(Some(3), Some(TimeUnit::All), now()).unwrap(),
            None
        );
    }

    #[test]
    fn bounded_unit_requires_positive_range() {
        assert_matches!(
            resolve_cutoff(None, Some(TimeUnit::Days), now()),
            Err(ApiError::Validation(_))
        );
        assert_matches!(
            resolve_cutoff(Some(0), Some(TimeUnit::Weeks), now()),
            Err(ApiError::Validation(_))
        );
        assert_matches!(
            resolve_cutoff(Some(-2), Some(TimeUnit::Days), now()),
            Err(ApiError::Validation(_))
        );
    }

    #[test]
    fn oversized_range_is_unbounded_not_an_error() {
        assert_eq!(
            resolve_cutoff(Some(i64::MAX), Some(TimeUnit::Days), now()).unwrap(),
            None
        );
        assert_eq!(
            resolve_cutoff(Some(i64::MAX / 300), Some(TimeUnit::Years), now()).unwrap(),
            None
        );
    }

    #[test]
    fn one_day_window_is_24_hours() {
        let cutoff = resolve_cutoff(Some(1), Some(TimeUnit::Days), now())
            .unwrap()
            .unwrap();
        assert_eq!(now() - cutoff, Duration::hours(24));
    }

    #[test]
    fn type_filter_parses_exact_names() {
        let types = parse_type_filter(Some("bath, exercise")).unwrap().unwrap();
        assert_eq!(types, vec![ActivityType::Bath, ActivityType::Exercise]);
    }

    #[test]
    fn type_filter_sentinel_and_empty_disable_filtering() {
        assert_eq!(parse_type_filter(None).unwrap(), None);
        assert_eq!(parse_type_filter(Some("")).unwrap(), None);
        assert_eq!(parse_type_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_type_filter(Some("bath,all")).unwrap(), None);
    }

    #[test]
    fn unknown_type_tag_is_a_client_error() {
        assert_matches!(
            parse_type_filter(Some("juggling")),
            Err(ApiError::Validation(_))
        );
    }
}
