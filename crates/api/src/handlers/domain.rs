//! Handlers for the `/domains` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fiszki_core::validation::validate_domain_name;
use fiszki_db::models::domain::{CreateDomain, Domain};
use fiszki_db::repositories::DomainRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/domains
///
/// Idempotent create: a name the user already has returns the existing row
/// with 200 instead of erroring; a fresh name inserts and returns 201.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateDomain>,
) -> AppResult<(StatusCode, Json<Domain>)> {
    let name = validate_domain_name(&input.name).map_err(AppError::Core)?;

    let (domain, created) =
        DomainRepo::create_idempotent(&state.pool, auth_user.user_id, &name).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(domain)))
}

/// GET /api/v1/domains
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Domain>>> {
    let domains = DomainRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(domains))
}
