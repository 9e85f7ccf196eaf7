use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::models::profile::{PopulatedProfile, Profile};
use crate::profile::builder::{build_profile_fields, UpsertProfileRequest};
use crate::profile::service;
use crate::profile::validation::{EducationInput, ExperienceInput};
use crate::state::AppState;

/// GET /api/profile/me
pub async fn get_my_profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PopulatedProfile>, ApiError> {
    let profile = service::own_profile(state.store.as_ref(), user.id).await?;
    Ok(Json(profile))
}

/// POST /api/profile — create or update the caller's profile.
pub async fn upsert_profile(
    user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let fields = build_profile_fields(req).map_err(ApiError::Validation)?;
    let profile = service::upsert_profile(state.store.as_ref(), user.id, &fields).await?;
    Ok(Json(profile))
}

/// GET /api/profile
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedProfile>>, ApiError> {
    let profiles = service::all_profiles(state.store.as_ref()).await?;
    Ok(Json(profiles))
}

/// GET /api/profile/user/:user_id
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PopulatedProfile>, ApiError> {
    let profile = service::profile_by_user(state.store.as_ref(), &user_id).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile — removes the profile and the user record.
pub async fn delete_account(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    service::delete_account(state.store.as_ref(), user.id).await?;
    Ok(Json(json!({ "msg": "User has been removed" })))
}

/// PUT /api/profile/experience
pub async fn add_experience(
    user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ExperienceInput>,
) -> Result<Json<Profile>, ApiError> {
    let entry = req.into_entry().map_err(ApiError::Validation)?;
    let profile = service::add_experience(state.store.as_ref(), user.id, entry).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/experience/:exp_id
pub async fn remove_experience(
    user: AuthUser,
    State(state): State<AppState>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = service::remove_experience(state.store.as_ref(), user.id, &exp_id).await?;
    Ok(Json(profile))
}

/// PUT /api/profile/education
pub async fn add_education(
    user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<EducationInput>,
) -> Result<Json<Profile>, ApiError> {
    let entry = req.into_entry().map_err(ApiError::Validation)?;
    let profile = service::add_education(state.store.as_ref(), user.id, entry).await?;
    Ok(Json(profile))
}

/// DELETE /api/profile/education/:edu_id
pub async fn remove_education(
    user: AuthUser,
    State(state): State<AppState>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = service::remove_education(state.store.as_ref(), user.id, &edu_id).await?;
    Ok(Json(profile))
}
