//! Creator-scoped handlers.
//!
//! - `GET  /api/v1/creators/{user_id}/profile`   : normalized profile
//! - `POST /api/v1/creators/{user_id}/profile`   : create via the onboarding wizard
//! - `GET  /api/v1/creators/{user_id}/matches`   : offers matching the niche
//! - `GET  /api/v1/creators/{user_id}/dashboard` : headline numbers plus lists
//! - `GET  /api/v1/creators/{user_id}/landing`   : where to send the creator

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use signagig_core::{
    distinct_categories, distinct_platforms, filter_offers, match_by_niche, AffiliateOffer,
    CoreError, CreatorProfile, DashboardSummary, OnboardingWizard, WizardAction,
};

use crate::middleware::RequestId;

use super::{
    fetch_recent_offers, map_db_error, offers::filters_from_params, ApiError, ApiResponse,
    AppState,
};

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateProfileRequest {
    pub primary_niche: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub country: String,
    pub audience_size: String,
    #[serde(default)]
    pub affiliate_platforms: Vec<String>,
}

impl CreateProfileRequest {
    /// The wizard actions a creator would perform to submit these answers.
    fn into_actions(self) -> Vec<WizardAction> {
        let mut actions = vec![WizardAction::SelectNiche(self.primary_niche), WizardAction::Next];
        actions.extend(
            self.platforms
                .into_iter()
                .map(WizardAction::TogglePlatform),
        );
        actions.extend([
            WizardAction::Next,
            WizardAction::SelectCountry(self.country),
            WizardAction::Next,
            WizardAction::SelectAudienceSize(self.audience_size),
            WizardAction::Next,
        ]);
        actions.extend(
            self.affiliate_platforms
                .into_iter()
                .map(WizardAction::ToggleAffiliatePlatform),
        );
        actions
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    headline: Option<String>,
    summary: DashboardSummary,
    /// Average commission rounded to a whole percent.
    average_commission_percent: Option<i64>,
    categories: Vec<String>,
    platforms: Vec<String>,
    matched_offers: Vec<AffiliateOffer>,
    offers: Vec<AffiliateOffer>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(super) enum Landing {
    Dashboard,
    Onboarding,
}

#[derive(Debug, Serialize)]
pub(super) struct LandingData {
    user_id: String,
    destination: Landing,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn map_core_error(req_id: &str, error: &CoreError) -> ApiError {
    ApiError::new(req_id, "validation_error", error.to_string())
}

async fn load_profile(
    state: &AppState,
    user_id: &str,
    req_id: &str,
) -> Result<Option<CreatorProfile>, ApiError> {
    let row = signagig_db::get_profile_by_user_id(&state.pool, user_id)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?;
    Ok(row.map(signagig_db::CreatorProfileRow::into_profile))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<CreatorProfile>>, ApiError> {
    let profile = load_profile(&state, &user_id, &req_id.0)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no profile for user '{user_id}'"),
            )
        })?;

    Ok(Json(ApiResponse::new(profile, req_id.0)))
}

pub(super) async fn create_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Json(body): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatorProfile>>), ApiError> {
    let rid = &req_id.0;

    let wizard = body
        .into_actions()
        .into_iter()
        .try_fold(OnboardingWizard::new(), OnboardingWizard::apply)
        .map_err(|e| map_core_error(rid, &e))?;
    let new_profile = wizard
        .finish(user_id)
        .map_err(|e| map_core_error(rid, &e))?;

    let row = signagig_db::create_profile(&state.pool, &new_profile)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;
    tracing::info!(user_id = %row.user_id, niche = %row.primary_niche, "creator profile created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(row.into_profile(), req_id.0)),
    ))
}

/// Offers matched to the creator's niche; every recent offer when there is no profile.
pub(super) async fn list_matches(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AffiliateOffer>>>, ApiError> {
    let profile = load_profile(&state, &user_id, &req_id.0).await?;
    let offers = fetch_recent_offers(&state.pool, state.offer_fetch_limit, &req_id.0).await?;

    let data = match_by_niche(&offers, profile.as_ref())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let profile = load_profile(&state, &user_id, &req_id.0).await?;
    let offers = fetch_recent_offers(&state.pool, state.offer_fetch_limit, &req_id.0).await?;

    let filters = filters_from_params(
        query.q.as_deref(),
        query.category.as_deref(),
        query.platform.as_deref(),
    );
    let summary = DashboardSummary::compute(&offers, profile.as_ref());

    let data = DashboardData {
        headline: profile.as_ref().map(CreatorProfile::headline),
        average_commission_percent: summary.rounded_average_commission(),
        summary,
        categories: distinct_categories(&offers),
        platforms: distinct_platforms(&offers),
        matched_offers: match_by_niche(&offers, profile.as_ref())
            .into_iter()
            .cloned()
            .collect(),
        offers: filter_offers(&offers, &filters)
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

/// Send creators with a profile to the dashboard and everyone else to onboarding.
///
/// A failed lookup is treated like a missing profile.
pub(super) async fn get_landing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> Json<ApiResponse<LandingData>> {
    let destination = match signagig_db::get_profile_by_user_id(&state.pool, &user_id).await {
        Ok(Some(_)) => Landing::Dashboard,
        Ok(None) => Landing::Onboarding,
        Err(e) => {
            tracing::warn!(error = %e, user_id = %user_id, "profile lookup failed; routing to onboarding");
            Landing::Onboarding
        }
    };

    Json(ApiResponse::new(
        LandingData {
            user_id,
            destination,
        },
        req_id.0,
    ))
}
