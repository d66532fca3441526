use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use signagig_core::{
    distinct_categories, distinct_platforms, filter_offers, AffiliateOffer, OfferFilters,
    Selection,
};

use crate::middleware::RequestId;

use super::{fetch_recent_offers, normalize_limit, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct OfferQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct OfferFacets {
    pub categories: Vec<String>,
    pub platforms: Vec<String>,
}

/// Build filter state from query parameters; absent or `all` means unfiltered.
pub(super) fn filters_from_params(
    q: Option<&str>,
    category: Option<&str>,
    platform: Option<&str>,
) -> OfferFilters {
    OfferFilters {
        query: q.map(str::to_owned).unwrap_or_default(),
        category: Selection::from_param(category),
        platform: Selection::from_param(platform),
    }
}

/// GET /api/v1/offers
pub(super) async fn list_offers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<OfferQuery>,
) -> Result<Json<ApiResponse<Vec<AffiliateOffer>>>, ApiError> {
    let limit = normalize_limit(query.limit, state.offer_fetch_limit);
    let offers = fetch_recent_offers(&state.pool, limit, &req_id.0).await?;

    let filters = filters_from_params(
        query.q.as_deref(),
        query.category.as_deref(),
        query.platform.as_deref(),
    );
    let data = filter_offers(&offers, &filters)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

/// GET /api/v1/offers/facets
pub(super) async fn get_offer_facets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<OfferFacets>>, ApiError> {
    let offers = fetch_recent_offers(&state.pool, state.offer_fetch_limit, &req_id.0).await?;

    let data = OfferFacets {
        categories: distinct_categories(&offers),
        platforms: distinct_platforms(&offers),
    };

    Ok(Json(ApiResponse::new(data, req_id.0)))
}
