use axum::{Extension, Json};
use serde::Serialize;
use signagig_core::OnboardingStep;

use crate::middleware::RequestId;

use super::ApiResponse;

#[derive(Debug, Serialize)]
pub(super) struct OnboardingStepItem {
    step: OnboardingStep,
    number: usize,
    title: &'static str,
    options: &'static [&'static str],
}

/// GET /api/v1/onboarding/options: the five wizard steps with their choices.
pub(super) async fn get_onboarding_options(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<OnboardingStepItem>>> {
    let data = OnboardingStep::ALL
        .into_iter()
        .map(|step| OnboardingStepItem {
            step,
            number: step.number(),
            title: step.title(),
            options: step.options(),
        })
        .collect();

    Json(ApiResponse::new(data, req_id.0))
}
