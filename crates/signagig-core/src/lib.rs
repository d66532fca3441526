pub mod app_config;
pub mod catalog;
pub mod config;
pub mod fields;
pub mod offers;
pub mod onboarding;
pub mod profiles;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_offer_catalog, OfferCatalog, OfferSeed};
pub use config::{load_app_config, load_app_config_from_env};
pub use fields::{join_field, normalize_field, StoredField};
pub use offers::{
    average_commission_rate, distinct_categories, distinct_platforms, filter_offers,
    match_by_niche, trending_count, AffiliateOffer, DashboardSummary, OfferFilters, Selection,
};
pub use onboarding::{OnboardingStep, OnboardingWizard, WizardAction};
pub use profiles::{CreatorProfile, NewCreatorProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read offers file {path}: {source}")]
    OffersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse offers file: {0}")]
    OffersFileParse(#[from] serde_yaml::Error),
    #[error("offer catalog validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown {field} option: {value}")]
    UnknownOption { field: &'static str, value: String },
    #[error("onboarding incomplete at step: {0}")]
    IncompleteOnboarding(OnboardingStep),
}
