//! Affiliate offers and the pure matching/filtering over an in-memory list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profiles::CreatorProfile;

/// Sentinel used by filter selects to mean "no restriction".
pub const ALL: &str = "all";

/// One catalog entry describing a commission-bearing promotional opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateOffer {
    pub id: Uuid,
    pub product_name: String,
    pub category: String,
    pub affiliate_platform: String,
    /// Commission as a percentage, e.g. `12.5` for 12.5%.
    pub commission_rate: f64,
    /// `None` means unknown, not zero.
    pub clicks: Option<i64>,
    /// `None` means unknown, not zero.
    pub conversions: Option<i64>,
    pub social_mentions: i64,
    pub trending: bool,
    pub description: String,
    pub image_url: Option<String>,
    pub affiliate_url: String,
    pub created_at: DateTime<Utc>,
}

/// An exact-match filter value, or no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Build a selection from a request parameter; missing or `"all"` means no filter.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some(ALL) => Selection::All,
            Some(value) => Selection::Only(value.to_string()),
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// Current filter state of the offer list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferFilters {
    /// Free-text search over product name and category; empty means no search.
    pub query: String,
    pub category: Selection,
    pub platform: Selection,
}

impl OfferFilters {
    /// `true` when no predicate is active.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.query.is_empty() && self.category == Selection::All && self.platform == Selection::All
    }
}

/// Offers whose category and the profile's niche contain one another,
/// compared case-insensitively.
///
/// Without a profile every offer is returned. Output keeps input order.
#[must_use]
pub fn match_by_niche<'a>(
    offers: &'a [AffiliateOffer],
    profile: Option<&CreatorProfile>,
) -> Vec<&'a AffiliateOffer> {
    let Some(profile) = profile else {
        return offers.iter().collect();
    };

    let niche = profile.primary_niche.to_lowercase();
    offers
        .iter()
        .filter(|offer| {
            let category = offer.category.to_lowercase();
            category.contains(&niche) || niche.contains(&category)
        })
        .collect()
}

/// Apply search, category, and platform filters to the full offer list.
///
/// Inactive predicates are skipped. Output keeps input order.
#[must_use]
pub fn filter_offers<'a>(
    offers: &'a [AffiliateOffer],
    filters: &OfferFilters,
) -> Vec<&'a AffiliateOffer> {
    let mut filtered: Vec<&AffiliateOffer> = offers.iter().collect();

    if !filters.query.is_empty() {
        let query = filters.query.to_lowercase();
        filtered.retain(|offer| {
            offer.product_name.to_lowercase().contains(&query)
                || offer.category.to_lowercase().contains(&query)
        });
    }

    if filters.category != Selection::All {
        filtered.retain(|offer| filters.category.admits(&offer.category));
    }

    if filters.platform != Selection::All {
        filtered.retain(|offer| filters.platform.admits(&offer.affiliate_platform));
    }

    filtered
}

#[must_use]
pub fn trending_count(offers: &[AffiliateOffer]) -> usize {
    offers.iter().filter(|offer| offer.trending).count()
}

/// Mean commission rate, or `None` for an empty list.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_commission_rate(offers: &[AffiliateOffer]) -> Option<f64> {
    if offers.is_empty() {
        return None;
    }
    let total: f64 = offers.iter().map(|offer| offer.commission_rate).sum();
    Some(total / offers.len() as f64)
}

/// Distinct categories in first-seen order, for the category filter options.
#[must_use]
pub fn distinct_categories(offers: &[AffiliateOffer]) -> Vec<String> {
    distinct(offers.iter().map(|offer| offer.category.as_str()))
}

/// Distinct affiliate platforms in first-seen order, for the platform filter options.
#[must_use]
pub fn distinct_platforms(offers: &[AffiliateOffer]) -> Vec<String> {
    distinct(offers.iter().map(|offer| offer.affiliate_platform.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(ToOwned::to_owned)
        .collect()
}

/// Headline numbers for the creator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_offers: usize,
    pub matched_offers: usize,
    pub trending_now: usize,
    pub average_commission_rate: Option<f64>,
}

impl DashboardSummary {
    #[must_use]
    pub fn compute(offers: &[AffiliateOffer], profile: Option<&CreatorProfile>) -> Self {
        Self {
            total_offers: offers.len(),
            matched_offers: match_by_niche(offers, profile).len(),
            trending_now: trending_count(offers),
            average_commission_rate: average_commission_rate(offers),
        }
    }

    /// Average commission rounded to a whole percent, as displayed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_average_commission(&self) -> Option<i64> {
        self.average_commission_rate.map(|rate| rate.round() as i64)
    }
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
