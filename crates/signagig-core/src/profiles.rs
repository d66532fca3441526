use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A creator's self-reported attributes, with multi-value fields normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub id: Uuid,
    /// Owning account; at most one profile per user.
    pub user_id: String,
    pub primary_niche: String,
    pub platforms: Vec<String>,
    pub country: String,
    pub audience_size: String,
    pub affiliate_platforms: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatorProfile {
    /// One-line description shown above the dashboard,
    /// e.g. `"Gaming creator on Twitch, YouTube"`.
    #[must_use]
    pub fn headline(&self) -> String {
        if self.platforms.is_empty() {
            format!("{} creator", self.primary_niche)
        } else {
            format!(
                "{} creator on {}",
                self.primary_niche,
                self.platforms.join(", ")
            )
        }
    }
}

/// Write shape for a new profile. Multi-value fields are already joined
/// into the canonical comma-separated stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCreatorProfile {
    pub user_id: String,
    pub primary_niche: String,
    pub platforms: String,
    pub country: String,
    pub audience_size: String,
    pub affiliate_platforms: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile(platforms: &[&str]) -> CreatorProfile {
        let now = Utc::now();
        CreatorProfile {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            primary_niche: "Gaming".to_string(),
            platforms: platforms.iter().map(|p| (*p).to_string()).collect(),
            country: "Canada".to_string(),
            audience_size: "1K - 10K followers".to_string(),
            affiliate_platforms: vec!["Amazon Associates".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn headline_lists_platforms_in_order() {
        let profile = make_profile(&["Twitch", "YouTube"]);
        assert_eq!(profile.headline(), "Gaming creator on Twitch, YouTube");
    }

    #[test]
    fn headline_without_platforms() {
        let profile = make_profile(&[]);
        assert_eq!(profile.headline(), "Gaming creator");
    }

    #[test]
    fn profile_serializes_platforms_as_array() {
        let profile = make_profile(&["Twitch"]);
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(json["platforms"], serde_json::json!(["Twitch"]));
        assert_eq!(json["user_id"], "user-1");
    }
}
