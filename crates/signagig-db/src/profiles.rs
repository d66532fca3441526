//! Database operations for the `creator_profiles` table.

use chrono::{DateTime, Utc};
use signagig_core::{normalize_field, CreatorProfile, NewCreatorProfile, StoredField};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `creator_profiles` table, multi-value fields still raw.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CreatorProfileRow {
    pub id: Uuid,
    pub user_id: String,
    pub primary_niche: String,
    /// Comma-joined in current rows; JSON-encoded in older ones.
    pub platforms: Option<String>,
    pub country: String,
    pub audience_size: String,
    pub affiliate_platforms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatorProfileRow {
    /// Convert into the domain profile, normalizing the multi-value fields.
    #[must_use]
    pub fn into_profile(self) -> CreatorProfile {
        CreatorProfile {
            id: self.id,
            user_id: self.user_id,
            primary_niche: self.primary_niche,
            platforms: normalize_field(&StoredField::from(self.platforms)),
            country: self.country,
            audience_size: self.audience_size,
            affiliate_platforms: normalize_field(&StoredField::from(self.affiliate_platforms)),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fetch the profile owned by `user_id`, if one exists.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn get_profile_by_user_id(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<CreatorProfileRow>, DbError> {
    Ok(sqlx::query_as::<_, CreatorProfileRow>(
        "SELECT id, user_id, primary_niche, platforms, country, audience_size, \
                affiliate_platforms, created_at, updated_at \
         FROM creator_profiles WHERE user_id = $1 \
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Insert a new profile and return the stored row.
///
/// Profiles are never updated, so a second insert for the same user is
/// rejected rather than merged.
///
/// # Errors
///
/// Returns [`DbError::Conflict`] if the user already has a profile, or
/// [`DbError::Sqlx`] on database query failure.
pub async fn create_profile(
    pool: &PgPool,
    profile: &NewCreatorProfile,
) -> Result<CreatorProfileRow, DbError> {
    let row = sqlx::query_as::<_, CreatorProfileRow>(
        "INSERT INTO creator_profiles \
           (user_id, primary_niche, platforms, country, audience_size, affiliate_platforms) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (user_id) DO NOTHING \
         RETURNING id, user_id, primary_niche, platforms, country, audience_size, \
                   affiliate_platforms, created_at, updated_at",
    )
    .bind(&profile.user_id)
    .bind(&profile.primary_niche)
    .bind(&profile.platforms)
    .bind(&profile.country)
    .bind(&profile.audience_size)
    .bind(&profile.affiliate_platforms)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| {
        DbError::Conflict(format!(
            "profile already exists for user '{}'",
            profile.user_id
        ))
    })
}
