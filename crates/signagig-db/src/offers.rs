//! Read access to the `affiliate_offers` catalog.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use signagig_core::AffiliateOffer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `affiliate_offers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AffiliateOfferRow {
    pub id: Uuid,
    pub product_name: String,
    pub category: String,
    pub affiliate_platform: String,
    pub commission_rate: Decimal,
    pub clicks: Option<i64>,
    pub conversions: Option<i64>,
    pub social_mentions: i64,
    /// Numeric flag; nonzero means trending.
    pub trending: i32,
    pub description: String,
    pub image_url: Option<String>,
    pub affiliate_url: String,
    pub created_at: DateTime<Utc>,
}

impl AffiliateOfferRow {
    #[must_use]
    pub fn into_offer(self) -> AffiliateOffer {
        AffiliateOffer {
            id: self.id,
            product_name: self.product_name,
            category: self.category,
            affiliate_platform: self.affiliate_platform,
            // NUMERIC(5,2) always fits in f64.
            commission_rate: self.commission_rate.to_f64().unwrap_or_default(),
            clicks: self.clicks,
            conversions: self.conversions,
            social_mentions: self.social_mentions,
            trending: self.trending != 0,
            description: self.description,
            image_url: self.image_url,
            affiliate_url: self.affiliate_url,
            created_at: self.created_at,
        }
    }
}

/// Return the `limit` most recently created offers, newest first.
///
/// # Errors
///
/// Returns [`DbError`] on database query failure.
pub async fn list_recent_offers(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<AffiliateOfferRow>, DbError> {
    Ok(sqlx::query_as::<_, AffiliateOfferRow>(
        "SELECT id, product_name, category, affiliate_platform, commission_rate, clicks, \
                conversions, social_mentions, trending, description, image_url, \
                affiliate_url, created_at \
         FROM affiliate_offers \
         ORDER BY created_at DESC, id \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(trending: i32) -> AffiliateOfferRow {
        AffiliateOfferRow {
            id: Uuid::new_v4(),
            product_name: "Yoga Mat".to_string(),
            category: "Fitness & Health".to_string(),
            affiliate_platform: "Impact".to_string(),
            commission_rate: Decimal::new(1250, 2),
            clicks: Some(10),
            conversions: None,
            social_mentions: 4,
            trending,
            description: String::new(),
            image_url: None,
            affiliate_url: "https://example.com/yoga".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn into_offer_maps_trending_flag() {
        assert!(!make_row(0).into_offer().trending);
        assert!(make_row(1).into_offer().trending);
        assert!(make_row(-3).into_offer().trending);
    }

    #[test]
    fn into_offer_keeps_unknown_counters_unknown() {
        let offer = make_row(0).into_offer();
        assert_eq!(offer.clicks, Some(10));
        assert_eq!(offer.conversions, None);
        assert!((offer.commission_rate - 12.5).abs() < f64::EPSILON);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn list_recent_offers_is_newest_first_and_limited(pool: PgPool) {
        for (name, age_days) in [("Old", 3_i32), ("Newest", 0), ("Middle", 1)] {
            sqlx::query(
                "INSERT INTO affiliate_offers \
                   (product_name, category, affiliate_platform, commission_rate, affiliate_url, created_at) \
                 VALUES ($1, 'Technology', 'Impact', 5, 'https://example.com', NOW() - make_interval(days => $2))",
            )
            .bind(name)
            .bind(age_days)
            .execute(&pool)
            .await
            .expect("insert offer");
        }

        let rows = list_recent_offers(&pool, 2).await.expect("list offers");
        let names: Vec<_> = rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle"]);
    }
}
