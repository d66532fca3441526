use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use signagig_core::OfferSeed;
use sqlx::PgPool;

use crate::DbError;

/// Upsert offers from the catalog file into the database.
///
/// Returns the number of offers processed (inserted or updated).
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::InvalidInput`] if a commission rate cannot be stored,
/// or [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_offers(pool: &PgPool, offers: &[OfferSeed]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for offer in offers {
        let commission_rate = commission_to_decimal(offer.commission_rate).ok_or_else(|| {
            DbError::InvalidInput(format!(
                "offer '{}' has unrepresentable commission_rate {}",
                offer.product_name, offer.commission_rate
            ))
        })?;

        sqlx::query(
            "INSERT INTO affiliate_offers \
                 (product_name, category, affiliate_platform, commission_rate, clicks, conversions, \
                  social_mentions, trending, description, image_url, affiliate_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (product_name, affiliate_platform) DO UPDATE SET \
                 category        = EXCLUDED.category, \
                 commission_rate = EXCLUDED.commission_rate, \
                 clicks          = EXCLUDED.clicks, \
                 conversions     = EXCLUDED.conversions, \
                 social_mentions = EXCLUDED.social_mentions, \
                 trending        = EXCLUDED.trending, \
                 description     = EXCLUDED.description, \
                 image_url       = EXCLUDED.image_url, \
                 affiliate_url   = EXCLUDED.affiliate_url, \
                 updated_at      = NOW()",
        )
        .bind(&offer.product_name)
        .bind(&offer.category)
        .bind(&offer.affiliate_platform)
        .bind(commission_rate)
        .bind(offer.clicks)
        .bind(offer.conversions)
        .bind(offer.social_mentions)
        .bind(i32::from(offer.trending))
        .bind(&offer.description)
        .bind(&offer.image_url)
        .bind(&offer.affiliate_url)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}

/// Convert a percentage to the two-decimal `NUMERIC` stored in the table.
fn commission_to_decimal(rate: f64) -> Option<Decimal> {
    Decimal::from_f64(rate).map(|d| d.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_seed(name: &str, commission_rate: f64) -> OfferSeed {
        OfferSeed {
            product_name: name.to_string(),
            category: "Gaming".to_string(),
            affiliate_platform: "Impact".to_string(),
            commission_rate,
            clicks: None,
            conversions: Some(3),
            social_mentions: 12,
            trending: true,
            description: "Controller".to_string(),
            image_url: None,
            affiliate_url: "https://example.com/controller".to_string(),
        }
    }

    #[test]
    fn commission_is_rounded_to_two_places() {
        assert_eq!(commission_to_decimal(12.345), Some(Decimal::new(1234, 2)));
        assert_eq!(commission_to_decimal(7.5), Some(Decimal::new(75, 1)));
        assert_eq!(commission_to_decimal(f64::NAN), None);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn seed_offers_upserts_on_name_and_platform(pool: PgPool) {
        let first = seed_offers(&pool, &[make_seed("Pro Controller", 5.0)])
            .await
            .expect("first seed");
        assert_eq!(first, 1);

        let second = seed_offers(&pool, &[make_seed("Pro Controller", 9.0)])
            .await
            .expect("second seed");
        assert_eq!(second, 1);

        let rows = crate::list_recent_offers(&pool, 50)
            .await
            .expect("list offers");
        assert_eq!(rows.len(), 1);
        let offer = rows.into_iter().next().expect("row").into_offer();
        assert!((offer.commission_rate - 9.0).abs() < f64::EPSILON);
        assert!(offer.trending);
        assert_eq!(offer.clicks, None);
        assert_eq!(offer.conversions, Some(3));
    }
}
