//! Creator profile commands for the CLI.

use signagig_core::{match_by_niche, AffiliateOffer, CreatorProfile};

use crate::offers::print_offer_table;

async fn require_profile(pool: &sqlx::PgPool, user_id: &str) -> anyhow::Result<CreatorProfile> {
    let row = signagig_db::get_profile_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| {
            anyhow::anyhow!("no profile for user '{user_id}'; complete onboarding first")
        })?;
    Ok(row.into_profile())
}

fn fmt_list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

/// Print a creator's profile with its multi-value fields normalized.
///
/// # Errors
///
/// Returns an error if the profile does not exist or the query fails.
pub(crate) async fn run_profile(pool: &sqlx::PgPool, user_id: &str) -> anyhow::Result<()> {
    let profile = require_profile(pool, user_id).await?;

    println!("{}", profile.headline());
    println!();
    println!("{:<22}{}", "user", profile.user_id);
    println!("{:<22}{}", "niche", profile.primary_niche);
    println!("{:<22}{}", "platforms", fmt_list(&profile.platforms));
    println!("{:<22}{}", "country", profile.country);
    println!("{:<22}{}", "audience", profile.audience_size);
    println!(
        "{:<22}{}",
        "affiliate platforms",
        fmt_list(&profile.affiliate_platforms)
    );
    println!(
        "{:<22}{}",
        "created",
        profile.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

/// Print the recent offers matched to a creator's niche.
///
/// # Errors
///
/// Returns an error if the profile does not exist or a query fails.
pub(crate) async fn run_matches(
    pool: &sqlx::PgPool,
    user_id: &str,
    limit: i64,
) -> anyhow::Result<()> {
    let profile = require_profile(pool, user_id).await?;
    let offers: Vec<AffiliateOffer> = signagig_db::list_recent_offers(pool, limit)
        .await?
        .into_iter()
        .map(signagig_db::AffiliateOfferRow::into_offer)
        .collect();

    let matched = match_by_niche(&offers, Some(&profile));
    tracing::debug!(
        user_id,
        niche = %profile.primary_niche,
        matched = matched.len(),
        considered = offers.len(),
        "matched offers"
    );

    if matched.is_empty() {
        println!(
            "no recent offers match niche '{}'",
            profile.primary_niche
        );
        return Ok(());
    }

    println!("{}", profile.headline());
    println!();
    print_offer_table(&matched);
    Ok(())
}
