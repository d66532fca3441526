//! Offer listing for the CLI.

use signagig_core::{filter_offers, AffiliateOffer, DashboardSummary, OfferFilters};

/// Shorten `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Render optional counters; unknown is not zero.
pub(crate) fn fmt_count(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub(crate) fn print_offer_table(offers: &[&AffiliateOffer]) {
    let header = format!(
        "{:<32}{:<22}{:<20}{:>10}{:>8}{:>8}  TRENDING",
        "PRODUCT", "CATEGORY", "PLATFORM", "COMMISSION", "CLICKS", "CONV"
    );
    println!("{header}");
    for offer in offers {
        println!(
            "{:<32}{:<22}{:<20}{:>9.2}%{:>8}{:>8}  {}",
            truncate(&offer.product_name, 28),
            truncate(&offer.category, 19),
            truncate(&offer.affiliate_platform, 17),
            offer.commission_rate,
            fmt_count(offer.clicks),
            fmt_count(offer.conversions),
            if offer.trending { "yes" } else { "" }
        );
    }
}

/// `--limit` when given, never above the configured fetch limit.
pub(crate) fn effective_limit(requested: Option<i64>, cap: i64) -> i64 {
    requested.map_or(cap, |limit| limit.min(cap))
}

/// List the `limit` most recent offers that pass `filters`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_offers_list(
    pool: &sqlx::PgPool,
    filters: &OfferFilters,
    limit: i64,
) -> anyhow::Result<()> {
    let offers: Vec<AffiliateOffer> = signagig_db::list_recent_offers(pool, limit)
        .await?
        .into_iter()
        .map(signagig_db::AffiliateOfferRow::into_offer)
        .collect();

    if offers.is_empty() {
        println!("no offers found; run `db seed` first");
        return Ok(());
    }

    let visible = filter_offers(&offers, filters);
    if visible.is_empty() {
        println!("no offers match the current filters");
        return Ok(());
    }

    print_offer_table(&visible);

    let summary = DashboardSummary::compute(&offers, None);
    println!();
    println!(
        "showing {} of {} offers; {} trending; average commission {}",
        visible.len(),
        summary.total_offers,
        summary.trending_now,
        summary
            .rounded_average_commission()
            .map_or_else(|| "-".to_string(), |avg| format!("{avg}%"))
    );

    Ok(())
}
