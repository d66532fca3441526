//! Offline unit tests for signagig-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::Utc;
use rust_decimal::Decimal;
use signagig_core::{match_by_niche, AppConfig, Environment};
use signagig_db::{AffiliateOfferRow, CreatorProfileRow, PoolConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use uuid::Uuid;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        offers_path: PathBuf::from("./config/offers.yaml"),
        offer_fetch_limit: 50,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

fn offer_row(name: &str, category: &str) -> AffiliateOfferRow {
    AffiliateOfferRow {
        id: Uuid::new_v4(),
        product_name: name.to_string(),
        category: category.to_string(),
        affiliate_platform: "Impact".to_string(),
        commission_rate: Decimal::new(10, 0),
        clicks: None,
        conversions: None,
        social_mentions: 0,
        trending: 0,
        description: String::new(),
        image_url: None,
        affiliate_url: "https://example.com".to_string(),
        created_at: Utc::now(),
    }
}

/// Rows read from storage flow through normalization into the matcher.
#[test]
fn stored_rows_feed_the_matcher() {
    let now = Utc::now();
    let profile = CreatorProfileRow {
        id: Uuid::new_v4(),
        user_id: "user-1".to_string(),
        primary_niche: "Fitness & Health".to_string(),
        platforms: Some(r#"["Instagram"]"#.to_string()),
        country: "United States".to_string(),
        audience_size: "1K - 10K followers".to_string(),
        affiliate_platforms: Some("Impact,ClickBank".to_string()),
        created_at: now,
        updated_at: now,
    }
    .into_profile();
    assert_eq!(profile.platforms, vec!["Instagram"]);
    assert_eq!(profile.affiliate_platforms, vec!["Impact", "ClickBank"]);

    let offers: Vec<_> = [
        offer_row("Protein", "Health"),
        offer_row("Keyboard", "Technology"),
    ]
    .into_iter()
    .map(AffiliateOfferRow::into_offer)
    .collect();

    let matched = match_by_niche(&offers, Some(&profile));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].product_name, "Protein");
}
