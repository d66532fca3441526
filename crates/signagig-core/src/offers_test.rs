use chrono::Utc;

use super::*;

fn make_offer(name: &str, category: &str, platform: &str, commission: f64) -> AffiliateOffer {
    AffiliateOffer {
        id: Uuid::new_v4(),
        product_name: name.to_string(),
        category: category.to_string(),
        affiliate_platform: platform.to_string(),
        commission_rate: commission,
        clicks: None,
        conversions: None,
        social_mentions: 0,
        trending: false,
        description: String::new(),
        image_url: None,
        affiliate_url: format!("https://example.com/{name}"),
        created_at: Utc::now(),
    }
}

fn make_profile(niche: &str) -> CreatorProfile {
    let now = Utc::now();
    CreatorProfile {
        id: Uuid::new_v4(),
        user_id: "user-1".to_string(),
        primary_niche: niche.to_string(),
        platforms: vec!["Instagram".to_string()],
        country: "United States".to_string(),
        audience_size: "10K - 50K followers".to_string(),
        affiliate_platforms: vec!["Impact".to_string()],
        created_at: now,
        updated_at: now,
    }
}

fn catalog() -> Vec<AffiliateOffer> {
    vec![
        make_offer("Running Shoes Pro", "Fashion & Style", "Amazon Associates", 8.0),
        make_offer("Protein Blend", "Health", "ClickBank", 30.0),
        make_offer("Shoe Cleaner Kit", "Home & Garden", "ShareASale", 12.0),
        make_offer("Yoga Mat", "Fitness & Health", "Impact", 10.0),
        make_offer("Trail Shoe", "Fashion & Style", "Impact", 6.0),
    ]
}

fn names(offers: &[&AffiliateOffer]) -> Vec<String> {
    offers.iter().map(|o| o.product_name.clone()).collect()
}

#[test]
fn match_by_niche_without_profile_is_identity() {
    let offers = catalog();
    let matched = match_by_niche(&offers, None);
    assert_eq!(matched.len(), offers.len());
    assert!(matched.iter().zip(&offers).all(|(a, b)| *a == b));
}

#[test]
fn match_by_niche_accepts_category_inside_niche() {
    let offers = catalog();
    let profile = make_profile("Fitness & Health");
    let matched = match_by_niche(&offers, Some(&profile));
    assert_eq!(names(&matched), vec!["Protein Blend", "Yoga Mat"]);
}

#[test]
fn match_by_niche_accepts_niche_inside_category() {
    let offers = catalog();
    let profile = make_profile("fashion");
    let matched = match_by_niche(&offers, Some(&profile));
    assert_eq!(names(&matched), vec!["Running Shoes Pro", "Trail Shoe"]);
}

#[test]
fn match_by_niche_is_case_insensitive() {
    let offers = vec![make_offer("Console", "GAMING", "Impact", 5.0)];
    let profile = make_profile("gaming");
    assert_eq!(match_by_niche(&offers, Some(&profile)).len(), 1);
}

#[test]
fn match_by_niche_keeps_loose_short_category_matches() {
    // Short categories match inside unrelated niches; kept as-is.
    let offers = vec![make_offer("Meal Kit", "Food", "Impact", 5.0)];
    let profile = make_profile("Seafood Reviews");
    assert_eq!(match_by_niche(&offers, Some(&profile)).len(), 1);
}

#[test]
fn match_by_niche_excludes_unrelated_categories() {
    let offers = catalog();
    let profile = make_profile("Gaming");
    assert!(match_by_niche(&offers, Some(&profile)).is_empty());
}

#[test]
fn filter_offers_with_neutral_filters_is_identity() {
    let offers = catalog();
    let filters = OfferFilters::default();
    assert!(filters.is_neutral());
    let filtered = filter_offers(&offers, &filters);
    assert_eq!(filtered.len(), offers.len());
    assert!(filtered.iter().zip(&offers).all(|(a, b)| *a == b));
}

#[test]
fn filter_offers_query_matches_name_or_category() {
    let offers = catalog();
    let filters = OfferFilters {
        query: "HEALTH".to_string(),
        ..OfferFilters::default()
    };
    assert_eq!(
        names(&filter_offers(&offers, &filters)),
        vec!["Protein Blend", "Yoga Mat"]
    );

    let filters = OfferFilters {
        query: "shoe".to_string(),
        ..OfferFilters::default()
    };
    assert_eq!(
        names(&filter_offers(&offers, &filters)),
        vec!["Running Shoes Pro", "Shoe Cleaner Kit", "Trail Shoe"]
    );
}

#[test]
fn filter_offers_composes_query_and_category() {
    let offers = catalog();
    let filters = OfferFilters {
        query: "shoe".to_string(),
        category: Selection::from_param(Some("Fashion & Style")),
        platform: Selection::from_param(Some("all")),
    };
    assert_eq!(
        names(&filter_offers(&offers, &filters)),
        vec!["Running Shoes Pro", "Trail Shoe"]
    );
}

#[test]
fn filter_offers_category_is_case_sensitive() {
    let offers = catalog();
    let filters = OfferFilters {
        category: Selection::Only("fashion & style".to_string()),
        ..OfferFilters::default()
    };
    assert!(filter_offers(&offers, &filters).is_empty());
}

#[test]
fn filter_offers_platform_is_exact() {
    let offers = catalog();
    let filters = OfferFilters {
        platform: Selection::Only("Impact".to_string()),
        ..OfferFilters::default()
    };
    assert_eq!(
        names(&filter_offers(&offers, &filters)),
        vec!["Yoga Mat", "Trail Shoe"]
    );
}

#[test]
fn filter_offers_all_predicates_and_together() {
    let offers = catalog();
    let filters = OfferFilters {
        query: "shoe".to_string(),
        category: Selection::Only("Fashion & Style".to_string()),
        platform: Selection::Only("Impact".to_string()),
    };
    assert_eq!(names(&filter_offers(&offers, &filters)), vec!["Trail Shoe"]);
}

#[test]
fn filter_offers_on_empty_list_is_empty() {
    let filters = OfferFilters {
        query: "anything".to_string(),
        ..OfferFilters::default()
    };
    assert!(filter_offers(&[], &filters).is_empty());
    assert!(match_by_niche(&[], Some(&make_profile("Gaming"))).is_empty());
}

#[test]
fn selection_from_param() {
    assert_eq!(Selection::from_param(None), Selection::All);
    assert_eq!(Selection::from_param(Some("all")), Selection::All);
    assert_eq!(
        Selection::from_param(Some("All")),
        Selection::Only("All".to_string())
    );
}

#[test]
fn average_commission_is_none_for_empty_list() {
    assert_eq!(average_commission_rate(&[]), None);
}

#[test]
fn average_commission_is_the_mean() {
    let offers = catalog();
    let avg = average_commission_rate(&offers).expect("average");
    assert!((avg - 13.2).abs() < f64::EPSILON * 100.0);
}

#[test]
fn trending_count_counts_flagged_offers() {
    let mut offers = catalog();
    offers[1].trending = true;
    offers[3].trending = true;
    assert_eq!(trending_count(&offers), 2);
}

#[test]
fn distinct_options_keep_first_seen_order() {
    let offers = catalog();
    assert_eq!(
        distinct_categories(&offers),
        vec!["Fashion & Style", "Health", "Home & Garden", "Fitness & Health"]
    );
    assert_eq!(
        distinct_platforms(&offers),
        vec!["Amazon Associates", "ClickBank", "ShareASale", "Impact"]
    );
}

#[test]
fn dashboard_summary_counts() {
    let mut offers = catalog();
    offers[0].trending = true;
    let profile = make_profile("Fitness & Health");
    let summary = DashboardSummary::compute(&offers, Some(&profile));
    assert_eq!(summary.total_offers, 5);
    assert_eq!(summary.matched_offers, 2);
    assert_eq!(summary.trending_now, 1);
    assert_eq!(summary.rounded_average_commission(), Some(13));
}

#[test]
fn dashboard_summary_on_empty_catalog_has_no_average() {
    let summary = DashboardSummary::compute(&[], None);
    assert_eq!(summary.total_offers, 0);
    assert_eq!(summary.matched_offers, 0);
    assert_eq!(summary.average_commission_rate, None);
    assert_eq!(summary.rounded_average_commission(), None);
}
