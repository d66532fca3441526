use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One offer entry in `config/offers.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferSeed {
    pub product_name: String,
    pub category: String,
    pub affiliate_platform: String,
    pub commission_rate: f64,
    #[serde(default)]
    pub clicks: Option<i64>,
    #[serde(default)]
    pub conversions: Option<i64>,
    #[serde(default)]
    pub social_mentions: i64,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    pub affiliate_url: String,
}

#[derive(Debug, Deserialize)]
pub struct OfferCatalog {
    pub offers: Vec<OfferSeed>,
}

/// Load and validate the offer catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_offer_catalog(path: &Path) -> Result<OfferCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::OffersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: OfferCatalog =
        serde_yaml::from_str(&content).map_err(ConfigError::OffersFileParse)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &OfferCatalog) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for offer in &catalog.offers {
        for (field, value) in [
            ("product_name", &offer.product_name),
            ("category", &offer.category),
            ("affiliate_platform", &offer.affiliate_platform),
            ("affiliate_url", &offer.affiliate_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "offer '{}' has an empty {field}",
                    offer.product_name
                )));
            }
        }

        if !(0.0..=100.0).contains(&offer.commission_rate) {
            return Err(ConfigError::Validation(format!(
                "offer '{}' has commission_rate {}; must be between 0 and 100",
                offer.product_name, offer.commission_rate
            )));
        }

        if offer.clicks.is_some_and(|n| n < 0)
            || offer.conversions.is_some_and(|n| n < 0)
            || offer.social_mentions < 0
        {
            return Err(ConfigError::Validation(format!(
                "offer '{}' has a negative counter",
                offer.product_name
            )));
        }

        let key = (
            offer.product_name.to_lowercase(),
            offer.affiliate_platform.to_lowercase(),
        );
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate offer: '{}' on '{}'",
                offer.product_name, offer.affiliate_platform
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(name: &str, platform: &str) -> OfferSeed {
        OfferSeed {
            product_name: name.to_string(),
            category: "Technology".to_string(),
            affiliate_platform: platform.to_string(),
            commission_rate: 10.0,
            clicks: None,
            conversions: None,
            social_mentions: 0,
            trending: false,
            description: String::new(),
            image_url: None,
            affiliate_url: "https://example.com/offer".to_string(),
        }
    }

    #[test]
    fn valid_catalog_passes() {
        let catalog = OfferCatalog {
            offers: vec![seed("Headphones", "Impact"), seed("Headphones", "ClickBank")],
        };
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn duplicate_offer_on_same_platform_fails() {
        let catalog = OfferCatalog {
            offers: vec![seed("Headphones", "Impact"), seed("headphones", "IMPACT")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate offer"), "{err}");
    }

    #[test]
    fn empty_product_name_fails() {
        let catalog = OfferCatalog {
            offers: vec![seed("  ", "Impact")],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("empty product_name"), "{err}");
    }

    #[test]
    fn commission_out_of_range_fails() {
        let mut offer = seed("Headphones", "Impact");
        offer.commission_rate = 150.0;
        let catalog = OfferCatalog {
            offers: vec![offer],
        };
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn negative_counter_fails() {
        let mut offer = seed("Headphones", "Impact");
        offer.clicks = Some(-1);
        let catalog = OfferCatalog {
            offers: vec![offer],
        };
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn yaml_defaults_optional_fields() {
        let yaml = r"
offers:
  - product_name: Standing Desk
    category: Home & Garden
    affiliate_platform: ShareASale
    commission_rate: 7.5
    affiliate_url: https://example.com/desk
";
        let catalog: OfferCatalog = serde_yaml::from_str(yaml).expect("parse");
        let offer = &catalog.offers[0];
        assert_eq!(offer.clicks, None);
        assert_eq!(offer.social_mentions, 0);
        assert!(!offer.trending);
        assert!(offer.description.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_offer_catalog(Path::new("/nonexistent/offers.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::OffersFileIo { .. }));
    }

    #[test]
    fn load_offer_catalog_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("offers.yaml");
        assert!(
            path.exists(),
            "offers.yaml missing at {path:?}; required for this test"
        );
        let result = load_offer_catalog(&path);
        assert!(result.is_ok(), "failed to load offers.yaml: {result:?}");
        assert!(!result.unwrap().offers.is_empty());
    }
}
