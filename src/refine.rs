use serde::{Deserialize, Deserializer};

use crate::types::ClassifiedListing;

/// Narrowing filters over an already-classified list. All set filters must
/// pass. Blank text filters and unparseable prices count as unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    #[serde(default, deserialize_with = "lenient_price")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.and_then(|s| s.trim().parse::<f64>().ok()))
}

fn needle(filter: &Option<String>) -> Option<String> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

impl Refinement {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && needle(&self.property_type).is_none()
            && needle(&self.tag).is_none()
    }

    pub fn matches(&self, listing: &ClassifiedListing) -> bool {
        // Unpriced listings pass both bounds.
        if let Some(price) = listing.asking_price {
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        if let Some(kind) = needle(&self.property_type) {
            if !listing.property_type.to_lowercase().contains(&kind) {
                return false;
            }
        }

        if let Some(tag) = needle(&self.tag) {
            if !listing.tags.iter().any(|t| t.as_str().contains(&tag)) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, listings: Vec<ClassifiedListing>) -> Vec<ClassifiedListing> {
        if self.is_empty() {
            return listings;
        }
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}
