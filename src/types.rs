use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// Raw listing (upstream schema, after field-alias resolution)
// ---------------------------------------------------------------------------

/// One upstream listing with only the fields this service reads.
/// Every field is optional: absent or malformed data stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    /// `mlsNumber`, falling back to `mls`.
    pub mls_number: Option<String>,
    /// `listPrice`, falling back to `price`.
    pub list_price: Option<f64>,
    /// `originalPrice`, falling back to `soldPrice`.
    pub original_price: Option<f64>,
    pub simple_days_on_market: Option<i64>,
    pub list_date: Option<DateTime<Utc>>,
    /// `details.propertyType`, falling back to top-level `type`.
    pub property_type: Option<String>,
    pub description: Option<String>,
    /// `images[0]`
    pub image: Option<String>,
    pub address: ListingAddress,
    pub timestamps: ListingTimestamps,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingAddress {
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub unit_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTimestamps {
    pub terminated_date: Option<DateTime<Utc>>,
    pub possession_date: Option<DateTime<Utc>>,
    pub conditional_expiry_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

// ---------------------------------------------------------------------------
// Search type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Bargain,
    /// "sold as is" listings.
    Fixer,
    /// Placeholder: coordinates-present pass-through.
    School,
    /// Placeholder: coordinates-present pass-through.
    Subway,
}

impl std::str::FromStr for SearchType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bargain" => Ok(SearchType::Bargain),
            "fixer" => Ok(SearchType::Fixer),
            "school" => Ok(SearchType::School),
            "subway" => Ok(SearchType::Subway),
            _ => Err(AppError::InvalidSearchType(s.to_string())),
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchType::Bargain => "bargain",
            SearchType::Fixer => "fixer",
            SearchType::School => "school",
            SearchType::Subway => "subway",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Bargain criteria, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TagLabel {
    #[serde(rename = "long time no sold")]
    LongTimeNoSold,
    #[serde(rename = "reposted")]
    Reposted,
    #[serde(rename = "selling at a loss")]
    SellingAtLoss,
    #[serde(rename = "selling at huge profit")]
    SellingAtHugeProfit,
    #[serde(rename = "quicky")]
    Quicky,
    #[serde(rename = "last deal fell through")]
    LastDealFellThrough,
    #[serde(rename = "estate sell")]
    EstateSell,
}

impl TagLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagLabel::LongTimeNoSold => "long time no sold",
            TagLabel::Reposted => "reposted",
            TagLabel::SellingAtLoss => "selling at a loss",
            TagLabel::SellingAtHugeProfit => "selling at huge profit",
            TagLabel::Quicky => "quicky",
            TagLabel::LastDealFellThrough => "last deal fell through",
            TagLabel::EstateSell => "estate sell",
        }
    }
}

impl std::fmt::Display for TagLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classified listing (API output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedListing {
    pub mls_number: String,
    pub address: String,
    pub asking_price: Option<f64>,
    pub property_type: String,
    pub thumbnail: Option<String>,
    pub external_link: Option<String>,
    pub tags: Vec<TagLabel>,
}
