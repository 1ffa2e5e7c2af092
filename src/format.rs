use crate::config::Config;
use crate::types::{ClassifiedListing, ListingAddress, RawListing, TagLabel};

pub const ADDRESS_PLACEHOLDER: &str = "Address not available";
pub const MLS_PLACEHOLDER: &str = "N/A";
pub const PROPERTY_TYPE_PLACEHOLDER: &str = "Unknown";

/// `"{number} {name} {suffix} Unit {unit}, {city}, {state}, {zip}"`, skipping
/// whatever is absent.
pub fn format_address(address: &ListingAddress) -> String {
    let unit = address.unit_number.as_ref().map(|u| format!("Unit {u}"));
    let street: Vec<&str> = [
        address.street_number.as_deref(),
        address.street_name.as_deref(),
        address.street_suffix.as_deref(),
        unit.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    let street_line = (!street.is_empty()).then(|| street.join(" "));

    let parts: Vec<&str> = [
        street_line.as_deref(),
        address.city.as_deref(),
        address.state.as_deref(),
        address.zip.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        ADDRESS_PLACEHOLDER.to_string()
    } else {
        parts.join(", ")
    }
}

/// Absolute image URL. Upstream images are usually CDN-relative paths.
pub fn thumbnail_url(image: &str, image_base_url: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!(
            "{}/{}",
            image_base_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }
}

pub fn listing_link(mls_number: &str, link_base: &str) -> String {
    format!("{}/{}", link_base.trim_end_matches('/'), mls_number)
}

pub fn to_classified(listing: &RawListing, tags: Vec<TagLabel>, cfg: &Config) -> ClassifiedListing {
    ClassifiedListing {
        mls_number: listing
            .mls_number
            .clone()
            .unwrap_or_else(|| MLS_PLACEHOLDER.to_string()),
        address: format_address(&listing.address),
        asking_price: listing.list_price,
        property_type: listing
            .property_type
            .clone()
            .unwrap_or_else(|| PROPERTY_TYPE_PLACEHOLDER.to_string()),
        thumbnail: listing
            .image
            .as_deref()
            .map(|i| thumbnail_url(i, &cfg.image_base_url)),
        external_link: listing
            .mls_number
            .as_deref()
            .map(|m| listing_link(m, &cfg.listing_link_base)),
        tags,
    }
}
