use chrono::{DateTime, Utc};

use super::bargain::{bargain_tags, description_contains};
use crate::types::{RawListing, SearchType, TagLabel};

/// Decide whether `listing` belongs in the result set for `search`.
/// Returns the tags to attach when it does; only bargain searches tag.
pub fn select(search: SearchType, listing: &RawListing, now: DateTime<Utc>) -> Option<Vec<TagLabel>> {
    match search {
        SearchType::Bargain => {
            let tags = bargain_tags(listing, now);
            (!tags.is_empty()).then_some(tags)
        }
        SearchType::Fixer => is_fixer_upper(listing).then(Vec::new),
        SearchType::School | SearchType::Subway => {
            listing.coordinates.is_complete().then(Vec::new)
        }
    }
}

pub fn is_fixer_upper(listing: &RawListing) -> bool {
    description_contains(listing, "sold as is")
}

/// Run `select` over a batch, keeping input order.
pub fn classify(
    search: SearchType,
    listings: &[RawListing],
    now: DateTime<Utc>,
) -> Vec<(&RawListing, Vec<TagLabel>)> {
    listings
        .iter()
        .filter_map(|l| select(search, l, now).map(|tags| (l, tags)))
        .collect()
}
