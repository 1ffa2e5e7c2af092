use chrono::{DateTime, Duration, Months, Utc};

use crate::config::bargain_thresholds::{HUGE_PROFIT_MULTIPLIER, QUICK_POSSESSION_DAYS, STALE_DAYS};
use crate::types::{RawListing, TagLabel};

/// Days on market: the provider's own count when present (zero included),
/// else whole days since `listDate`, else 0.
pub fn days_on_market(listing: &RawListing, now: DateTime<Utc>) -> i64 {
    if let Some(days) = listing.simple_days_on_market {
        return days;
    }
    match listing.list_date {
        Some(listed) => (now - listed).num_milliseconds().div_euclid(86_400_000),
        None => 0,
    }
}

/// `now` with the year field decremented, same month/day and time of day.
/// Feb 29 clamps to Feb 28 of the previous year; it never rolls over to Mar 1.
pub fn one_year_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(12))
        .unwrap_or_else(|| now - Duration::days(365))
}

pub fn is_long_time_no_sold(listing: &RawListing, now: DateTime<Utc>) -> bool {
    days_on_market(listing, now) >= STALE_DAYS
}

pub fn is_reposted(listing: &RawListing, now: DateTime<Utc>) -> bool {
    listing
        .timestamps
        .terminated_date
        .is_some_and(|t| t >= one_year_before(now))
}

/// `(list, original)` when both are usable for a price comparison.
fn comparable_prices(listing: &RawListing) -> Option<(f64, f64)> {
    let original = listing.original_price?;
    let list = listing.list_price.filter(|p| *p > 0.0)?;
    Some((list, original))
}

pub fn is_selling_at_loss(listing: &RawListing) -> bool {
    comparable_prices(listing).is_some_and(|(list, original)| list < original)
}

pub fn is_selling_at_huge_profit(listing: &RawListing) -> bool {
    comparable_prices(listing)
        .is_some_and(|(list, original)| list >= original * HUGE_PROFIT_MULTIPLIER)
}

pub fn is_quick_possession(listing: &RawListing, now: DateTime<Utc>) -> bool {
    let horizon = now + Duration::days(QUICK_POSSESSION_DAYS);
    listing
        .timestamps
        .possession_date
        .is_some_and(|p| p >= now && p <= horizon)
}

pub fn is_last_deal_fell_through(listing: &RawListing) -> bool {
    listing.timestamps.conditional_expiry_date.is_some() && listing.timestamps.closed_date.is_none()
}

pub fn is_estate_sale(listing: &RawListing) -> bool {
    description_contains(listing, "estate")
}

/// Case-insensitive substring match on the description; absent reads as "".
pub fn description_contains(listing: &RawListing, needle: &str) -> bool {
    listing
        .description
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Every bargain criterion the listing satisfies, in fixed order.
/// Empty means the listing is not a bargain.
pub fn bargain_tags(listing: &RawListing, now: DateTime<Utc>) -> Vec<TagLabel> {
    let checks = [
        (TagLabel::LongTimeNoSold, is_long_time_no_sold(listing, now)),
        (TagLabel::Reposted, is_reposted(listing, now)),
        (TagLabel::SellingAtLoss, is_selling_at_loss(listing)),
        (TagLabel::SellingAtHugeProfit, is_selling_at_huge_profit(listing)),
        (TagLabel::Quicky, is_quick_possession(listing, now)),
        (TagLabel::LastDealFellThrough, is_last_deal_fell_through(listing)),
        (TagLabel::EstateSell, is_estate_sale(listing)),
    ];
    checks
        .into_iter()
        .filter_map(|(tag, hit)| hit.then_some(tag))
        .collect()
}

pub fn is_bargain(listing: &RawListing, now: DateTime<Utc>) -> bool {
    !bargain_tags(listing, now).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn quiet() -> RawListing {
        RawListing {
            simple_days_on_market: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_zero_days_is_not_recomputed() {
        let listing = RawListing {
            simple_days_on_market: Some(0),
            list_date: Some(now() - Duration::days(400)),
            ..Default::default()
        };
        assert_eq!(days_on_market(&listing, now()), 0);
        assert!(!is_long_time_no_sold(&listing, now()));
    }

    #[test]
    fn days_fall_back_to_list_date_then_zero() {
        let listing = RawListing {
            list_date: Some(now() - Duration::days(60) + Duration::hours(1)),
            ..Default::default()
        };
        assert_eq!(days_on_market(&listing, now()), 59);

        let listing = RawListing {
            list_date: Some(now() - Duration::days(60)),
            ..Default::default()
        };
        assert_eq!(days_on_market(&listing, now()), 60);
        assert!(is_long_time_no_sold(&listing, now()));

        assert_eq!(days_on_market(&RawListing::default(), now()), 0);
    }

    #[test]
    fn future_list_date_floors_negative() {
        let listing = RawListing {
            list_date: Some(now() + Duration::hours(1)),
            ..Default::default()
        };
        assert_eq!(days_on_market(&listing, now()), -1);
    }

    #[test]
    fn reposted_window_boundaries() {
        let year_ago = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(one_year_before(now()), year_ago);

        let inside = RawListing {
            timestamps: crate::types::ListingTimestamps {
                terminated_date: Some(year_ago + Duration::days(1)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(is_reposted(&inside, now()));

        let outside = RawListing {
            timestamps: crate::types::ListingTimestamps {
                terminated_date: Some(year_ago - Duration::days(1)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!is_reposted(&outside, now()));
        assert!(!is_reposted(&quiet(), now()));
    }

    #[test]
    fn one_year_before_leap_day_clamps() {
        let leap = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(
            one_year_before(leap),
            Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn equal_prices_are_neither_loss_nor_profit() {
        let listing = RawListing {
            list_price: Some(500_000.0),
            original_price: Some(500_000.0),
            ..Default::default()
        };
        assert!(!is_selling_at_loss(&listing));
        assert!(!is_selling_at_huge_profit(&listing));
    }

    #[test]
    fn double_price_is_huge_profit() {
        let listing = RawListing {
            list_price: Some(600_000.0),
            original_price: Some(300_000.0),
            ..Default::default()
        };
        assert!(is_selling_at_huge_profit(&listing));
        assert!(!is_selling_at_loss(&listing));
    }

    #[test]
    fn loss_requires_positive_list_price() {
        let loss = RawListing {
            list_price: Some(400_000.0),
            original_price: Some(500_000.0),
            ..Default::default()
        };
        assert!(is_selling_at_loss(&loss));

        let zero = RawListing {
            list_price: Some(0.0),
            original_price: Some(500_000.0),
            ..Default::default()
        };
        assert!(!is_selling_at_loss(&zero));

        let no_original = RawListing {
            list_price: Some(400_000.0),
            ..Default::default()
        };
        assert!(!is_selling_at_loss(&no_original));
    }

    #[test]
    fn quick_possession_boundaries() {
        let with_possession = |p| RawListing {
            timestamps: crate::types::ListingTimestamps {
                possession_date: Some(p),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(is_quick_possession(&with_possession(now()), now()));
        assert!(is_quick_possession(&with_possession(now() + Duration::days(30)), now()));
        assert!(!is_quick_possession(&with_possession(now() + Duration::days(31)), now()));
        assert!(!is_quick_possession(&with_possession(now() - Duration::days(1)), now()));
    }

    #[test]
    fn fallen_through_deal_is_included_regardless_of_other_fields() {
        let listing = RawListing {
            simple_days_on_market: Some(1),
            list_price: Some(500_000.0),
            original_price: Some(500_000.0),
            description: Some("Lovely family home".to_string()),
            timestamps: crate::types::ListingTimestamps {
                conditional_expiry_date: Some(now() - Duration::days(3)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(bargain_tags(&listing, now()), vec![TagLabel::LastDealFellThrough]);

        let closed = RawListing {
            timestamps: crate::types::ListingTimestamps {
                conditional_expiry_date: Some(now() - Duration::days(3)),
                closed_date: Some(now() - Duration::days(1)),
                ..Default::default()
            },
            ..listing
        };
        assert!(!is_bargain(&closed, now()));
    }

    #[test]
    fn estate_match_is_case_insensitive() {
        let listing = RawListing {
            description: Some("ESTATE SALE, sold as is".to_string()),
            ..Default::default()
        };
        assert!(is_estate_sale(&listing));
        assert!(!is_estate_sale(&quiet()));
    }

    #[test]
    fn stale_listing_gets_single_tag() {
        let listing = RawListing {
            simple_days_on_market: Some(65),
            list_price: Some(500_000.0),
            ..Default::default()
        };
        assert_eq!(bargain_tags(&listing, now()), vec![TagLabel::LongTimeNoSold]);
    }

    #[test]
    fn quiet_listing_is_not_a_bargain() {
        assert!(bargain_tags(&quiet(), now()).is_empty());
        assert!(!is_bargain(&quiet(), now()));
    }

    #[test]
    fn tags_follow_fixed_order() {
        let listing = RawListing {
            simple_days_on_market: Some(90),
            list_price: Some(350_000.0),
            original_price: Some(400_000.0),
            description: Some("Estate of the late owner".to_string()),
            timestamps: crate::types::ListingTimestamps {
                terminated_date: Some(now() - Duration::days(30)),
                possession_date: Some(now() + Duration::days(10)),
                conditional_expiry_date: Some(now() - Duration::days(5)),
                closed_date: None,
            },
            ..Default::default()
        };
        assert_eq!(
            bargain_tags(&listing, now()),
            vec![
                TagLabel::LongTimeNoSold,
                TagLabel::Reposted,
                TagLabel::SellingAtLoss,
                TagLabel::Quicky,
                TagLabel::LastDealFellThrough,
                TagLabel::EstateSell,
            ]
        );
    }
}
