//! Recommendation tagging over a synthesized offer set.
//!
//! Each offer gets at most one tag, first match wins:
//!
//! 1. `BestValue` when `price_rank + time_rank <= 2` and the offer is neither
//!    at the cheapest fare nor at the fastest total time.
//! 2. `LowestPrice` when its fare equals the cheapest fare.
//! 3. `FastestArrival` when its total time equals the fastest total time.
//!
//! Ranks count offers that are strictly cheaper / strictly faster. Ties are
//! tag-inclusive: every offer sharing the cheapest fare gets `LowestPrice`.

use crate::offers::{RecommendationTag, RideOffer};

/// Combined rank at or below which an offer counts as good value.
pub const BEST_VALUE_MAX_COMBINED_RANK: usize = 2;

/// Return `offers` in input order with recommendation tags filled in.
pub fn rank(offers: Vec<RideOffer>) -> Vec<RideOffer> {
    let Some(cheapest_fare) = offers.iter().map(|offer| offer.fare).min() else {
        return offers;
    };
    let Some(fastest_total) = offers.iter().map(RideOffer::total_time_minutes).min() else {
        return offers;
    };

    let tags: Vec<Option<RecommendationTag>> = offers
        .iter()
        .map(|offer| recommendation_for(offer, &offers, cheapest_fare, fastest_total))
        .collect();

    offers
        .into_iter()
        .zip(tags)
        .map(|(offer, recommendation)| RideOffer {
            recommendation,
            ..offer
        })
        .collect()
}

fn recommendation_for(
    offer: &RideOffer,
    all: &[RideOffer],
    cheapest_fare: u32,
    fastest_total: u32,
) -> Option<RecommendationTag> {
    let total = offer.total_time_minutes();
    let is_lowest = offer.fare == cheapest_fare;
    let is_fastest = total == fastest_total;

    let price_rank = all.iter().filter(|other| other.fare < offer.fare).count();
    let time_rank = all
        .iter()
        .filter(|other| other.total_time_minutes() < total)
        .count();

    if price_rank + time_rank <= BEST_VALUE_MAX_COMBINED_RANK && !is_lowest && !is_fastest {
        Some(RecommendationTag::BestValue)
    } else if is_lowest {
        Some(RecommendationTag::LowestPrice)
    } else if is_fastest {
        Some(RecommendationTag::FastestArrival)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::ProviderId;

    fn offer(fare: u32, eta: u32, travel: u32) -> RideOffer {
        RideOffer {
            provider: ProviderId::Uber,
            tier_name: format!("tier-{fare}"),
            fare,
            eta_minutes: eta,
            travel_time_minutes: travel,
            rating: 4.5,
            recommendation: None,
        }
    }

    fn tags(offers: &[RideOffer]) -> Vec<Option<RecommendationTag>> {
        offers.iter().map(|offer| offer.recommendation).collect()
    }

    #[test]
    fn empty_input_is_returned_untouched() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn typical_set_gets_price_time_and_value_tags() {
        use RecommendationTag::*;
        let ranked = rank(vec![
            offer(200, 4, 30), // total 34, price rank 1, time rank 1 -> value
            offer(180, 7, 30), // total 37, price rank 0 -> lowest
            offer(250, 2, 25), // total 27 -> fastest
            offer(330, 5, 31), // total 36, price rank 4
            offer(300, 6, 31), // total 37, price rank 3, time rank 3
        ]);
        assert_eq!(
            tags(&ranked),
            vec![Some(BestValue), Some(LowestPrice), Some(FastestArrival), None, None]
        );
    }

    #[test]
    fn offer_both_cheapest_and_fastest_is_tagged_lowest_price() {
        let ranked = rank(vec![
            offer(100, 2, 10),
            offer(200, 5, 20),
            offer(300, 6, 30),
        ]);
        assert_eq!(ranked[0].recommendation, Some(RecommendationTag::LowestPrice));
        assert!(ranked
            .iter()
            .all(|offer| offer.recommendation != Some(RecommendationTag::FastestArrival)));
    }

    #[test]
    fn extreme_times_rank_without_overflow() {
        use RecommendationTag::*;
        let ranked = rank(vec![
            offer(100, u32::MAX, 10),
            offer(200, u32::MAX, u32::MAX),
            offer(300, 2, 10),
        ]);
        assert_eq!(
            tags(&ranked),
            vec![Some(LowestPrice), Some(BestValue), Some(FastestArrival)]
        );
    }

    #[test]
    fn single_offer_is_lowest_price() {
        let ranked = rank(vec![offer(150, 3, 12)]);
        assert_eq!(tags(&ranked), vec![Some(RecommendationTag::LowestPrice)]);
    }

    #[test]
    fn output_preserves_input_order_and_values() {
        let input = vec![offer(210, 4, 30), offer(190, 6, 29), offer(400, 3, 28)];
        let ranked = rank(input.clone());
        for (before, after) in input.iter().zip(&ranked) {
            assert_eq!(before.fare, after.fare);
            assert_eq!(before.tier_name, after.tier_name);
            assert_eq!(before.total_time_minutes(), after.total_time_minutes());
        }
    }
}
