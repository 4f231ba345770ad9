use fare_core::offers::{ProviderId, RecommendationTag, RideOffer};
use fare_core::ranking::rank;
use fare_core::test_helpers::test_offer;
use proptest::prelude::*;

fn count(offers: &[RideOffer], tag: RecommendationTag) -> usize {
    offers
        .iter()
        .filter(|offer| offer.recommendation == Some(tag))
        .count()
}

// Tie-inclusive tagging is kept as observed behaviour, not because a single
// winner would be wrong. If the product decides on one winner per tag, these
// two tests are the ones to change.
#[test]
fn tied_cheapest_fares_both_get_lowest_price() {
    let ranked = rank(vec![
        test_offer(ProviderId::Uber, 150, 4, 30),
        test_offer(ProviderId::Ola, 150, 6, 31),
        test_offer(ProviderId::Rapido, 200, 2, 22),
        test_offer(ProviderId::Uber, 320, 5, 30),
        test_offer(ProviderId::Ola, 290, 5, 32),
    ]);
    assert_eq!(ranked[0].recommendation, Some(RecommendationTag::LowestPrice));
    assert_eq!(ranked[1].recommendation, Some(RecommendationTag::LowestPrice));
    assert_eq!(count(&ranked, RecommendationTag::LowestPrice), 2);
}

#[test]
fn tied_fastest_totals_both_get_fastest_arrival() {
    let ranked = rank(vec![
        test_offer(ProviderId::Rapido, 90, 2, 20),
        test_offer(ProviderId::Uber, 300, 3, 18),
        test_offer(ProviderId::Ola, 280, 1, 20),
        test_offer(ProviderId::Uber, 400, 6, 30),
        test_offer(ProviderId::Ola, 380, 6, 31),
    ]);
    assert_eq!(ranked[1].recommendation, Some(RecommendationTag::FastestArrival));
    assert_eq!(ranked[2].recommendation, Some(RecommendationTag::FastestArrival));
}

#[test]
fn best_value_sits_between_cheapest_and_fastest() {
    let ranked = rank(vec![
        test_offer(ProviderId::Uber, 200, 4, 30),
        test_offer(ProviderId::Ola, 180, 3, 22),
        test_offer(ProviderId::Rapido, 140, 2, 25),
        test_offer(ProviderId::Uber, 330, 3, 20),
        test_offer(ProviderId::Ola, 300, 6, 31),
    ]);
    let tags: Vec<_> = ranked.iter().map(|offer| offer.recommendation).collect();
    assert_eq!(
        tags,
        vec![
            None,
            Some(RecommendationTag::BestValue),
            Some(RecommendationTag::LowestPrice),
            Some(RecommendationTag::FastestArrival),
            None,
        ]
    );
}

fn arb_offer() -> impl Strategy<Value = RideOffer> {
    (1u32..600, 2u32..15, 8u32..90).prop_map(|(fare, eta, travel)| {
        test_offer(ProviderId::Uber, fare, eta, travel)
    })
}

proptest! {
    #[test]
    fn best_value_never_overlaps_cheapest_or_fastest(offers in prop::collection::vec(arb_offer(), 5)) {
        let cheapest = offers.iter().map(|offer| offer.fare).min().unwrap_or(0);
        let fastest = offers.iter().map(RideOffer::total_time_minutes).min().unwrap_or(0);
        let ranked = rank(offers);

        prop_assert_eq!(ranked.len(), 5);
        for offer in &ranked {
            if offer.recommendation == Some(RecommendationTag::BestValue) {
                prop_assert_ne!(offer.fare, cheapest);
                prop_assert_ne!(offer.total_time_minutes(), fastest);
            }
        }
    }

    #[test]
    fn every_cheapest_offer_is_tagged_lowest_price(offers in prop::collection::vec(arb_offer(), 5)) {
        let ranked = rank(offers);
        let cheapest = ranked.iter().map(|offer| offer.fare).min().unwrap_or(0);

        prop_assert!(count(&ranked, RecommendationTag::LowestPrice) >= 1);
        for offer in ranked.iter().filter(|offer| offer.fare == cheapest) {
            prop_assert_eq!(offer.recommendation, Some(RecommendationTag::LowestPrice));
        }
    }

    #[test]
    fn fastest_offer_is_tagged_unless_also_cheapest(offers in prop::collection::vec(arb_offer(), 5)) {
        let ranked = rank(offers);
        let cheapest = ranked.iter().map(|offer| offer.fare).min().unwrap_or(0);
        let fastest = ranked.iter().map(RideOffer::total_time_minutes).min().unwrap_or(0);

        for offer in ranked.iter().filter(|offer| offer.total_time_minutes() == fastest) {
            let expected = if offer.fare == cheapest {
                RecommendationTag::LowestPrice
            } else {
                RecommendationTag::FastestArrival
            };
            prop_assert_eq!(offer.recommendation, Some(expected));
        }
    }

    #[test]
    fn ranking_keeps_offer_values(offers in prop::collection::vec(arb_offer(), 0..8)) {
        let ranked = rank(offers.clone());
        prop_assert_eq!(ranked.len(), offers.len());
        for (before, after) in offers.iter().zip(&ranked) {
            prop_assert_eq!(before.fare, after.fare);
            prop_assert_eq!(before.eta_minutes, after.eta_minutes);
            prop_assert_eq!(before.travel_time_minutes, after.travel_time_minutes);
        }
    }
}
