use super::common::*;
use crate::workflows::skin_quiz::domain::{
    Budget, ProductCategory, SkinConcern, SkinProfile, SkinType,
};
use crate::workflows::skin_quiz::recommendation::{
    contains_term, RecommendationConfig, RecommendationEngine, ScoringWeights, SignalKind,
};

#[test]
fn scores_every_matching_signal() {
    let engine = engine();

    let scored = engine.score(&oily_acne_profile(), &gel_cleanser());

    assert_eq!(scored.score, 95);
    assert_eq!(
        scored.match_reasons,
        vec![
            "Formulated for oily skin".to_string(),
            "Addresses acne".to_string(),
            "Contains salicylic acid".to_string(),
            "Matches your budget preference".to_string(),
        ]
    );
}

#[test]
fn ineligible_category_scores_zero_without_reasons() {
    let engine = engine();
    let jacket = item(
        "jacket",
        "oily skin acne salicylic acid",
        25.0,
        ProductCategory::Clothing,
    );

    let breakdown = engine.breakdown(&oily_acne_profile(), &jacket);

    assert_eq!(breakdown.score, 0);
    assert_eq!(breakdown.raw_total, 0);
    assert!(breakdown.signals.is_empty());
    assert!(engine
        .score(&oily_acne_profile(), &jacket)
        .match_reasons
        .is_empty());
}

#[test]
fn avoided_ingredient_only_clamps_to_zero() {
    let engine = engine();
    let profile = SkinProfile::new(SkinType::Dry)
        .with_avoided_ingredients(["fragrance"])
        .with_budget(Budget::Low);
    let mist = beauty_item("mist", "Facial mist with fragrance", 35.0);

    let breakdown = engine.breakdown(&profile, &mist);

    assert_eq!(breakdown.raw_total, -30);
    assert_eq!(breakdown.score, 0);
    assert_eq!(breakdown.signals.len(), 1);
    assert_eq!(breakdown.signals[0].kind, SignalKind::AvoidedIngredient);
    assert!(engine.score(&profile, &mist).match_reasons.is_empty());
    assert!(engine.recommend(&profile, &[mist], 10).is_empty());
}

#[test]
fn avoided_ingredients_reduce_score_but_stay_hidden() {
    let engine = engine();
    let profile = SkinProfile::new(SkinType::Oily)
        .with_avoided_ingredients(["Alcohol", "fragrance"])
        .with_budget(Budget::High);
    let toner = beauty_item("toner", "Oily skin toner with alcohol and fragrance", 30.0);

    let scored = engine.score(&profile, &toner);

    assert_eq!(scored.score, 0);
    let breakdown = engine.breakdown(&profile, &toner);
    assert_eq!(breakdown.raw_total, 50 - 30 - 30);

    let gentle = beauty_item("gentle", "Oily skin toner with a hint of fragrance", 30.0);
    let scored = engine.score(&profile, &gentle);
    assert_eq!(scored.score, 20);
    assert_eq!(scored.match_reasons, vec!["Formulated for oily skin".to_string()]);
    assert!(scored
        .match_reasons
        .iter()
        .all(|reason| !reason.contains("fragrance")));
}

#[test]
fn concerns_and_ingredients_accumulate() {
    let engine = engine();
    let profile = SkinProfile::new(SkinType::Combination)
        .with_concerns([SkinConcern::Redness, SkinConcern::LargePores, SkinConcern::Aging])
        .with_preferred_ingredients(["niacinamide", "zinc"])
        .with_budget(Budget::Low);
    let serum = beauty_item(
        "serum",
        "Niacinamide and zinc serum that calms redness and refines large pores",
        90.0,
    );

    let scored = engine.score(&profile, &serum);

    assert_eq!(scored.score, 20 + 20 + 15 + 15);
    assert_eq!(scored.match_reasons.len(), 4);
    assert_eq!(scored.match_reasons[1], "Addresses large pores");
}

#[test]
fn budget_band_boundaries_are_medium_inclusive() {
    let engine = engine();
    let medium = SkinProfile::new(SkinType::Normal).with_budget(Budget::Medium);
    let high = SkinProfile::new(SkinType::Normal).with_budget(Budget::High);
    let low = SkinProfile::new(SkinType::Normal).with_budget(Budget::Low);

    let at_twenty = beauty_item("twenty", "Cream", 20.0);
    let at_fifty = beauty_item("fifty", "Cream", 50.0);
    let under_twenty = beauty_item("under", "Cream", 19.99);
    let over_fifty = beauty_item("over", "Cream", 50.01);

    assert_eq!(engine.score(&medium, &at_twenty).score, 10);
    assert_eq!(engine.score(&medium, &at_fifty).score, 10);
    assert_eq!(engine.score(&high, &at_fifty).score, 0);
    assert_eq!(engine.score(&low, &at_twenty).score, 0);
    assert_eq!(engine.score(&low, &under_twenty).score, 10);
    assert_eq!(engine.score(&high, &over_fifty).score, 10);
    assert_eq!(engine.score(&medium, &over_fifty).score, 0);
}

#[test]
fn matching_ignores_case_and_uses_plain_containment() {
    let engine = engine();
    let profile = SkinProfile::new(SkinType::Dry)
        .with_concerns([SkinConcern::Dryness])
        .with_budget(Budget::High);
    let balm = beauty_item("balm", "DRY SKIN balm from the DrynessRelief line", 12.0);

    let scored = engine.score(&profile, &balm);

    assert_eq!(scored.score, 70);
    assert!(contains_term("drynessrelief balm", "Dryness"));
    assert!(!contains_term("hydrating balm", "dryness"));
}

#[test]
fn custom_weights_drive_the_formula() {
    let engine = RecommendationEngine::new(RecommendationConfig {
        weights: ScoringWeights {
            skin_type: 1,
            skin_concern: 2,
            preferred_ingredient: 4,
            avoid_ingredient: -8,
            budget_match: 16,
        },
        ..RecommendationConfig::default()
    });
    let profile = oily_acne_profile().with_avoided_ingredients(["gel"]);

    let breakdown = engine.breakdown(&profile, &gel_cleanser());

    assert_eq!(breakdown.raw_total, 1 + 2 + 4 - 8 + 16);
    assert_eq!(breakdown.score, 15);
    assert_eq!(
        breakdown
            .signals
            .iter()
            .map(|signal| signal.points)
            .collect::<Vec<_>>(),
        vec![1, 2, 4, -8, 16]
    );
}

#[test]
fn eligible_category_is_configurable() {
    let engine = RecommendationEngine::new(RecommendationConfig {
        eligible_category: ProductCategory::Other,
        ..RecommendationConfig::default()
    });
    let sampler = item("sampler", "Oily skin sampler", 25.0, ProductCategory::Other);

    assert_eq!(engine.score(&oily_acne_profile(), &sampler).score, 60);
    assert_eq!(engine.score(&oily_acne_profile(), &gel_cleanser()).score, 0);
}

#[test]
fn scoring_is_repeatable() {
    let engine = engine();
    let profile = oily_acne_profile();
    let catalog = ranked_catalog();

    assert_eq!(
        engine.score(&profile, &catalog[1]),
        engine.score(&profile, &catalog[1])
    );
    assert_eq!(
        engine.recommend(&profile, &catalog, 3),
        engine.recommend(&profile, &catalog, 3)
    );
}
