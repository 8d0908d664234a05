use super::common::*;
use std::sync::Arc;

use crate::advisor::{
    best_value, AdvisorError, AdvisorService, ModelListing, RecommendationQuery,
    EMPTY_CATALOG_WARNING, UNKNOWN_BRAND,
};
use crate::catalog::CatalogStore;
use crate::engine::{
    BrandId, ComparisonEngine, Criterion, MachineCategory, NarrativeStrategy, ProfileId,
    NO_CANDIDATES,
};

fn query(profile: &str) -> RecommendationQuery {
    RecommendationQuery {
        profile_id: ProfileId(profile.to_string()),
        brand_id: None,
        category: None,
    }
}

fn names(recommendation: &crate::advisor::Recommendation) -> Vec<&str> {
    recommendation
        .top3
        .iter()
        .map(|entry| entry.name.as_str())
        .collect()
}

#[test]
fn balanced_profile_ranks_lean_machines_first() {
    let (service, _) = build_service();

    let recommendation = service.recommend(&query("balanced")).expect("recommendation");

    assert_eq!(names(&recommendation), ["Breeze Air", "Breeze Mini", "Apex Book"]);
    assert_eq!(recommendation.top3[0].score, 0.675);
    assert_eq!(recommendation.top3[1].score, 0.625);
    assert_eq!(recommendation.top3[2].score, 0.4125);
    assert_eq!(recommendation.strategy, Some(NarrativeStrategy::Balanced));
    // All four weights tie, so no single criterion is reported.
    assert!(recommendation.dominant_criterion.is_none());
    assert_eq!(recommendation.evaluated_candidates, 4);
    assert!(recommendation
        .recommendation
        .starts_with("For the Everyday profile: Breeze Air"));
    assert!(recommendation.recommendation.contains("score: 0.675"));
}

#[test]
fn price_profile_reports_savings_against_runner_up() {
    let (service, _) = build_service();

    let recommendation = service.recommend(&query("budget")).expect("recommendation");

    assert_eq!(names(&recommendation), ["Breeze Mini", "Breeze Air", "Apex Book"]);
    assert_eq!(recommendation.strategy, Some(NarrativeStrategy::PriceFocused));
    assert!(recommendation.recommendation.contains("save $150"));
}

#[test]
fn performance_profile_reports_gap() {
    let (service, _) = build_service();

    let recommendation = service.recommend(&query("gaming")).expect("recommendation");

    assert_eq!(names(&recommendation), ["Apex Tower", "Breeze Mini", "Apex Book"]);
    assert_eq!(recommendation.top3[0].score, 0.7);
    assert_eq!(
        recommendation.strategy,
        Some(NarrativeStrategy::PerformanceFocused)
    );
    assert_eq!(recommendation.dominant_criterion, Some(Criterion::Performance));
    assert!(recommendation
        .recommendation
        .contains("20 points ahead of Breeze Mini"));
}

#[test]
fn brand_filter_rebuilds_bounds_for_the_brand() {
    let (service, _) = build_service();
    let mut query = query("budget");
    query.brand_id = Some(BrandId("apex".to_string()));

    let recommendation = service.recommend(&query).expect("recommendation");

    assert_eq!(names(&recommendation), ["Apex Book", "Apex Tower"]);
    assert_eq!(recommendation.top3[0].score, 0.9);
    assert_eq!(recommendation.top3[1].score, 0.1);
    assert!(recommendation.recommendation.contains("save $200"));
}

#[test]
fn category_filter_limits_to_laptops() {
    let (service, _) = build_service();
    let mut query = query("gaming");
    query.category = Some(MachineCategory::Laptop);

    let recommendation = service.recommend(&query).expect("recommendation");

    assert_eq!(names(&recommendation), ["Apex Book", "Breeze Air"]);
    assert!(recommendation
        .top3
        .iter()
        .all(|entry| entry.category == MachineCategory::Laptop));
    assert!(recommendation.recommendation.contains("10 points ahead"));
}

#[test]
fn empty_selection_returns_message() {
    let (service, _) = build_service();
    let mut query = query("gaming");
    query.brand_id = Some(BrandId("nobody".to_string()));

    let recommendation = service.recommend(&query).expect("empty result is not an error");

    assert!(recommendation.top3.is_empty());
    assert_eq!(recommendation.recommendation, NO_CANDIDATES);
    assert!(recommendation.strategy.is_none());
}

#[test]
fn unknown_profile_is_rejected_before_scoring() {
    let (service, _) = build_service();

    let err = service
        .recommend(&query("missing"))
        .expect_err("profile must exist");

    match err {
        AdvisorError::ProfileNotFound(id) => assert_eq!(id.0, "missing"),
        other => panic!("expected missing profile, got {other:?}"),
    }
}

#[test]
fn calibrating_with_identical_weights_has_no_delta() {
    let (service, _) = build_service();
    let current = weights([0.1, 0.6, 0.2, 0.1]);

    let report = service
        .calibrate(&ProfileId("budget".to_string()), current, false)
        .expect("calibration");

    assert_eq!(report.rows.len(), 4);
    assert!(report.rows.iter().all(|row| row.delta == 0.0));
    assert!(!report.applied);
    assert!(report.message.is_none());
}

#[test]
fn calibration_orders_by_proposed_score_and_reports_deltas() {
    let (service, store) = build_service();
    let proposed = weights([0.7, 0.1, 0.1, 0.1]);

    let report = service
        .calibrate(&ProfileId("budget".to_string()), proposed, false)
        .expect("calibration");

    let order: Vec<_> = report.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(order, ["Apex Tower", "Breeze Mini", "Apex Book", "Breeze Air"]);
    let tower = &report.rows[0];
    assert_eq!(tower.score_under_current, 0.1);
    assert_eq!(tower.score_under_proposed, 0.7);
    assert_eq!(tower.delta, 0.6);

    let stored = store
        .profile(&ProfileId("budget".to_string()))
        .expect("store reads")
        .expect("profile exists");
    assert_eq!(stored.weights, weights([0.1, 0.6, 0.2, 0.1]));
}

#[test]
fn applying_calibration_saves_weights() {
    let (service, store) = build_service();
    let proposed = weights([0.3, 0.3, 0.2, 0.2]);

    let report = service
        .calibrate(&ProfileId("gaming".to_string()), proposed, true)
        .expect("calibration");

    assert!(report.applied);
    assert_eq!(report.current, weights([0.7, 0.1, 0.1, 0.1]));
    let stored = store
        .profile(&ProfileId("gaming".to_string()))
        .expect("store reads")
        .expect("profile exists");
    assert_eq!(stored.weights, proposed);
}

#[test]
fn negative_proposed_weight_is_rejected() {
    let (service, _) = build_service();

    let err = service
        .calibrate(
            &ProfileId("gaming".to_string()),
            weights([0.3, -0.3, 0.2, 0.2]),
            true,
        )
        .expect_err("negative weight rejected");

    assert!(matches!(err, AdvisorError::InvalidWeights(_)));
}

#[test]
fn calibrating_an_empty_catalog_warns() {
    let service = AdvisorService::new(
        Arc::new(MemoryCatalog::with_profiles_only()),
        ComparisonEngine::default(),
    );

    let report = service
        .calibrate(
            &ProfileId("balanced".to_string()),
            weights([0.4, 0.2, 0.2, 0.2]),
            false,
        )
        .expect("calibration");

    assert!(report.rows.is_empty());
    assert_eq!(report.message.as_deref(), Some(EMPTY_CATALOG_WARNING));
}

#[test]
fn unavailable_store_surfaces_catalog_error() {
    let service = AdvisorService::new(Arc::new(UnavailableCatalog), ComparisonEngine::default());

    let err = service
        .recommend(&query("balanced"))
        .expect_err("store offline");

    assert!(matches!(err, AdvisorError::Catalog(_)));
}

#[test]
fn brands_are_distinct_and_sorted() {
    let (service, _) = build_service();

    let brands = service.brands().expect("brands");

    assert_eq!(
        brands,
        vec![BrandId("apex".to_string()), BrandId("breeze".to_string())]
    );
}

#[test]
fn model_search_is_case_insensitive() {
    let (service, _) = build_service();

    let models = service.models(Some(" APEX ")).expect("models");

    let found: Vec<_> = models.iter().map(|m| m.candidate.name.as_str()).collect();
    assert_eq!(found, ["Apex Tower", "Apex Book"]);
    assert!(models.iter().all(|m| m.brand == "apex"));

    assert!(service.models(Some("nothing like it")).expect("models").is_empty());
}

#[test]
fn blank_search_lists_whole_catalog() {
    let (service, _) = build_service();

    assert_eq!(service.models(None).expect("models").len(), 4);
    assert_eq!(service.models(Some("   ")).expect("models").len(), 4);
}

#[test]
fn unbranded_model_lists_unknown_brand() {
    let mut candidate = machine("m-9", "Kit Build", MachineCategory::Desktop, "x", [50.0; 4]);
    candidate.brand_id = None;

    let listing = ModelListing::from(candidate);

    assert_eq!(listing.brand, UNKNOWN_BRAND);
}

#[test]
fn summary_counts_catalog_and_picks_best_value() {
    let (service, _) = build_service();

    let summary = service.catalog_summary().expect("summary");

    assert_eq!(summary.models, 4);
    assert_eq!(summary.profiles, 3);
    assert_eq!(summary.brands, 2);
    let best = summary.best_value.expect("priced models exist");
    assert_eq!(best.name, "Breeze Mini");
    assert!((best.performance_per_price - 0.16).abs() < 1e-12);
}

#[test]
fn best_value_skips_unpriced_models() {
    let free = machine("m-0", "Giveaway", MachineCategory::Laptop, "x", [99.0, 0.0, 10.0, 40.0]);
    let priced = machine("m-1", "Paid", MachineCategory::Laptop, "x", [40.0, 400.0, 10.0, 40.0]);

    let best = best_value(&[free.clone(), priced]).expect("one priced model");
    assert_eq!(best.name, "Paid");

    assert!(best_value(&[free]).is_none());
    assert!(best_value(&[]).is_none());
}

#[test]
fn summary_of_empty_catalog_has_no_best_value() {
    let service = AdvisorService::new(
        Arc::new(MemoryCatalog::with_profiles_only()),
        ComparisonEngine::default(),
    );

    let summary = service.catalog_summary().expect("summary");

    assert_eq!(summary.models, 0);
    assert_eq!(summary.profiles, 3);
    assert!(summary.best_value.is_none());
}
