// Integration tests for RUSE Match

use ruse_match::config::Settings;
use ruse_match::core::{apply_filter, Ranker, SafetyValidator};
use ruse_match::models::*;
use ruse_match::services::ProgramCatalog;

const CATALOG: &str = include_str!("../data/programs.json");

fn create_test_user(age: u8, interests: Vec<ProgramCategory>, days: &[&str]) -> UserProfile {
    UserProfile {
        id: "current_user".to_string(),
        name: "Avery".to_string(),
        age,
        email: Some("avery@example.com".to_string()),
        interests,
        location: UserLocation {
            neighborhood: "Belltown".to_string(),
            zip_code: "98121".to_string(),
            coordinates: Some(Coordinates::new(47.6148, -122.3472)),
        },
        parent_email: Some("parent@example.com".to_string()),
        emergency_contact: Some(EmergencyContact {
            name: "Sam".to_string(),
            phone: "(206) 555-0100".to_string(),
            relationship: "Parent".to_string(),
        }),
        preferences: UserPreferences {
            max_distance: 10.0,
            time_of_day: TimeOfDay::Any,
            days_available: days.iter().map(|d| d.to_string()).collect(),
        },
        safety_settings: SafetySettings {
            require_parent_approval: true,
            allow_unsupervised: false,
            max_age_difference: 0,
        },
    }
}

fn catalog() -> ProgramCatalog {
    ProgramCatalog::from_json(CATALOG).expect("bundled catalog parses")
}

#[test]
fn test_integration_end_to_end_ranking() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 5);

    let ranker = Ranker::with_default_tables();
    let user = create_test_user(16, vec![ProgramCategory::Stem, ProgramCategory::Career], &["Tuesday", "Thursday"]);

    let ranked = ranker.rank_scored(&user, catalog.programs().to_vec());

    // Creative writing starts at 15, every program admits a 16 year old
    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].program.id, "2", "coding bootcamp matches interests and schedule");

    for pair in ranked.windows(2) {
        assert!(
            pair[0].score.score >= pair[1].score.score,
            "Programs not sorted by score"
        );
    }
}

#[test]
fn test_integration_filters_then_rank() {
    let catalog = catalog();
    let ranker = Ranker::with_default_tables();
    let user = create_test_user(13, vec![], &[]);

    let filter = ProgramFilter {
        categories: vec![],
        age_appropriate_only: true,
        cost: CostFilter::Free,
    };
    let filtered = apply_filter(catalog.programs().to_vec(), &filter, &user);
    let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["4"]);

    let ranked = ranker.rank(&user, filtered);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn test_integration_young_user_sees_only_eligible_programs() {
    let catalog = catalog();
    let ranker = Ranker::with_default_tables();
    let user = create_test_user(9, vec![ProgramCategory::Music, ProgramCategory::Arts], &["Saturday"]);

    let ranked = ranker.rank(&user, catalog.programs().to_vec());
    let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);

    let explanation = ranker.explain(&user, &ranked[0]);
    assert!(explanation.contains(&"Matches your interests".to_string()));
    assert!(explanation.contains(&"Scholarships available".to_string()));
}

#[test]
fn test_integration_catalog_safety_reports() {
    let catalog = catalog();
    let validator = SafetyValidator::default();

    let reports: Vec<SafetyReport> = catalog
        .programs()
        .iter()
        .map(|program| validator.report(program))
        .collect();

    for report in &reports {
        let passed = report.check.checks.passed() as f64;
        assert!((report.check.overall_score - passed / 6.0).abs() < 1e-12);
    }

    // Environmental program spans 13-24 years
    let stewardship = &reports[3];
    assert!(!stewardship.check.checks.age_appropriate);
    assert!(stewardship.check.flagged);
    assert_eq!(stewardship.verdict, SafetyVerdict::NeedsReview);

    // Library bootcamp passes everything
    assert_eq!(reports[1].check.overall_score, 1.0);
    assert_eq!(reports[1].verdict, SafetyVerdict::Verified);
}

#[test]
fn test_integration_flagged_programs_can_still_rank() {
    let catalog = catalog();
    let ranker = Ranker::with_default_tables();
    let validator = SafetyValidator::default();
    let user = create_test_user(20, vec![ProgramCategory::Outdoor], &["Saturday"]);

    let stewardship = catalog.get("4").unwrap();
    assert!(validator.validate(stewardship).flagged);
    assert!(ranker.score(&user, stewardship).score > 0.5);
}

#[test]
fn test_default_config_matches_builtin_tables() {
    let settings = Settings::load_from("config/default.toml").expect("default config loads");

    assert_eq!(settings.ranking.to_tables(), RankingTables::default());
    assert_eq!(settings.safety.to_rules(), SafetyRules::default());
    assert_eq!(settings.catalog.path, "data/programs.json");
}
