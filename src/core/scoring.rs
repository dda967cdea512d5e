use std::collections::BTreeSet;
use crate::models::{Cost, Program, ProgramCategory, RankingTables, UserProfile};
use crate::core::distance::distance_between;

/// Clamp a sub-score to `0.0..=1.0`, mapping non-finite values to zero
#[inline]
pub fn unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Hard age gate
///
/// The user's age must fall inside the program range and, when the user set
/// a positive max age difference, the range must be no wider than it.
#[inline]
pub fn is_age_appropriate(user: &UserProfile, program: &Program) -> bool {
    if !program.age_range.contains(user.age) {
        return false;
    }

    let max_difference = user.safety_settings.max_age_difference;
    max_difference == 0 || program.age_range.span() <= max_difference
}

/// Share of the program's categories the user is interested in
pub fn interest_match(user: &UserProfile, program: &Program, tables: &RankingTables) -> f64 {
    if user.interests.is_empty() {
        return tables.neutral_score;
    }

    let categories: BTreeSet<ProgramCategory> = program.categories.iter().copied().collect();
    let matching = categories
        .iter()
        .filter(|category| user.interests.contains(category))
        .count();

    unit(matching as f64 / categories.len().max(1) as f64)
}

/// Proximity score from the great-circle distance to the venue
pub fn location_score(user: &UserProfile, program: &Program, tables: &RankingTables) -> f64 {
    match distance_between(user.location.coordinates, program.location.coordinates) {
        Some(distance) => proximity_score(distance, user.preferences.max_distance, tables),
        None => tables.neutral_location_score,
    }
}

/// Map a distance in miles onto a score
///
/// Inside the user's radius the score falls linearly from 1.0 at the door to
/// 0.5 at the edge; beyond it a fixed low score applies.
#[inline]
pub fn proximity_score(distance_miles: f64, max_distance_miles: f64, tables: &RankingTables) -> f64 {
    if !distance_miles.is_finite() || distance_miles > max_distance_miles {
        return tables.out_of_range_location_score;
    }
    if max_distance_miles <= 0.0 {
        // Zero radius: only the exact spot is in range
        return 1.0;
    }

    unit(1.0 - (distance_miles / max_distance_miles) * 0.5)
}

/// Share of the program's days the user is available on
///
/// Days match case-insensitively when either name contains the other, so
/// "Sat" matches "Saturday".
pub fn schedule_match(user: &UserProfile, program: &Program, tables: &RankingTables) -> f64 {
    let user_days: Vec<String> = user
        .preferences
        .days_available
        .iter()
        .map(|day| day.to_lowercase())
        .collect();

    if user_days.is_empty() {
        return tables.neutral_score;
    }

    let program_days = &program.schedule.days;
    let matching = program_days
        .iter()
        .map(|day| day.to_lowercase())
        .filter(|day| {
            user_days
                .iter()
                .any(|user_day| user_day.contains(day.as_str()) || day.contains(user_day.as_str()))
        })
        .count();

    if matching == 0 {
        return tables.no_overlap_schedule_score;
    }

    unit(matching as f64 / program_days.len().max(1) as f64)
}

/// Affordability step function
pub fn cost_match(cost: &Cost, tables: &RankingTables) -> f64 {
    if cost.free {
        return 1.0;
    }

    tables
        .cost_tiers
        .iter()
        .find(|tier| cost.amount <= tier.max_amount)
        .map(|tier| tier.score)
        .unwrap_or(tables.cost_floor)
}

/// Ranking safety sub-score: the program's rating plus attribute bonuses
///
/// Independent of the safety validator's compliance report.
pub fn safety_score(program: &Program, tables: &RankingTables) -> f64 {
    let bonuses = &tables.safety_bonuses;
    let mut score = f64::from(program.safety_rating) / 5.0;

    if program.verified {
        score += bonuses.verified;
    }
    if !program.requirements.is_empty() {
        score += bonuses.has_requirements;
    }
    if program.contact.has_phone_or_email() {
        score += bonuses.has_contact;
    }
    if program.capacity.max < bonuses.small_group_capacity {
        score += bonuses.small_group;
    }

    unit(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use chrono::NaiveDate;

    fn create_test_program(days: &[&str]) -> Program {
        Program {
            id: "p1".to_string(),
            title: "Coding Bootcamp for Teens".to_string(),
            description: "Learn web development".to_string(),
            organization: "Seattle Public Library".to_string(),
            location: ProgramLocation {
                name: "Central Library".to_string(),
                address: "1000 4th Ave".to_string(),
                coordinates: Some(Coordinates::new(47.608013, -122.335167)),
            },
            age_range: AgeRange { min: 12, max: 17 },
            categories: vec![ProgramCategory::Stem, ProgramCategory::Education],
            schedule: Schedule {
                start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                end_date: None,
                days: days.iter().map(|d| d.to_string()).collect(),
                time: "4:00 PM - 6:00 PM".to_string(),
                frequency: Frequency::Weekly,
            },
            cost: Cost { amount: 0.0, currency: "USD".to_string(), free: true, scholarship: None },
            capacity: Capacity { current: 12, max: 20 },
            requirements: vec![],
            contact: Contact::default(),
            images: vec![],
            safety_rating: 3,
            verified: false,
            last_updated: None,
            source: ProgramSource::SeattleGov,
        }
    }

    fn create_test_user(age: u8, days: &[&str]) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Test User".to_string(),
            age,
            email: None,
            interests: vec![ProgramCategory::Stem],
            location: UserLocation {
                neighborhood: "Downtown".to_string(),
                zip_code: "98101".to_string(),
                coordinates: None,
            },
            parent_email: None,
            emergency_contact: None,
            preferences: UserPreferences {
                max_distance: 10.0,
                time_of_day: TimeOfDay::Any,
                days_available: days.iter().map(|d| d.to_string()).collect(),
            },
            safety_settings: SafetySettings::default(),
        }
    }

    #[test]
    fn test_age_gate() {
        let program = create_test_program(&[]);

        assert!(is_age_appropriate(&create_test_user(16, &[]), &program));
        assert!(is_age_appropriate(&create_test_user(12, &[]), &program));
        assert!(is_age_appropriate(&create_test_user(17, &[]), &program));
        assert!(!is_age_appropriate(&create_test_user(11, &[]), &program));
        assert!(!is_age_appropriate(&create_test_user(18, &[]), &program));
    }

    #[test]
    fn test_age_gate_max_difference() {
        let program = create_test_program(&[]);
        let mut user = create_test_user(16, &[]);

        user.safety_settings.max_age_difference = 4;
        assert!(!is_age_appropriate(&user, &program), "span 5 exceeds 4");

        user.safety_settings.max_age_difference = 5;
        assert!(is_age_appropriate(&user, &program));
    }

    #[test]
    fn test_interest_match() {
        let tables = RankingTables::default();
        let program = create_test_program(&[]);
        let mut user = create_test_user(16, &[]);

        assert_eq!(interest_match(&user, &program, &tables), 0.5);

        user.interests = vec![ProgramCategory::Stem, ProgramCategory::Education];
        assert_eq!(interest_match(&user, &program, &tables), 1.0);

        user.interests = vec![ProgramCategory::Sports];
        assert_eq!(interest_match(&user, &program, &tables), 0.0);

        user.interests.clear();
        assert_eq!(interest_match(&user, &program, &tables), 0.5);
    }

    #[test]
    fn test_interest_match_ignores_duplicate_tags() {
        let tables = RankingTables::default();
        let mut program = create_test_program(&[]);
        program.categories = vec![
            ProgramCategory::Stem,
            ProgramCategory::Education,
            ProgramCategory::Education,
        ];
        let user = create_test_user(16, &[]);

        assert_eq!(interest_match(&user, &program, &tables), 0.5);
    }

    #[test]
    fn test_proximity_score() {
        let tables = RankingTables::default();

        assert_eq!(proximity_score(0.0, 10.0, &tables), 1.0);
        assert!((proximity_score(5.0, 10.0, &tables) - 0.75).abs() < 1e-12);
        assert_eq!(proximity_score(10.0, 10.0, &tables), 0.5);
        assert_eq!(proximity_score(10.5, 10.0, &tables), 0.2);
        assert_eq!(proximity_score(0.0, 0.0, &tables), 1.0);
        assert_eq!(proximity_score(0.1, 0.0, &tables), 0.2);
        assert_eq!(proximity_score(f64::NAN, 10.0, &tables), 0.2);
    }

    #[test]
    fn test_location_score_is_deterministic() {
        let tables = RankingTables::default();
        let program = create_test_program(&[]);
        let mut user = create_test_user(16, &[]);

        // No user coordinates: neutral
        assert_eq!(location_score(&user, &program, &tables), 0.5);

        // Discovery Park is ~5mi from the library
        user.location.coordinates = Some(Coordinates::new(47.6621, -122.4096));
        let first = location_score(&user, &program, &tables);
        let second = location_score(&user, &program, &tables);
        assert_eq!(first, second);
        assert!(first > 0.7 && first < 0.8, "got {}", first);

        user.preferences.max_distance = 2.0;
        assert_eq!(location_score(&user, &program, &tables), 0.2);
    }

    #[test]
    fn test_schedule_match() {
        let tables = RankingTables::default();
        let program = create_test_program(&["Tuesday", "Thursday"]);

        assert_eq!(schedule_match(&create_test_user(16, &[]), &program, &tables), 0.5);
        assert_eq!(
            schedule_match(&create_test_user(16, &["tuesday"]), &program, &tables),
            0.5
        );
        assert_eq!(
            schedule_match(&create_test_user(16, &["Tue", "THURSDAY"]), &program, &tables),
            1.0
        );
        assert_eq!(
            schedule_match(&create_test_user(16, &["Saturday"]), &program, &tables),
            0.1
        );
    }

    #[test]
    fn test_schedule_match_program_without_days() {
        let tables = RankingTables::default();
        let program = create_test_program(&[]);

        assert_eq!(
            schedule_match(&create_test_user(16, &["Monday"]), &program, &tables),
            0.1
        );
    }

    #[test]
    fn test_cost_match() {
        let tables = RankingTables::default();
        let paid = |amount: f64| Cost {
            amount,
            currency: "USD".to_string(),
            free: false,
            scholarship: None,
        };

        assert_eq!(
            cost_match(&Cost { amount: 300.0, currency: "USD".to_string(), free: true, scholarship: None }, &tables),
            1.0
        );
        assert_eq!(cost_match(&paid(0.0), &tables), 0.9);
        assert_eq!(cost_match(&paid(50.0), &tables), 0.9);
        assert_eq!(cost_match(&paid(50.01), &tables), 0.7);
        assert_eq!(cost_match(&paid(100.0), &tables), 0.7);
        assert_eq!(cost_match(&paid(200.0), &tables), 0.5);
        assert_eq!(cost_match(&paid(500.0), &tables), 0.3);
        assert_eq!(cost_match(&paid(501.0), &tables), 0.1);
    }

    #[test]
    fn test_safety_score_bonuses() {
        let tables = RankingTables::default();
        let mut program = create_test_program(&[]);
        program.capacity.max = 60;

        // 3/5 only
        assert!((safety_score(&program, &tables) - 0.6).abs() < 1e-12);

        program.requirements = vec!["Laptop required".to_string()];
        assert!((safety_score(&program, &tables) - 0.7).abs() < 1e-12);

        program.contact.email = Some("teens@seattle.gov".to_string());
        assert!((safety_score(&program, &tables) - 0.8).abs() < 1e-12);

        program.capacity.max = 20;
        assert!((safety_score(&program, &tables) - 0.9).abs() < 1e-12);

        program.verified = true;
        assert_eq!(safety_score(&program, &tables), 1.0);
    }

    #[test]
    fn test_contact_bonus_needs_non_empty_value() {
        let tables = RankingTables::default();
        let mut program = create_test_program(&[]);
        program.capacity.max = 60;

        program.contact.phone = Some(String::new());
        assert!((safety_score(&program, &tables) - 0.6).abs() < 1e-12);

        // Whitespace still counts as a listed number
        program.contact.phone = Some("  ".to_string());
        assert!((safety_score(&program, &tables) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_unit_clamps() {
        assert_eq!(unit(1.7), 1.0);
        assert_eq!(unit(-0.2), 0.0);
        assert_eq!(unit(f64::INFINITY), 0.0);
        assert_eq!(unit(0.42), 0.42);
    }
}
