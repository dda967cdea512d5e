use std::cmp::Ordering;
use tracing::{debug, trace};
use crate::models::{MatchScore, Program, RankingTables, UserProfile};
use crate::core::scoring::{
    cost_match, interest_match, is_age_appropriate, location_score, safety_score, schedule_match,
    unit,
};

/// A program paired with its match score
#[derive(Debug, Clone)]
pub struct ScoredProgram {
    pub program: Program,
    pub score: MatchScore,
}

/// Ranking engine
///
/// Holds only the immutable scoring tables; every call is parameterized by
/// the user and the candidate list, so one instance can be shared across
/// threads and requests.
///
/// # Scoring
/// 1. Age gate (hard filter, score 0 when it fails)
/// 2. Interest match, location, schedule, cost and safety sub-scores
/// 3. Weighted sum plus verified and scholarship bonuses, capped at 1.0
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    tables: RankingTables,
}

impl Ranker {
    pub fn new(tables: RankingTables) -> Self {
        Self { tables }
    }

    pub fn with_default_tables() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &RankingTables {
        &self.tables
    }

    /// Score one program for a user
    pub fn score(&self, user: &UserProfile, program: &Program) -> MatchScore {
        if !is_age_appropriate(user, program) {
            trace!(program_id = %program.id, user_age = user.age, "Program outside age window");
            return MatchScore::not_age_appropriate(program.id.clone());
        }

        let tables = &self.tables;
        let weights = &tables.weights;
        let thresholds = &tables.reasons;

        let interest = interest_match(user, program, tables);
        let location = location_score(user, program, tables);
        let schedule = schedule_match(user, program, tables);
        let cost = cost_match(&program.cost, tables);
        let safety = safety_score(program, tables);

        let mut total = interest * weights.interest
            + location * weights.location
            + schedule * weights.schedule
            + cost * weights.cost
            + safety * weights.safety;

        let mut reasons = Vec::new();
        if interest > thresholds.interest {
            reasons.push("Matches your interests".to_string());
        }
        if location > thresholds.location {
            reasons.push("Close to your location".to_string());
        }
        if schedule > thresholds.schedule {
            reasons.push("Fits your schedule".to_string());
        }
        if cost > thresholds.cost {
            reasons.push("Good value for money".to_string());
        }
        if safety > thresholds.safety {
            reasons.push("Highly rated for safety".to_string());
        }

        if program.verified {
            total += tables.bonuses.verified;
            reasons.push("Verified organization".to_string());
        }
        if program.cost.offers_scholarship() && program.cost.amount > tables.bonuses.scholarship_min_cost {
            total += tables.bonuses.scholarship;
            reasons.push("Scholarships available".to_string());
        }

        let score = unit(total);
        trace!(
            program_id = %program.id,
            score,
            interest,
            location,
            schedule,
            cost,
            safety,
            "Scored program"
        );

        MatchScore {
            program_id: program.id.clone(),
            score,
            reasons,
            safety_score: safety,
            age_appropriate: true,
            interest_match: interest,
            location_score: location,
            schedule_match: schedule,
            cost_match: cost,
        }
    }

    /// Score every program, preserving input order
    pub fn score_all(&self, user: &UserProfile, programs: &[Program]) -> Vec<MatchScore> {
        programs.iter().map(|program| self.score(user, program)).collect()
    }

    /// Reasons shown next to a program card
    pub fn explain(&self, user: &UserProfile, program: &Program) -> Vec<String> {
        self.score(user, program).reasons
    }

    /// Score, drop zero scores and sort, keeping each score alongside its program
    ///
    /// Ordering is by score descending, then program id ascending, so the
    /// output does not depend on input order.
    pub fn rank_scored(&self, user: &UserProfile, programs: Vec<Program>) -> Vec<ScoredProgram> {
        let total = programs.len();

        let mut scored: Vec<ScoredProgram> = programs
            .into_iter()
            .map(|program| {
                let score = self.score(user, &program);
                ScoredProgram { program, score }
            })
            .filter(|entry| entry.score.score > 0.0)
            .collect();

        scored.sort_by(compare_ranked);

        debug!(
            user_id = %user.id,
            candidates = total,
            ranked = scored.len(),
            "Ranked programs"
        );

        scored
    }

    /// Programs the user is eligible for, best match first
    pub fn rank(&self, user: &UserProfile, programs: Vec<Program>) -> Vec<Program> {
        self.rank_scored(user, programs)
            .into_iter()
            .map(|entry| entry.program)
            .collect()
    }
}

fn compare_ranked(a: &ScoredProgram, b: &ScoredProgram) -> Ordering {
    b.score
        .score
        .total_cmp(&a.score.score)
        .then_with(|| a.program.id.cmp(&b.program.id))
}

/// Rank with the default tables
pub fn rank(user: &UserProfile, programs: Vec<Program>) -> Vec<Program> {
    Ranker::with_default_tables().rank(user, programs)
}

/// Score with the default tables
pub fn score(user: &UserProfile, program: &Program) -> MatchScore {
    Ranker::with_default_tables().score(user, program)
}
