use tracing::debug;
use crate::models::{Program, SafetyCheck, SafetyChecks, SafetyReport, SafetyRules};

/// Program safety validator
///
/// Runs six user-independent heuristics over a program record and collapses
/// them into a compliance score. Programs scoring below the flag threshold,
/// or failing the age-range sanity check, are flagged for manual review.
#[derive(Debug, Clone, Default)]
pub struct SafetyValidator {
    rules: SafetyRules,
}

impl SafetyValidator {
    pub fn new(rules: SafetyRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &SafetyRules {
        &self.rules
    }

    pub fn validate(&self, program: &Program) -> SafetyCheck {
        let checks = SafetyChecks {
            age_appropriate: self.check_age_range(program),
            verified_organization: check_verified_organization(program),
            background_checked_staff: self.check_staff(program),
            safe_location: self.check_location(program),
            appropriate_supervision: self.check_supervision(program),
            no_inappropriate_content: self.check_content(program),
        };

        let overall_score = checks.passed() as f64 / SafetyChecks::COUNT as f64;
        let flagged = overall_score < self.rules.flag_threshold || !checks.age_appropriate;

        if flagged {
            debug!(program_id = %program.id, overall_score, ?checks, "Program flagged for review");
        }

        SafetyCheck {
            program_id: program.id.clone(),
            checks,
            overall_score,
            flagged,
            review_notes: flagged.then(|| self.rules.review_note.clone()),
        }
    }

    /// Validate and attach the presentation verdict
    pub fn report(&self, program: &Program) -> SafetyReport {
        let check = self.validate(program);
        let verdict = check.verdict(self.rules.flag_threshold, self.rules.verified_threshold);
        SafetyReport { check, verdict }
    }

    /// The program's own age range is narrow and within bounds
    fn check_age_range(&self, program: &Program) -> bool {
        let range = program.age_range;
        range.min <= range.max
            && range.span() <= self.rules.max_age_span
            && range.max <= self.rules.max_age
    }

    /// Capacity limits and listed requirements stand in for staff screening
    fn check_staff(&self, program: &Program) -> bool {
        program.capacity.max < self.rules.staffed_capacity && !program.requirements.is_empty()
    }

    fn check_location(&self, program: &Program) -> bool {
        let venue = program.location.name.to_lowercase();
        self.rules
            .safe_venues
            .iter()
            .any(|safe| venue.contains(safe.as_str()))
    }

    fn check_supervision(&self, program: &Program) -> bool {
        !program.schedule.days.is_empty()
            && !program.requirements.is_empty()
            && program.capacity.max < self.rules.supervised_capacity
    }

    fn check_content(&self, program: &Program) -> bool {
        let text = format!("{} {}", program.title, program.description).to_lowercase();
        !self
            .rules
            .blocked_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()))
    }
}

fn check_verified_organization(program: &Program) -> bool {
    program.verified
        && !program.organization.is_empty()
        && program.contact.has_phone_or_email()
}

/// Validate with the default rules
pub fn validate(program: &Program) -> SafetyCheck {
    SafetyValidator::default().validate(program)
}
