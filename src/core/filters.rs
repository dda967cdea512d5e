use crate::models::{CostFilter, Program, ProgramFilter, UserProfile};

/// Check if a program passes the user's filter panel selections
///
/// This runs before ranking; a filter change means a fresh ranking over the
/// narrowed list.
#[inline]
pub fn matches_filter(program: &Program, filter: &ProgramFilter, user: &UserProfile) -> bool {
    // Any shared category
    if !filter.categories.is_empty()
        && !program
            .categories
            .iter()
            .any(|category| filter.categories.contains(category))
    {
        return false;
    }

    if filter.age_appropriate_only && !program.age_range.contains(user.age) {
        return false;
    }

    match filter.cost {
        CostFilter::All => true,
        CostFilter::Free => program.cost.free,
        CostFilter::Paid => !program.cost.free,
    }
}

/// Keep only programs that pass the filter
pub fn apply_filter(programs: Vec<Program>, filter: &ProgramFilter, user: &UserProfile) -> Vec<Program> {
    programs
        .into_iter()
        .filter(|program| matches_filter(program, filter, user))
        .collect()
}
