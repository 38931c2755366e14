//! Built-in candidate lists and catalog-derived candidate synthesis.
//!
//! The question-scope, year-level, and yes/no lists are fixed; faculty and
//! program lists are built from whatever the catalog returns for the
//! current session.

use once_cell::sync::Lazy;

use super::Candidate;

/// Canonical value for a general question scope.
pub const SCOPE_GENERAL: &str = "general";
/// Canonical value for a program-specific question scope.
pub const SCOPE_SPECIFIC: &str = "specific";
/// Canonical continuation answers.
pub const ANSWER_YES: &str = "yes";
pub const ANSWER_NO: &str = "no";

static QUESTION_SCOPE: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        Candidate::new(SCOPE_GENERAL).with_synonyms(["general", "general question"]),
        Candidate::new(SCOPE_SPECIFIC).with_synonyms([
            "specific",
            "specific question",
            "program specific question",
            "program specific",
        ]),
    ]
});

static YEAR_LEVEL: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        Candidate::new("First Year").with_synonyms(["one", "1st year", "freshman", "first year"]),
        Candidate::new("Second Year")
            .with_synonyms(["two", "2nd year", "sophomore", "second year"]),
        Candidate::new("Third Year").with_synonyms(["three", "3rd year", "junior", "third year"]),
        Candidate::new("Fourth Year")
            .with_synonyms(["four", "4th year", "senior", "fourth year"]),
        Candidate::new("Fifth Year")
            .with_synonyms(["five", "5th year", "graduate", "fifth year"]),
    ]
});

static YES_NO: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        Candidate::new(ANSWER_YES)
            .with_synonyms(["yeah", "yep", "I do", "yes please", "you know it"]),
        Candidate::new(ANSWER_NO).with_synonyms(["nope", "no thank you", "I don't", "I do not"]),
    ]
});

/// Question-scope candidates (general vs. program-specific).
pub fn question_scope() -> Vec<Candidate> {
    QUESTION_SCOPE.clone()
}

/// Year-level candidates, first through fifth year.
pub fn year_level() -> Vec<Candidate> {
    YEAR_LEVEL.clone()
}

/// Yes/no continuation candidates.
pub fn yes_no() -> Vec<Candidate> {
    YES_NO.clone()
}

/// Builds faculty candidates from catalog names.
///
/// Each faculty gets a lower-cased synonym and, when the name carries a
/// leading article, one with the article stripped, so "the faculty of
/// science" resolves to "The Faculty of Science".
pub fn faculty_candidates(names: &[String]) -> Vec<Candidate> {
    names
        .iter()
        .map(|name| {
            let lower = name.to_lowercase();
            let mut candidate = Candidate::new(name).with_synonym(&lower);
            if let Some(stripped) = lower.strip_prefix("the ") {
                candidate = candidate.with_synonym(stripped);
            }
            candidate
        })
        .collect()
}

/// Builds program candidates from catalog names, no synonyms.
pub fn program_candidates(names: &[String]) -> Vec<Candidate> {
    names.iter().map(Candidate::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_list_covers_both_scopes() {
        let scopes = question_scope();
        assert_eq!(scopes.len(), 2);
        assert!(scopes.iter().any(|c| c.canonical == SCOPE_GENERAL));
        assert!(scopes.iter().any(|c| c.matches("program specific question")));
    }

    #[test]
    fn year_levels_cover_five_years_with_colloquial_synonyms() {
        let years = year_level();
        assert_eq!(years.len(), 5);
        assert!(years.iter().any(|c| c.canonical == "First Year" && c.matches("freshman")));
        assert!(years.iter().any(|c| c.canonical == "Fifth Year" && c.matches("graduate")));
    }

    #[test]
    fn yes_no_accepts_common_phrasings() {
        let answers = yes_no();
        assert!(answers.iter().any(|c| c.canonical == ANSWER_YES && c.matches("yep")));
        assert!(answers.iter().any(|c| c.canonical == ANSWER_NO && c.matches("no thank you")));
    }

    #[test]
    fn faculty_candidates_strip_leading_article() {
        let names = vec!["The Faculty of Science".to_string(), "Engineering".to_string()];
        let candidates = faculty_candidates(&names);

        assert!(candidates[0].matches("faculty of science"));
        assert!(candidates[0].matches("the faculty of science"));
        assert_eq!(candidates[0].canonical, "The Faculty of Science");
        assert!(candidates[1].matches("engineering"));
        assert_eq!(candidates[1].synonyms.len(), 1);
    }

    #[test]
    fn program_candidates_carry_no_synonyms() {
        let names = vec!["Computer Science".to_string()];
        let candidates = program_candidates(&names);
        assert_eq!(candidates[0].canonical, "Computer Science");
        assert!(candidates[0].synonyms.is_empty());
    }
}
