use crate::catalog::CatalogError;
use crate::course_validation;
use crate::term::Term;

/// A catalog entry: a course label with the terms it is offered in and its credit weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    label: String,
    eligible_terms: Vec<Term>,
    credits: u32,
}

impl Course {
    pub fn new<I>(label: &str, eligible_terms: I, credits: u32) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Term>,
    {
        let label = course_validation::normalize_label(label)?;
        let mut terms = Vec::with_capacity(Term::ALL.len());
        for term in eligible_terms {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        course_validation::validate_terms(&label, &terms)?;
        course_validation::validate_credits(&label, i64::from(credits))?;
        Ok(Self {
            label,
            eligible_terms: terms,
            credits,
        })
    }

    /// Builds a course from raw term tags (`"F"`, `"Winter"`, ...) and a signed credit count.
    pub fn parse<I, S>(label: &str, tags: I, credits: i64) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = course_validation::normalize_label(label)?;
        let eligible_terms = course_validation::parse_terms(&label, tags)?;
        let credits = course_validation::validate_credits(&label, credits)?;
        Ok(Self {
            label,
            eligible_terms,
            credits,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn eligible_terms(&self) -> &[Term] {
        &self.eligible_terms
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn is_offered_in(&self, term: Term) -> bool {
        self.eligible_terms.contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_first_occurrence_order() {
        let course = Course::new(
            "CS 210",
            [Term::Spring, Term::Fall, Term::Spring],
            4,
        )
        .unwrap();
        assert_eq!(course.eligible_terms(), &[Term::Spring, Term::Fall]);
        assert!(course.is_offered_in(Term::Fall));
        assert!(!course.is_offered_in(Term::Winter));
    }

    #[test]
    fn parse_checks_terms_before_credits() {
        let err = Course::parse("MATH 101", ["Z"], 0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTerm { ref tag, .. } if tag == "Z"));
    }

    #[test]
    fn new_rejects_zero_credits() {
        let err = Course::new("MATH 101", [Term::Fall], 0).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredits { credits: 0, .. }));
    }
}
