use crate::course::Course;
use crate::course_validation;
use crate::term::Term;
use indexmap::IndexMap;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use thiserror::Error;

/// Column names a catalog source must carry, in order.
pub const CATALOG_COLUMNS: [&str; 3] = ["Class", "Term", "Credits"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog columns must be exactly Class, Term, Credits (found: {})", .found.join(", "))]
    Schema { found: Vec<String> },
    #[error("course '{0}' already exists in the catalog")]
    DuplicateCourse(String),
    #[error("course '{0}' does not exist in the catalog")]
    UnknownCourse(String),
    #[error("course '{label}' has invalid term '{tag}' (term must be F, W, or S)")]
    InvalidTerm { label: String, tag: String },
    #[error("course '{label}' must be offered in at least one term")]
    NoEligibleTerms { label: String },
    #[error("course '{label}' has invalid credits {credits} (must be a positive integer)")]
    InvalidCredits { label: String, credits: i64 },
    #[error("course label must not be empty")]
    EmptyLabel,
}

/// The set of known courses, keyed by label.
///
/// Iteration follows insertion order; the schedule builder relies on it as
/// placement priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: IndexMap<String, Course>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a course. The catalog is untouched on error.
    pub fn add_course<I, S>(
        &mut self,
        label: &str,
        eligible_terms: I,
        credits: i64,
    ) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = course_validation::normalize_label(label)?;
        if self.courses.contains_key(&label) {
            return Err(CatalogError::DuplicateCourse(label));
        }
        let course = Course::parse(&label, eligible_terms, credits)?;
        self.courses.insert(label, course);
        Ok(())
    }

    pub fn insert(&mut self, course: Course) -> Result<(), CatalogError> {
        if self.courses.contains_key(course.label()) {
            return Err(CatalogError::DuplicateCourse(course.label().to_string()));
        }
        self.courses.insert(course.label().to_string(), course);
        Ok(())
    }

    pub fn remove_course(&mut self, label: &str) -> Result<Course, CatalogError> {
        self.courses
            .shift_remove(label.trim())
            .ok_or_else(|| CatalogError::UnknownCourse(label.to_string()))
    }

    pub fn eligible_terms(&self, label: &str) -> Result<&[Term], CatalogError> {
        self.lookup(label).map(Course::eligible_terms)
    }

    pub fn credits(&self, label: &str) -> Result<u32, CatalogError> {
        self.lookup(label).map(Course::credits)
    }

    pub fn get(&self, label: &str) -> Option<&Course> {
        self.courses.get(label.trim())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.courses.contains_key(label.trim())
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.courses.keys().map(String::as_str)
    }

    /// Catalog-wide credit total, independent of what a schedule manages to place.
    pub fn total_credits(&self) -> u64 {
        self.courses
            .values()
            .map(|course| u64::from(course.credits()))
            .sum()
    }

    /// Tabular view in the same `Class`/`Term`/`Credits` shape the catalog is loaded from.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.labels().collect();
        let terms: Vec<String> = self
            .iter()
            .map(|course| Term::join_tags(course.eligible_terms()))
            .collect();
        let term_refs: Vec<&str> = terms.iter().map(String::as_str).collect();
        let credits: Vec<i64> = self.iter().map(|course| i64::from(course.credits())).collect();

        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("Class"), labels).into_column(),
            Series::new(PlSmallStr::from_static("Term"), term_refs).into_column(),
            Series::new(PlSmallStr::from_static("Credits"), credits).into_column(),
        ])
    }

    fn lookup(&self, label: &str) -> Result<&Course, CatalogError> {
        self.get(label)
            .ok_or_else(|| CatalogError::UnknownCourse(label.to_string()))
    }
}

impl<'a> IntoIterator for &'a CourseCatalog {
    type Item = &'a Course;
    type IntoIter = indexmap::map::Values<'a, String, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.values()
    }
}
