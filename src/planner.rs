use crate::builder::{ScheduleBuilder, ScheduleError, ScheduleOutcome};
use crate::catalog::{CatalogError, CourseCatalog};
use crate::course::Course;
use crate::limits::PlanLimits;
use crate::persistence::{self, PersistenceError};
use crate::term::Term;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Start years are two-digit academic years.
const MAX_START_YEAR: u32 = 99;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("start year {0} is not a two-digit year (0-99)")]
    InvalidStartYear(u32),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// A planning session: one catalog, a start year, and the limits schedules are built under.
#[derive(Debug, Clone)]
pub struct Planner {
    source: Option<PathBuf>,
    start_year: u32,
    catalog: CourseCatalog,
    builder: ScheduleBuilder,
}

impl Planner {
    pub fn new(start_year: u32) -> Result<Self, PlannerError> {
        Self::with_catalog(None, CourseCatalog::new(), start_year)
    }

    pub fn from_csv<P: AsRef<Path>>(path: P, start_year: u32) -> Result<Self, PlannerError> {
        check_start_year(start_year)?;
        let catalog = persistence::load_catalog_from_csv(path.as_ref())?;
        Self::with_catalog(Some(path.as_ref().to_path_buf()), catalog, start_year)
    }

    fn with_catalog(
        source: Option<PathBuf>,
        catalog: CourseCatalog,
        start_year: u32,
    ) -> Result<Self, PlannerError> {
        check_start_year(start_year)?;
        Ok(Self {
            source,
            start_year,
            catalog,
            builder: ScheduleBuilder::default(),
        })
    }

    pub fn with_limits(mut self, limits: PlanLimits) -> Self {
        self.builder = ScheduleBuilder::new(limits);
        self
    }

    pub fn start_year(&self) -> u32 {
        self.start_year
    }

    pub fn set_start_year(&mut self, start_year: u32) -> Result<(), PlannerError> {
        check_start_year(start_year)?;
        self.start_year = start_year;
        Ok(())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> &PlanLimits {
        self.builder.limits()
    }

    pub fn add_course<I, S>(
        &mut self,
        label: &str,
        eligible_terms: I,
        credits: i64,
    ) -> Result<(), PlannerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.catalog.add_course(label, eligible_terms, credits)?;
        tracing::debug!(course = label.trim(), credits, "course added");
        Ok(())
    }

    pub fn remove_course(&mut self, label: &str) -> Result<Course, PlannerError> {
        let course = self.catalog.remove_course(label)?;
        tracing::debug!(course = course.label(), "course removed");
        Ok(course)
    }

    pub fn eligible_terms(&self, label: &str) -> Result<&[Term], PlannerError> {
        Ok(self.catalog.eligible_terms(label)?)
    }

    pub fn credits(&self, label: &str) -> Result<u32, PlannerError> {
        Ok(self.catalog.credits(label)?)
    }

    pub fn total_credits(&self) -> u64 {
        self.catalog.total_credits()
    }

    pub fn create_schedule(&self) -> Result<ScheduleOutcome, PlannerError> {
        Ok(self.builder.build(&self.catalog, self.start_year)?)
    }

    /// Writes the current catalog, including any edits, as `Class,Term,Credits` CSV.
    pub fn save_catalog<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        persistence::save_catalog_to_csv(&self.catalog, path)?;
        Ok(())
    }
}

impl fmt::Display for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => write!(f, "Planner based on: {}", path.display()),
            None => write!(f, "Planner based on: <empty catalog>"),
        }
    }
}

fn check_start_year(start_year: u32) -> Result<(), PlannerError> {
    if start_year > MAX_START_YEAR {
        return Err(PlannerError::InvalidStartYear(start_year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_three_digit_start_year() {
        assert!(matches!(
            Planner::new(100),
            Err(PlannerError::InvalidStartYear(100))
        ));
        let mut planner = Planner::new(22).unwrap();
        assert!(planner.set_start_year(123).is_err());
        assert_eq!(planner.start_year(), 22);
    }

    #[test]
    fn edits_flow_into_the_next_build() {
        let mut planner = Planner::new(22).unwrap();
        planner.add_course("A", ["F"], 18).unwrap();
        planner.add_course("B", ["F"], 4).unwrap();
        let first = planner.create_schedule().unwrap();
        assert_eq!(first.schedule.find_course("B").unwrap().year(), 23);

        planner.remove_course("A").unwrap();
        let second = planner.create_schedule().unwrap();
        let slot = second.schedule.find_course("B").unwrap();
        assert_eq!((slot.year(), slot.term()), (22, Term::Fall));
        assert_eq!(planner.total_credits(), 4);
    }

    #[test]
    fn display_names_the_catalog_source() {
        let planner = Planner::new(22).unwrap();
        assert_eq!(planner.to_string(), "Planner based on: <empty catalog>");
    }

    #[test]
    fn catalog_errors_pass_through() {
        let mut planner = Planner::new(22).unwrap();
        let err = planner.remove_course("CS 999").unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Catalog(CatalogError::UnknownCourse(ref label)) if label == "CS 999"
        ));
    }
}
