use crate::catalog::CatalogError;
use crate::schedule::Schedule;
use crate::term::Term;
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("no schedule stored")]
    NotFound,
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait ScheduleStore {
    fn save_schedule(&self, schedule: &Schedule) -> PersistenceResult<()>;
    fn load_schedule(&self) -> PersistenceResult<Option<Schedule>>;

    fn require_schedule(&self) -> PersistenceResult<Schedule> {
        self.load_schedule()?.ok_or(PersistenceError::NotFound)
    }
}

/// Checks the structural invariants of a schedule read from, or about to be written to, storage.
pub fn validate_schedule(schedule: &Schedule) -> PersistenceResult<()> {
    let limits = schedule.limits();
    if limits.max_credits_per_term == 0 || limits.horizon_years == 0 {
        return Err(PersistenceError::InvalidData(format!(
            "limits must be positive (max_credits_per_term={}, horizon_years={})",
            limits.max_credits_per_term, limits.horizon_years
        )));
    }

    let years = schedule.years();
    if years.len() != limits.horizon_years as usize {
        return Err(PersistenceError::InvalidData(format!(
            "schedule has {} years but the horizon is {}",
            years.len(),
            limits.horizon_years
        )));
    }

    let mut seen = HashSet::new();
    for (offset, year) in years.iter().enumerate() {
        let expected_year = u32::try_from(offset)
            .ok()
            .and_then(|offset| schedule.start_year().checked_add(offset));
        if expected_year != Some(year.year()) {
            return Err(PersistenceError::InvalidData(format!(
                "year {} is out of sequence (start year {})",
                year.year(),
                schedule.start_year()
            )));
        }

        let terms: Vec<Term> = year.slots().iter().map(|slot| slot.term()).collect();
        if terms != Term::ALL {
            return Err(PersistenceError::InvalidData(format!(
                "year {} must hold exactly the Fall, Winter, and Spring slots",
                year.year()
            )));
        }

        for slot in year.slots() {
            if slot.year() != year.year() {
                return Err(PersistenceError::InvalidData(format!(
                    "{} slot is tagged with year {} inside year {}",
                    slot.term(),
                    slot.year(),
                    year.year()
                )));
            }
            if slot.total_credits() > u64::from(limits.max_credits_per_term) {
                return Err(PersistenceError::InvalidData(format!(
                    "year {} {} has {} credits (cap {})",
                    slot.year(),
                    slot.term(),
                    slot.total_credits(),
                    limits.max_credits_per_term
                )));
            }
            for course in slot.courses() {
                if course.label.trim().is_empty() {
                    return Err(PersistenceError::InvalidData(format!(
                        "year {} {} has a course without a label",
                        slot.year(),
                        slot.term()
                    )));
                }
                if course.credits == 0 {
                    return Err(PersistenceError::InvalidData(format!(
                        "course '{}' has zero credits",
                        course.label
                    )));
                }
                if !seen.insert(course.label.as_str()) {
                    return Err(PersistenceError::InvalidData(format!(
                        "course '{}' is placed more than once",
                        course.label
                    )));
                }
            }
        }
    }
    Ok(())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_catalog_from_csv, load_schedule_from_csv, load_schedule_from_json, read_catalog,
    save_catalog_to_csv, save_schedule_to_csv, save_schedule_to_json, write_catalog,
};
