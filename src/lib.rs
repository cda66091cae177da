pub mod builder;
pub mod calculations;
pub mod catalog;
pub mod course;
pub(crate) mod course_validation;
pub mod limits;
pub mod persistence;
pub mod planner;
pub mod render;
pub mod schedule;
pub mod term;

pub use builder::{
    ScheduleBuilder, ScheduleError, ScheduleOutcome, ScheduleSummary, create_schedule,
};
pub use catalog::{CATALOG_COLUMNS, CatalogError, CourseCatalog};
pub use course::Course;
pub use limits::{GRADUATION_QUOTA, HORIZON_YEARS, MAX_CREDITS_PER_TERM, PlanLimits};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteScheduleStore;
pub use persistence::{
    PersistenceError, PersistenceResult, ScheduleStore, load_catalog_from_csv,
    load_schedule_from_csv, load_schedule_from_json, save_catalog_to_csv, save_schedule_to_csv,
    save_schedule_to_json, validate_schedule,
};
pub use planner::{Planner, PlannerError};
pub use render::{render_schedule, render_table, write_schedule};
pub use schedule::{AcademicYear, PlacedCourse, Schedule, Slot};
pub use term::Term;
