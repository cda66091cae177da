use crate::calculations::first_fit::FirstFitPass;
use crate::catalog::CourseCatalog;
use crate::course::Course;
use crate::limits::PlanLimits;
use crate::schedule::Schedule;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("cannot build a schedule from an empty catalog")]
    EmptyCatalog,
    #[error("invalid plan limits: {0}")]
    InvalidLimits(String),
    #[error("start year {start_year} plus a {horizon_years}-year horizon is out of range")]
    YearOutOfRange { start_year: u32, horizon_years: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub course_count: usize,
    pub placed_count: usize,
    pub unplaced_count: usize,
    pub placed_credits: u64,
    pub catalog_credits: u64,
    pub graduation_quota: u32,
    pub quota_met: bool,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("courses={}", self.course_count));
        parts.push(format!("placed={}", self.placed_count));
        if self.unplaced_count > 0 {
            parts.push(format!("unplaced={}", self.unplaced_count));
        }
        parts.push(format!("credits={}", self.placed_credits));
        parts.push(format!(
            "quota={}/{}{}",
            self.catalog_credits,
            self.graduation_quota,
            if self.quota_met { "" } else { " (short)" }
        ));
        parts.join(", ")
    }
}

/// Everything a build produces. Unplaced courses and a missed quota are
/// reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    /// Courses that found no slot within the horizon, in catalog order.
    pub unplaced: Vec<String>,
    pub quota_met: bool,
    pub catalog_credits: u64,
}

impl ScheduleOutcome {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty() && self.quota_met
    }

    pub fn summary(&self) -> ScheduleSummary {
        let placed_count = self.schedule.placements().count();
        ScheduleSummary {
            course_count: placed_count + self.unplaced.len(),
            placed_count,
            unplaced_count: self.unplaced.len(),
            placed_credits: self.schedule.total_credits(),
            catalog_credits: self.catalog_credits,
            graduation_quota: self.schedule.limits().graduation_quota,
            quota_met: self.quota_met,
        }
    }
}

/// Distributes catalog courses over the years of the plan, one year at a time.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    limits: PlanLimits,
}

impl ScheduleBuilder {
    pub fn new(limits: PlanLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    pub fn build(
        &self,
        catalog: &CourseCatalog,
        start_year: u32,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        self.validate(start_year)?;
        if catalog.is_empty() {
            return Err(ScheduleError::EmptyCatalog);
        }

        let catalog_credits = catalog.total_credits();
        let quota_met = catalog_credits >= u64::from(self.limits.graduation_quota);
        if !quota_met {
            tracing::warn!(
                total_credits = catalog_credits,
                quota = self.limits.graduation_quota,
                "catalog credits are below the graduation quota; schedule may be incomplete"
            );
        }

        let mut schedule = Schedule::empty(start_year, self.limits);
        let mut remaining: Vec<&Course> = catalog.iter().collect();

        for year in schedule.years_mut() {
            if remaining.is_empty() {
                break;
            }
            let placed = FirstFitPass::new(&remaining, self.limits.max_credits_per_term)
                .execute(year);
            tracing::debug!(year = year.year(), placed = placed.len(), "year pass finished");
            remaining.retain(|course| !placed.contains(course.label()));
        }

        let unplaced: Vec<String> = remaining
            .iter()
            .map(|course| course.label().to_string())
            .collect();
        if !unplaced.is_empty() {
            tracing::warn!(
                remaining = %unplaced.join(", "),
                "not all courses could be added to the schedule"
            );
        }

        let outcome = ScheduleOutcome {
            schedule,
            unplaced,
            quota_met,
            catalog_credits,
        };
        tracing::info!(summary = %outcome.summary().to_cli_summary(), "schedule built");
        Ok(outcome)
    }

    fn validate(&self, start_year: u32) -> Result<(), ScheduleError> {
        if self.limits.max_credits_per_term == 0 {
            return Err(ScheduleError::InvalidLimits(
                "max_credits_per_term must be positive".into(),
            ));
        }
        if self.limits.horizon_years == 0 {
            return Err(ScheduleError::InvalidLimits(
                "horizon_years must be positive".into(),
            ));
        }
        if start_year.checked_add(self.limits.horizon_years).is_none() {
            return Err(ScheduleError::YearOutOfRange {
                start_year,
                horizon_years: self.limits.horizon_years,
            });
        }
        Ok(())
    }
}

/// Builds a schedule under the default limits (180 credit quota, 18 credits per term, 4 years).
pub fn create_schedule(
    catalog: &CourseCatalog,
    start_year: u32,
) -> Result<ScheduleOutcome, ScheduleError> {
    ScheduleBuilder::default().build(catalog, start_year)
}
