use crate::limits::PlanLimits;
use crate::term::Term;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCourse {
    pub label: String,
    pub credits: u32,
}

/// One (year, term) bucket of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    year: u32,
    term: Term,
    courses: Vec<PlacedCourse>,
}

impl Slot {
    fn new(year: u32, term: Term) -> Self {
        Self {
            year,
            term,
            courses: Vec::new(),
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn term(&self) -> Term {
        self.term
    }

    /// Placed courses in the order they were assigned.
    pub fn courses(&self) -> &[PlacedCourse] {
        &self.courses
    }

    pub fn total_credits(&self) -> u64 {
        self.courses
            .iter()
            .map(|course| u64::from(course.credits))
            .sum()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.courses.iter().any(|course| course.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn has_room_for(&self, credits: u32, max_credits: u32) -> bool {
        self.total_credits() + u64::from(credits) <= u64::from(max_credits)
    }

    pub(crate) fn place(&mut self, label: impl Into<String>, credits: u32) {
        self.courses.push(PlacedCourse {
            label: label.into(),
            credits,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    year: u32,
    slots: Vec<Slot>,
}

impl AcademicYear {
    fn new(year: u32) -> Self {
        Self {
            year,
            slots: Term::ALL.iter().map(|term| Slot::new(year, *term)).collect(),
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Fall, Winter, and Spring slots in that order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, term: Term) -> Option<&Slot> {
        self.slots.get(term.index())
    }

    pub(crate) fn slot_mut(&mut self, term: Term) -> Option<&mut Slot> {
        self.slots.get_mut(term.index())
    }

    pub fn total_credits(&self) -> u64 {
        self.slots.iter().map(Slot::total_credits).sum()
    }
}

/// A multi-year plan: consecutive academic years, each split into three term slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    start_year: u32,
    limits: PlanLimits,
    years: Vec<AcademicYear>,
}

impl Schedule {
    /// An empty grid of `limits.horizon_years` years starting at `start_year`.
    pub(crate) fn empty(start_year: u32, limits: PlanLimits) -> Self {
        let years = (0..limits.horizon_years)
            .map(|offset| AcademicYear::new(start_year + offset))
            .collect();
        Self {
            start_year,
            limits,
            years,
        }
    }

    pub fn start_year(&self) -> u32 {
        self.start_year
    }

    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    pub fn years(&self) -> &[AcademicYear] {
        &self.years
    }

    pub fn year(&self, year: u32) -> Option<&AcademicYear> {
        self.years.iter().find(|y| y.year == year)
    }

    pub fn slot(&self, year: u32, term: Term) -> Option<&Slot> {
        self.year(year).and_then(|y| y.slot(term))
    }

    pub(crate) fn years_mut(&mut self) -> &mut [AcademicYear] {
        &mut self.years
    }

    pub(crate) fn slot_mut(&mut self, year: u32, term: Term) -> Option<&mut Slot> {
        self.years
            .iter_mut()
            .find(|y| y.year == year)
            .and_then(|y| y.slot_mut(term))
    }

    /// Every slot, year by year, in term order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.years.iter().flat_map(|year| year.slots.iter())
    }

    pub fn placements(&self) -> impl Iterator<Item = (&Slot, &PlacedCourse)> {
        self.slots()
            .flat_map(|slot| slot.courses.iter().map(move |course| (slot, course)))
    }

    pub fn placed_labels(&self) -> Vec<&str> {
        self.placements()
            .map(|(_, course)| course.label.as_str())
            .collect()
    }

    /// The slot a course was placed in, if any.
    pub fn find_course(&self, label: &str) -> Option<&Slot> {
        self.slots().find(|slot| slot.contains(label))
    }

    pub fn total_credits(&self) -> u64 {
        self.years.iter().map(AcademicYear::total_credits).sum()
    }

    /// Long-form view: one row per placement with `year`, `term`, `course`, `credits`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut years: Vec<i64> = Vec::new();
        let mut terms: Vec<&str> = Vec::new();
        let mut labels: Vec<&str> = Vec::new();
        let mut credits: Vec<i64> = Vec::new();

        for (slot, course) in self.placements() {
            years.push(i64::from(slot.year));
            terms.push(slot.term.name());
            labels.push(course.label.as_str());
            credits.push(i64::from(course.credits));
        }

        DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("year"), years).into_column(),
            Series::new(PlSmallStr::from_static("term"), terms).into_column(),
            Series::new(PlSmallStr::from_static("course"), labels).into_column(),
            Series::new(PlSmallStr::from_static("credits"), credits).into_column(),
        ])
    }

    /// Placements for a single academic year.
    pub fn year_frame(&self, year: u32) -> PolarsResult<DataFrame> {
        self.to_dataframe()?
            .lazy()
            .filter(col("year").eq(lit(i64::from(year))))
            .collect()
    }
}
