use crate::course::Course;
use crate::schedule::AcademicYear;
use std::collections::HashSet;

/// One year of greedy first-fit placement.
///
/// Courses are visited in catalog order and each one goes into the first of
/// its eligible terms that still has room. A course is placed at most once.
pub struct FirstFitPass<'p, 'c> {
    remaining: &'p [&'c Course],
    max_credits_per_term: u32,
}

impl<'p, 'c> FirstFitPass<'p, 'c> {
    pub fn new(remaining: &'p [&'c Course], max_credits_per_term: u32) -> Self {
        Self {
            remaining,
            max_credits_per_term,
        }
    }

    /// Fills `year` and returns the labels placed in it.
    pub fn execute(&self, year: &mut AcademicYear) -> HashSet<&'c str> {
        let mut placed = HashSet::new();

        for &course in self.remaining {
            for term in course.eligible_terms() {
                let Some(slot) = year.slot_mut(*term) else {
                    continue;
                };
                if slot.has_room_for(course.credits(), self.max_credits_per_term) {
                    slot.place(course.label(), course.credits());
                    tracing::debug!(
                        course = course.label(),
                        year = slot.year(),
                        term = %term,
                        credits = course.credits(),
                        "placed course"
                    );
                    placed.insert(course.label());
                    break;
                }
            }
        }

        placed
    }
}
