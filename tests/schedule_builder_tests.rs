use course_planner::{
    CourseCatalog, MAX_CREDITS_PER_TERM, PlanLimits, ScheduleBuilder, ScheduleError, Term,
    create_schedule,
};
use std::collections::HashSet;

fn catalog_of(courses: &[(&str, &[&str], i64)]) -> CourseCatalog {
    let mut catalog = CourseCatalog::new();
    for (label, terms, credits) in courses {
        catalog.add_course(label, terms.iter(), *credits).unwrap();
    }
    catalog
}

fn crowded_catalog() -> CourseCatalog {
    let mut catalog = CourseCatalog::new();
    let tag_sets: [&[&str]; 4] = [&["F"], &["W", "S"], &["F", "W", "S"], &["S"]];
    for idx in 0..40 {
        let label = format!("COURSE {idx:03}");
        let credits = 3 + (idx % 4) as i64;
        catalog
            .add_course(&label, tag_sets[idx % tag_sets.len()].iter(), credits)
            .unwrap();
    }
    catalog.add_course("THESIS", ["F"], 20).unwrap();
    catalog
}

#[test]
fn full_fall_slot_pushes_course_to_next_year() {
    let catalog = catalog_of(&[("A", &["F"], 18), ("B", &["F"], 4)]);
    let outcome = create_schedule(&catalog, 22).unwrap();

    let fall_22 = outcome.schedule.slot(22, Term::Fall).unwrap();
    assert_eq!(fall_22.total_credits(), 18);
    assert!(fall_22.contains("A"));
    assert!(outcome.schedule.slot(23, Term::Fall).unwrap().contains("B"));
    assert!(outcome.unplaced.is_empty());
}

#[test]
fn multi_term_course_lands_once_in_first_term() {
    let catalog = catalog_of(&[("X", &["F", "W", "S"], 6)]);
    let outcome = create_schedule(&catalog, 22).unwrap();

    let placements: Vec<_> = outcome.schedule.placements().collect();
    assert_eq!(placements.len(), 1);
    let (slot, course) = placements[0];
    assert_eq!((slot.year(), slot.term()), (22, Term::Fall));
    assert_eq!(course.label, "X");
    assert!(outcome.unplaced.is_empty());
    assert!(!outcome.quota_met);
}

#[test]
fn placed_and_unplaced_partition_the_catalog() {
    let catalog = crowded_catalog();
    let outcome = create_schedule(&catalog, 24).unwrap();

    let placed: Vec<&str> = outcome.schedule.placed_labels();
    let placed_set: HashSet<&str> = placed.iter().copied().collect();
    assert_eq!(placed.len(), placed_set.len(), "a course was placed twice");

    let unplaced: HashSet<&str> = outcome.unplaced.iter().map(String::as_str).collect();
    assert!(placed_set.is_disjoint(&unplaced));

    let all: HashSet<&str> = catalog.labels().collect();
    let union: HashSet<&str> = placed_set.union(&unplaced).copied().collect();
    assert_eq!(union, all);
    assert!(outcome.unplaced.contains(&"THESIS".to_string()));
}

#[test]
fn slots_stay_under_cap_and_respect_eligibility() {
    let catalog = crowded_catalog();
    let outcome = create_schedule(&catalog, 24).unwrap();

    for slot in outcome.schedule.slots() {
        assert!(slot.total_credits() <= u64::from(MAX_CREDITS_PER_TERM));
    }
    for (slot, placed) in outcome.schedule.placements() {
        let course = catalog.get(&placed.label).unwrap();
        assert!(course.is_offered_in(slot.term()));
        assert_eq!(course.credits(), placed.credits);
    }
}

#[test]
fn building_twice_gives_identical_outcomes() {
    let catalog = crowded_catalog();
    let first = create_schedule(&catalog, 22).unwrap();
    let second = create_schedule(&catalog, 22).unwrap();
    assert_eq!(first, second);
}

#[test]
fn quota_follows_catalog_credits_not_placements() {
    let mut catalog = CourseCatalog::new();
    for idx in 0..10 {
        catalog
            .add_course(&format!("BIG {idx}"), ["F"], 19)
            .unwrap();
    }
    let outcome = create_schedule(&catalog, 22).unwrap();
    assert_eq!(outcome.catalog_credits, 190);
    assert!(outcome.quota_met);
    assert_eq!(outcome.schedule.total_credits(), 0);
    assert_eq!(outcome.unplaced.len(), 10);
}

#[test]
fn huge_credit_values_leave_courses_unplaced_and_meet_quota() {
    let catalog = catalog_of(&[
        ("A", &["F"], 3_000_000_000),
        ("B", &["W"], 3_000_000_000),
        ("C", &["S"], 4),
    ]);
    let outcome = create_schedule(&catalog, 22).unwrap();
    assert_eq!(outcome.catalog_credits, 6_000_000_004);
    assert!(outcome.quota_met);
    assert_eq!(outcome.unplaced, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(outcome.summary().placed_credits, 4);
}

#[test]
fn empty_catalog_is_an_error() {
    let err = create_schedule(&CourseCatalog::new(), 22).unwrap_err();
    assert_eq!(err, ScheduleError::EmptyCatalog);
}

#[test]
fn grid_covers_four_years_of_three_terms() {
    let catalog = catalog_of(&[("A", &["S"], 3)]);
    let outcome = create_schedule(&catalog, 98).unwrap();
    let years: Vec<u32> = outcome.schedule.years().iter().map(|y| y.year()).collect();
    assert_eq!(years, vec![98, 99, 100, 101]);
    assert_eq!(outcome.schedule.slots().count(), 12);
    assert!(outcome.schedule.slot(98, Term::Spring).unwrap().contains("A"));
}

#[test]
fn alternate_limits_change_cap_and_horizon() {
    let catalog = catalog_of(&[("A", &["F"], 10), ("B", &["F"], 10), ("C", &["F"], 10)]);
    let limits = PlanLimits {
        graduation_quota: 30,
        max_credits_per_term: 10,
        horizon_years: 2,
    };
    let outcome = ScheduleBuilder::new(limits).build(&catalog, 30).unwrap();

    assert_eq!(outcome.schedule.years().len(), 2);
    assert!(outcome.schedule.slot(30, Term::Fall).unwrap().contains("A"));
    assert!(outcome.schedule.slot(31, Term::Fall).unwrap().contains("B"));
    assert_eq!(outcome.unplaced, vec!["C".to_string()]);
    assert!(outcome.quota_met);
}

#[test]
fn earlier_catalog_entries_win_contested_slots() {
    let catalog = catalog_of(&[("FIRST", &["W"], 12), ("SECOND", &["W"], 12)]);
    let outcome = create_schedule(&catalog, 22).unwrap();
    assert!(outcome.schedule.slot(22, Term::Winter).unwrap().contains("FIRST"));
    assert!(outcome.schedule.slot(23, Term::Winter).unwrap().contains("SECOND"));
}
