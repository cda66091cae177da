use super::{PersistenceError, PersistenceResult};
use crate::catalog::{CATALOG_COLUMNS, CatalogError, CourseCatalog};
use crate::limits::PlanLimits;
use crate::schedule::Schedule;
use crate::term::Term;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct CatalogCsvRecord {
    #[serde(rename = "Class")]
    class: String,
    #[serde(rename = "Term")]
    term: String,
    #[serde(rename = "Credits")]
    credits: i64,
}

/// Reads a `Class,Term,Credits` catalog. Any bad row fails the whole load.
pub fn read_catalog<R: Read>(reader: R) -> PersistenceResult<CourseCatalog> {
    let mut reader = csv::Reader::from_reader(reader);
    let found: Vec<String> = reader.headers()?.iter().map(ToOwned::to_owned).collect();
    if found != CATALOG_COLUMNS {
        return Err(CatalogError::Schema { found }.into());
    }

    let mut catalog = CourseCatalog::new();
    for record in reader.deserialize::<CatalogCsvRecord>() {
        let record = record?;
        catalog.add_course(&record.class, Term::split_tags(&record.term), record.credits)?;
        tracing::debug!(course = %record.class, terms = %record.term, credits = record.credits, "loaded course");
    }
    Ok(catalog)
}

pub fn load_catalog_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<CourseCatalog> {
    let file = File::open(path.as_ref())?;
    let catalog = read_catalog(file)?;
    tracing::info!(
        path = %path.as_ref().display(),
        courses = catalog.len(),
        total_credits = catalog.total_credits(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn write_catalog<W: Write>(catalog: &CourseCatalog, writer: W) -> PersistenceResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(CATALOG_COLUMNS)?;
    for course in catalog {
        writer.serialize(CatalogCsvRecord {
            class: course.label().to_string(),
            term: Term::join_tags(course.eligible_terms()),
            credits: i64::from(course.credits()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_catalog_to_csv<P: AsRef<Path>>(
    catalog: &CourseCatalog,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    write_catalog(catalog, file)?;
    tracing::info!(path = %path.as_ref().display(), courses = catalog.len(), "catalog saved");
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    generated_at: DateTime<Utc>,
    schedule: Schedule,
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let snapshot = ScheduleSnapshot {
        generated_at: Utc::now(),
        schedule: schedule.clone(),
    };
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    tracing::info!(path = %path.as_ref().display(), "schedule saved as json");
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(file)?;
    super::validate_schedule(&snapshot.schedule)?;
    Ok(snapshot.schedule)
}

/// One placement per row. Empty slots get a row with blank `course` and
/// `credits` so the whole grid survives a round trip.
#[derive(Default, Serialize, Deserialize)]
struct SlotCsvRecord {
    year: u32,
    term: String,
    course: String,
    credits: String,
    #[serde(default)]
    limits_json: String,
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);

    let mut limits_json = serde_json::to_string(schedule.limits())?;
    for slot in schedule.slots() {
        let mut records = Vec::with_capacity(slot.courses().len().max(1));
        if slot.is_empty() {
            records.push(SlotCsvRecord {
                year: slot.year(),
                term: slot.term().tag().to_string(),
                ..SlotCsvRecord::default()
            });
        }
        for course in slot.courses() {
            records.push(SlotCsvRecord {
                year: slot.year(),
                term: slot.term().tag().to_string(),
                course: course.label.clone(),
                credits: course.credits.to_string(),
                limits_json: String::new(),
            });
        }
        for mut record in records {
            record.limits_json = std::mem::take(&mut limits_json);
            writer.serialize(record)?;
        }
    }
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), "schedule saved as csv");
    Ok(())
}

pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for record in reader.deserialize::<SlotCsvRecord>() {
        records.push(record?);
    }

    let Some(first) = records.first() else {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no schedule rows".into(),
        ));
    };

    // Files written without limits fall back to the standard plan.
    let limits = if first.limits_json.trim().is_empty() {
        PlanLimits::default()
    } else {
        serde_json::from_str::<PlanLimits>(&first.limits_json)?
    };

    let start_year = records
        .iter()
        .map(|record| record.year)
        .min()
        .unwrap_or_default();
    let end_year = records
        .iter()
        .map(|record| record.year)
        .max()
        .unwrap_or_default();
    // Every slot is written, so the rows must span exactly the stored horizon.
    let span = u64::from(end_year - start_year) + 1;
    if span != u64::from(limits.horizon_years) {
        return Err(PersistenceError::InvalidData(format!(
            "rows span {span} years ({start_year}..={end_year}) but the stored horizon is {}",
            limits.horizon_years
        )));
    }
    let mut schedule = empty_schedule(start_year, limits)?;

    for record in records {
        let term = record
            .term
            .parse::<Term>()
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        let slot = schedule.slot_mut(record.year, term).ok_or_else(|| {
            PersistenceError::InvalidData(format!(
                "year {} is outside the {}-year plan starting at {}",
                record.year, limits.horizon_years, start_year
            ))
        })?;
        if record.course.trim().is_empty() {
            continue;
        }
        let credits = record.credits.trim().parse::<u32>().map_err(|err| {
            PersistenceError::InvalidData(format!(
                "invalid credits '{}' for '{}': {err}",
                record.credits, record.course
            ))
        })?;
        slot.place(record.course, credits);
    }

    super::validate_schedule(&schedule)?;
    Ok(schedule)
}

/// Upper bound on a horizon read back from storage.
const MAX_STORED_HORIZON_YEARS: u32 = 100;

pub(crate) fn empty_schedule(start_year: u32, limits: PlanLimits) -> PersistenceResult<Schedule> {
    if limits.horizon_years == 0
        || limits.horizon_years > MAX_STORED_HORIZON_YEARS
        || start_year.checked_add(limits.horizon_years).is_none()
    {
        return Err(PersistenceError::InvalidData(format!(
            "cannot lay out a {}-year plan starting at {}",
            limits.horizon_years, start_year
        )));
    }
    Ok(Schedule::empty(start_year, limits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_catalog_splits_term_lists() {
        let data = "Class,Term,Credits\nMATH 101,\"F, W\",4\nCS 210,S,4\n";
        let catalog = read_catalog(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.eligible_terms("MATH 101").unwrap(),
            &[Term::Fall, Term::Winter]
        );
        assert_eq!(catalog.credits("CS 210").unwrap(), 4);
    }

    #[test]
    fn read_catalog_rejects_reordered_columns() {
        let data = "Term,Class,Credits\nF,MATH 101,4\n";
        match read_catalog(data.as_bytes()) {
            Err(PersistenceError::Catalog(CatalogError::Schema { found })) => {
                assert_eq!(found, vec!["Term", "Class", "Credits"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_schedule_rejects_oversized_horizon() {
        let limits = PlanLimits {
            horizon_years: 4_000_000_000,
            ..PlanLimits::default()
        };
        assert!(matches!(
            empty_schedule(22, limits),
            Err(PersistenceError::InvalidData(_))
        ));
        assert!(empty_schedule(22, PlanLimits::default()).is_ok());
    }

    #[test]
    fn write_catalog_emits_header_for_empty_catalog() {
        let mut out = Vec::new();
        write_catalog(&CourseCatalog::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Class,Term,Credits\n");
    }
}
