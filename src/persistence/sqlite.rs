use super::{PersistenceError, PersistenceResult, ScheduleStore};
use crate::limits::PlanLimits;
use crate::schedule::Schedule;
use crate::term::Term;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Mutex, MutexGuard};

pub struct SqliteScheduleStore {
    connection: Mutex<Connection>,
}

impl SqliteScheduleStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> PersistenceResult<Self> {
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS schedule_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                start_year INTEGER NOT NULL,
                limits_json TEXT NOT NULL,
                generated_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS placements (
                position INTEGER PRIMARY KEY,
                year INTEGER NOT NULL,
                term TEXT NOT NULL,
                course TEXT NOT NULL,
                credits INTEGER NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite connection lock poisoned".into()))
    }

    fn save_meta(tx: &rusqlite::Transaction, schedule: &Schedule) -> PersistenceResult<()> {
        let limits_json = serde_json::to_string(schedule.limits())?;
        tx.execute("DELETE FROM schedule_meta", [])?;
        tx.execute(
            "INSERT INTO schedule_meta (id, start_year, limits_json, generated_at) VALUES (1, ?1, ?2, ?3)",
            params![schedule.start_year(), limits_json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn save_placements(tx: &rusqlite::Transaction, schedule: &Schedule) -> PersistenceResult<()> {
        tx.execute("DELETE FROM placements", [])?;
        let mut stmt = tx.prepare(
            "INSERT INTO placements (position, year, term, course, credits) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (position, (slot, course)) in schedule.placements().enumerate() {
            stmt.execute(params![
                position as i64,
                slot.year(),
                slot.term().tag(),
                course.label,
                course.credits
            ])?;
        }
        Ok(())
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn save_schedule(&self, schedule: &Schedule) -> PersistenceResult<()> {
        super::validate_schedule(schedule)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::save_meta(&tx, schedule)?;
        Self::save_placements(&tx, schedule)?;
        tx.commit()?;
        tracing::info!(
            placements = schedule.placements().count(),
            "schedule saved to sqlite"
        );
        Ok(())
    }

    fn load_schedule(&self) -> PersistenceResult<Option<Schedule>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT start_year, limits_json FROM schedule_meta WHERE id = 1")?;
        let meta: Option<(u32, String)> = stmt
            .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((start_year, limits_json)) = meta else {
            return Ok(None);
        };

        let limits: PlanLimits = serde_json::from_str(&limits_json)?;
        let mut schedule = super::file::empty_schedule(start_year, limits)?;

        let mut stmt =
            conn.prepare("SELECT year, term, course, credits FROM placements ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })?;

        for row in rows {
            let (year, tag, course, credits) = row?;
            let term = tag
                .parse::<Term>()
                .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
            let slot = schedule.slot_mut(year, term).ok_or_else(|| {
                PersistenceError::InvalidData(format!(
                    "stored placement for '{course}' falls outside the plan (year {year})"
                ))
            })?;
            slot.place(course, credits);
        }

        super::validate_schedule(&schedule)?;
        Ok(Some(schedule))
    }
}
