mod memory;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::models::*;

pub use memory::MemoryStore;

/// Read-by-filter contract of the backing record store.
///
/// Implementations are stateless per call: no session or transaction state
/// is carried from one `read` to the next. An empty predicate returns the
/// whole collection.
pub trait RecordStore: Send + Sync {
    fn read(&self, filter: &FilterPredicate) -> Result<Vec<StoredRecord>>;
}

/// SQLite-backed record store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

const SELECT_COLUMNS: &str = "id, rec_num, animal_id, animal_type, breed, color, name, sex_upon_outcome,
     age_upon_outcome, age_upon_outcome_in_weeks, date_of_birth, datetime, monthyear,
     outcome_type, outcome_subtype, location_lat, location_long";

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "rescue-dashboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("shelter.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Record operations
    // ============================================================

    pub fn insert_record(&self, record: AnimalRecord) -> Result<StoredRecord> {
        let conn = self.lock()?;
        insert_with(&conn, record)
    }

    /// Insert a batch of records in one transaction. Either all of them are
    /// stored or none are.
    pub fn insert_records(&self, records: Vec<AnimalRecord>) -> Result<Vec<StoredRecord>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let stored = records
            .into_iter()
            .map(|record| insert_with(&tx, record))
            .collect::<Result<Vec<_>>>()?;

        tx.commit()?;
        Ok(stored)
    }

    pub fn count_records(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM animals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn find_records(&self, filter: &FilterPredicate) -> Result<Vec<StoredRecord>> {
        let (where_sql, params) = where_clause(filter);
        let sql = format!(
            "SELECT {} FROM animals{} ORDER BY seq",
            SELECT_COLUMNS, where_sql
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(rusqlite::params_from_iter(params), stored_record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            clauses = filter.clauses.len(),
            rows = records.len(),
            "Read records from store"
        );
        Ok(records)
    }
}

impl RecordStore for Database {
    fn read(&self, filter: &FilterPredicate) -> Result<Vec<StoredRecord>> {
        self.find_records(filter)
    }
}

fn insert_with(conn: &Connection, record: AnimalRecord) -> Result<StoredRecord> {
    let id = Uuid::new_v4();

    conn.execute(
        "INSERT INTO animals (id, rec_num, animal_id, animal_type, breed, color, name, sex_upon_outcome,
             age_upon_outcome, age_upon_outcome_in_weeks, date_of_birth, datetime, monthyear,
             outcome_type, outcome_subtype, location_lat, location_long, imported_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            id.to_string(),
            record.rec_num,
            &record.animal_id,
            &record.animal_type,
            &record.breed,
            &record.color,
            &record.name,
            &record.sex_upon_outcome,
            &record.age_upon_outcome,
            record.age_upon_outcome_in_weeks,
            &record.date_of_birth,
            &record.datetime,
            &record.monthyear,
            &record.outcome_type,
            &record.outcome_subtype,
            record.location_lat,
            record.location_long,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(StoredRecord { id, record })
}

/// Render a predicate as a SQL `WHERE` clause with positional parameters.
///
/// Column names come from the typed field enums, never from caller input.
fn where_clause(filter: &FilterPredicate) -> (String, Vec<Value>) {
    if filter.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut conditions = Vec::with_capacity(filter.clauses.len());
    let mut params = Vec::new();

    for clause in &filter.clauses {
        match clause {
            Clause::OneOf { field, values } if values.is_empty() => {
                tracing::debug!(column = field.column(), "Empty set clause matches nothing");
                conditions.push("1 = 0".to_string());
            }
            Clause::OneOf { field, values } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                conditions.push(format!("{} IN ({})", field.column(), placeholders));
                params.extend(values.iter().cloned().map(Value::Text));
            }
            Clause::Equals { field, value } => {
                conditions.push(format!("{} = ?", field.column()));
                params.push(Value::Text(value.clone()));
            }
            Clause::Between { field, min, max } => {
                conditions.push(format!("{} BETWEEN ? AND ?", field.column()));
                params.push(Value::Real(*min));
                params.push(Value::Real(*max));
            }
        }
    }

    (format!(" WHERE {}", conditions.join(" AND ")), params)
}

fn stored_record_from_row(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

    Ok(StoredRecord {
        id,
        record: AnimalRecord {
            rec_num: row.get(1)?,
            animal_id: row.get(2)?,
            animal_type: row.get(3)?,
            breed: row.get(4)?,
            color: row.get(5)?,
            name: row.get(6)?,
            sex_upon_outcome: row.get(7)?,
            age_upon_outcome: row.get(8)?,
            age_upon_outcome_in_weeks: row.get(9)?,
            date_of_birth: row.get(10)?,
            datetime: row.get(11)?,
            monthyear: row.get(12)?,
            outcome_type: row.get(13)?,
            outcome_subtype: row.get(14)?,
            location_lat: row.get(15)?,
            location_long: row.get(16)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn empty_predicate_has_no_where_clause() {
        let (sql, params) = where_clause(&FilterPredicate::match_all());
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn rescue_predicate_renders_three_conditions() {
        let (sql, params) = where_clause(&query::build(Selector::Water));
        assert_eq!(
            sql,
            " WHERE breed IN (?, ?, ?) AND sex_upon_outcome = ? AND age_upon_outcome_in_weeks BETWEEN ? AND ?"
        );
        assert_eq!(params.len(), 6);
        assert_eq!(params[3], Value::Text("Intact Female".to_string()));
        assert_eq!(params[4], Value::Real(26.0));
        assert_eq!(params[5], Value::Real(156.0));
    }

    #[test]
    fn empty_set_clause_matches_nothing() {
        let filter = FilterPredicate::match_all().with(Clause::OneOf {
            field: TextField::Breed,
            values: vec![],
        });
        let (sql, params) = where_clause(&filter);
        assert_eq!(sql, " WHERE 1 = 0");
        assert!(params.is_empty());
    }
}
