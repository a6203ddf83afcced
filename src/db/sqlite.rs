//! SQLite-backed catalog store.
//!
//! Stock decrement is a single conditional UPDATE checked by affected-row
//! count, so the check-then-decrement sequence is atomic at the storage
//! layer and concurrent orders cannot oversell a medicine.

use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

use super::{CatalogEntry, CatalogError, CatalogRepository};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS medicines (
    name        TEXT PRIMARY KEY,
    price       REAL NOT NULL,
    tax_percent REAL NOT NULL DEFAULT 0,
    stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0)
);
CREATE TABLE IF NOT EXISTS doctor_registry (
    registration_number TEXT PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS invoices (
    invoice_id TEXT PRIMARY KEY,
    total      REAL NOT NULL,
    issued_at  TEXT NOT NULL
);
";

/// Catalog store on a SQLite file.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open (creating parent directories and schema as needed).
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_memory() -> Result<Self, CatalogError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, CatalogError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CatalogError> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Unavailable("catalog mutex poisoned".into()))
    }

    /// Insert or replace a medicine row (seeding / admin path).
    pub fn upsert_medicine(&self, entry: &CatalogEntry) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO medicines (name, price, tax_percent, stock)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(name) DO UPDATE SET
                 price = excluded.price,
                 tax_percent = excluded.tax_percent,
                 stock = excluded.stock",
            params![entry.name, entry.price, entry.tax_percent, entry.stock],
        )?;
        Ok(())
    }

    /// Register a doctor registration number (seeding / admin path).
    pub fn add_registration(&self, registration: &str) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO doctor_registry (registration_number) VALUES (?1)",
            params![registration],
        )?;
        Ok(())
    }
}

impl CatalogRepository for SqliteCatalog {
    fn medicine_names(&self) -> Result<Vec<String>, CatalogError> {
        let conn = self.lock()?;
        // rowid order = insertion order; keeps fuzzy-match ties deterministic
        let mut stmt = conn.prepare("SELECT name FROM medicines ORDER BY rowid")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn find_medicine(&self, name: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let conn = self.lock()?;
        let entry = conn
            .query_row(
                "SELECT name, price, tax_percent, stock FROM medicines WHERE name = ?1",
                params![name],
                |row| {
                    Ok(CatalogEntry {
                        name: row.get(0)?,
                        price: row.get(1)?,
                        tax_percent: row.get(2)?,
                        stock: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn decrement_stock(&self, name: &str, quantity: u32) -> Result<bool, CatalogError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "UPDATE medicines SET stock = stock - ?1 WHERE name = ?2 AND stock >= ?1",
            params![quantity, name],
        )?;
        Ok(affected > 0)
    }

    fn increment_stock(&self, name: &str, quantity: u32) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE medicines SET stock = stock + ?1 WHERE name = ?2",
            params![quantity, name],
        )?;
        Ok(())
    }

    fn registration_exists(&self, registration: &str) -> Result<bool, CatalogError> {
        let conn = self.lock()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM doctor_registry WHERE registration_number = ?1",
                params![registration],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn record_invoice(&self, invoice_id: &str, total: f64) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO invoices (invoice_id, total, issued_at) VALUES (?1, ?2, ?3)",
            params![
                invoice_id,
                total,
                Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
            ],
        )?;
        Ok(())
    }
}
