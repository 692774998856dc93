//! HsCodeRepository - Nomenclatura HS, sola lettura

use sqlx::{Error, SqlitePool};

use crate::entities::HsCode;

const HS_COLUMNS: &str = "code, description, duty_rate, category";

/// Numero massimo di risultati per una ricerca
const SEARCH_LIMIT: i64 = 20;

// HS CODE REPO
pub struct HsCodeRepository {
    connection_pool: SqlitePool,
}

impl HsCodeRepository {
    pub fn new(connection_pool: SqlitePool) -> HsCodeRepository {
        Self { connection_pool }
    }

    /// Lookup esatto per codice
    pub async fn find_by_code(&self, code: &str) -> Result<Option<HsCode>, Error> {
        let hs_code = sqlx::query_as::<_, HsCode>(&format!(
            "SELECT {HS_COLUMNS} FROM hs_codes WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(hs_code)
    }

    /// Ricerca per sottostringa su codice o descrizione
    /// (LIKE e' case-insensitive in SQLite per l'ASCII)
    pub async fn search(&self, term: &str) -> Result<Vec<HsCode>, Error> {
        let pattern = format!("%{}%", term);
        let hs_codes = sqlx::query_as::<_, HsCode>(&format!(
            "SELECT {HS_COLUMNS} FROM hs_codes WHERE code LIKE ? OR description LIKE ? \
             ORDER BY code LIMIT ?"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(hs_codes)
    }
}
