//! HsCode entity - Voce della nomenclatura HS
//!
//! Tabella di sola lettura per l'API, popolata dalle migrations.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct HsCode {
    pub code: String,
    pub description: String,
    // aliquota daziaria come frazione (0.12 = 12%)
    pub duty_rate: f64,
    pub category: String,
}
