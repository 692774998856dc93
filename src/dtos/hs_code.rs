//! HsCode DTOs - Data Transfer Objects per la nomenclatura HS

use crate::entities::HsCode;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct HsCodeDTO {
    pub code: String,
    pub description: String,
    pub duty_rate: f64,
    pub category: String,
}

impl From<HsCode> for HsCodeDTO {
    fn from(value: HsCode) -> Self {
        Self {
            code: value.code,
            description: value.description,
            duty_rate: value.duty_rate,
            category: value.category,
        }
    }
}
