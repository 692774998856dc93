//! Tariff DTOs - Data Transfer Objects per il calcolatore tariffario

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Richiesta di stima: valore in dogana piu' costi accessori opzionali
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct TariffEstimateRequestDTO {
    #[validate(range(min = 0.0))]
    pub customs_value: f64,
    #[validate(range(min = 0.0))]
    pub shipping_cost: Option<f64>,
    #[validate(range(min = 0.0))]
    pub insurance_cost: Option<f64>,
    pub hs_code: Option<String>,
}

/// Stima completa: la risposta riporta l'intero breakdown della formula
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TariffEstimateDTO {
    pub customs_value: f64,
    pub shipping_cost: f64,
    pub insurance_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    pub duty_rate: f64,
    pub duty: f64,
    pub vat_rate: f64,
    pub vat: f64,
    pub processing_fee: f64,
    pub total: f64,
}
