//! Tariff services - Calcolatore di dazi e IVA all'importazione
//!
//! La formula e' deterministica e senza stato:
//!   duty = customs_value * duty_rate
//!   vat  = (customs_value + shipping + insurance + duty) * VAT_RATE
//!   total = duty + vat + PROCESSING_FEE
//! Il duty_rate arriva dalla nomenclatura HS quando un codice viene fornito
//! (un codice sconosciuto e' un 404); senza codice si applica l'aliquota di
//! default.

use crate::core::{AppError, AppState};
use crate::dtos::{TariffEstimateDTO, TariffEstimateRequestDTO};
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, instrument};
use validator::Validate;

/// Aliquota applicata quando la richiesta non porta un codice HS
const DEFAULT_DUTY_RATE: f64 = 0.05;
/// IVA all'importazione
const VAT_RATE: f64 = 0.20;
/// Diritti fissi di gestione pratica
const PROCESSING_FEE: f64 = 25.0;

/// Arrotondamento monetario a due decimali
fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Calcolo puro della stima, separato dall'handler per essere testabile
fn compute_estimate(request: &TariffEstimateRequestDTO, duty_rate: f64) -> TariffEstimateDTO {
    let shipping_cost = request.shipping_cost.unwrap_or(0.0);
    let insurance_cost = request.insurance_cost.unwrap_or(0.0);

    let duty = round_currency(request.customs_value * duty_rate);
    // l'IVA si applica sulla base imponibile dazio incluso
    let vat = round_currency((request.customs_value + shipping_cost + insurance_cost + duty) * VAT_RATE);
    let total = round_currency(duty + vat + PROCESSING_FEE);

    TariffEstimateDTO {
        customs_value: request.customs_value,
        shipping_cost,
        insurance_cost,
        hs_code: request.hs_code.clone(),
        duty_rate,
        duty,
        vat_rate: VAT_RATE,
        vat,
        processing_fee: PROCESSING_FEE,
        total,
    }
}

#[instrument(skip(state, body))]
pub async fn estimate_tariff(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TariffEstimateRequestDTO>, // JSON body
) -> Result<Json<TariffEstimateDTO>, AppError> {
    debug!("Estimating tariff");
    // 1. Validare gli importi (non negativi)
    // 2. Risolvere l'aliquota dal codice HS se fornito; un codice fuori
    //    nomenclatura e' un 404, non una stima con l'aliquota sbagliata
    // 3. Senza codice, aliquota di default
    // 4. Applicare la formula e ritornare il breakdown completo

    body.validate()?;

    let duty_rate = match body.hs_code.as_deref() {
        Some(code) => state
            .hs_code
            .find_by_code(code)
            .await?
            .ok_or_else(|| {
                debug!("Tariff estimate with unknown HS code {}", code);
                AppError::not_found("HS code not found")
            })?
            .duty_rate,
        None => DEFAULT_DUTY_RATE,
    };

    Ok(Json(compute_estimate(&body, duty_rate)))
}
