use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::source::SourceId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/data";

/// Environment variable overriding the base URL both sources are fetched from.
pub const BASE_URL_ENV: &str = "VEHICLE_FINANCE_BASE_URL";
/// Environment variable overriding the vehicle file name.
pub const VEHICLES_PATH_ENV: &str = "VEHICLES_CSV_PATH";
/// Environment variable overriding the installment file name.
pub const INSTALLMENTS_PATH_ENV: &str = "INSTALLMENTS_CSV_PATH";

/// Columns of the vehicle (primary) source, in export order.
pub const VEHICLE_FIELDS: &[&str] = &[
    "vehicle_id",
    "type",
    "name",
    "brand",
    "model",
    "color",
    "number",
    "status",
    "seller_name",
    "seller_phone",
    "seller_city",
    "buy_value",
    "buy_date",
    "comments",
    "buyer_id",
    "record_no",
    "buyer_name",
    "buyer_phone",
    "buyer_address",
    "sale_value",
    "finance_amount",
    "emi_amount",
    "tenure",
    "sale_date",
];

/// Columns of the installment (child) source, in export order.
pub const INSTALLMENT_FIELDS: &[&str] = &[
    "id",
    "buyer_id",
    "emi_no",
    "due_date",
    "amount",
    "status",
    "paid_date",
];

pub fn source_files() -> HashMap<SourceId, String> {
    HashMap::from([
        (
            SourceId::Vehicles,
            env::var(VEHICLES_PATH_ENV).unwrap_or_else(|_| "full.csv".to_string()),
        ),
        (
            SourceId::Installments,
            env::var(INSTALLMENTS_PATH_ENV).unwrap_or_else(|_| "emi.csv".to_string()),
        ),
    ])
}

pub fn default_base_url() -> String {
    env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("vehicle-finance-sdk")
    } else {
        PathBuf::from(".vehicle-finance-sdk-cache")
    }
}
