//! Shared test fixtures for the vehicle finance SDK integration tests.
//!
//! Provides small vehicle and installment CSV exports covering a sold
//! vehicle with installments, a sold vehicle with none, stock vehicles, and
//! a row with a stale `status` but a linked buyer.

#![allow(dead_code)]

use chrono::NaiveDate;
use vehicle_finance_sdk::config::{INSTALLMENT_FIELDS, VEHICLE_FIELDS};
use vehicle_finance_sdk::RecordStore;

/// Reference date used for overdue calculations in tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Build a CSV text from a header and rows of `(column, value)` pairs.
/// Columns not mentioned are left empty.
pub fn csv(header: &[&str], rows: &[&[(&str, &str)]]) -> String {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = header
            .iter()
            .map(|col| {
                let value = row
                    .iter()
                    .find(|(k, _)| k == col)
                    .map(|(_, v)| *v)
                    .unwrap_or("");
                quote(value)
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

fn quote(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn vehicles_csv() -> String {
    csv(
        VEHICLE_FIELDS,
        &[
            &[
                ("vehicle_id", "V1"),
                ("type", "Bike"),
                ("name", "Pulsar 150"),
                ("brand", "Bajaj"),
                ("model", "2019"),
                ("color", "Black"),
                ("number", "AP 09 AB 1234"),
                ("status", "Sold"),
                ("seller_name", "Ravi"),
                ("seller_phone", "9000000001"),
                ("seller_city", "Hyderabad"),
                ("buy_value", "45000"),
                ("buy_date", "2024-01-05"),
                ("comments", "Minor scratches, new tyres"),
                ("buyer_id", "B1"),
                ("buyer_name", "Suresh"),
                ("buyer_phone", "9000000002"),
                ("sale_value", "60000"),
                ("finance_amount", "30000"),
                ("emi_amount", "10000"),
                ("tenure", "3"),
                ("sale_date", "2024-03-10"),
            ],
            &[
                ("vehicle_id", "V2"),
                ("type", "Car"),
                ("name", "Swift"),
                ("brand", "Maruti"),
                ("model", "VXI"),
                ("number", "TS 07 CD 5678"),
                ("status", "Stock"),
                ("seller_name", "Anil"),
                ("seller_city", "Warangal"),
                ("buy_value", "350000"),
            ],
            &[
                ("vehicle_id", "V3"),
                ("type", "Bike"),
                ("name", "Splendor Plus"),
                ("brand", "Hero"),
                ("model", "2021"),
                ("number", "AP 10 EF 9012"),
                ("status", "Stock"),
                ("seller_name", "Kiran"),
            ],
            &[
                ("vehicle_id", "V4"),
                ("type", "Car"),
                ("name", "City"),
                ("brand", "Honda"),
                ("model", "ZX"),
                ("number", "TS 08 GH 3456"),
                ("status", "Sold"),
                ("seller_name", "Mahesh"),
                ("buyer_id", "B2"),
                ("buyer_name", "Lakshmi"),
                ("sale_value", "700000"),
                ("finance_amount", "0"),
            ],
            &[
                ("vehicle_id", "V5"),
                ("type", "Bike"),
                ("name", "Activa"),
                ("brand", "Honda"),
                ("model", "6G"),
                ("number", "AP 11 JK 7890"),
                ("status", "Stock"),
                ("seller_name", "Prasad"),
                ("buyer_id", "B3"),
                ("buyer_name", "Venkat"),
            ],
        ],
    )
}

pub fn installments_csv() -> String {
    csv(
        INSTALLMENT_FIELDS,
        &[
            &[
                ("id", "1"),
                ("buyer_id", "B1"),
                ("emi_no", "3"),
                ("due_date", "2024-06-10"),
                ("amount", "10000"),
                ("status", "Unpaid"),
            ],
            &[
                ("id", "2"),
                ("buyer_id", "B1"),
                ("emi_no", "1"),
                ("due_date", "2024-04-10"),
                ("amount", "10000"),
                ("status", "Paid"),
                ("paid_date", "2024-04-09"),
            ],
            &[
                ("id", "3"),
                ("buyer_id", "B1"),
                ("emi_no", "2"),
                ("due_date", "2024-05-10"),
                ("amount", "10000"),
                ("status", "Paid"),
                ("paid_date", "2024-05-11"),
            ],
            &[
                ("id", "4"),
                ("buyer_id", "B3"),
                ("emi_no", "1"),
                ("due_date", "2024-07-01"),
                ("amount", "5000"),
                ("status", "Unpaid"),
            ],
        ],
    )
}

/// A store loaded with the sample exports.
pub fn sample_store() -> RecordStore {
    let mut store = RecordStore::new();
    store.load(&vehicles_csv(), &installments_csv());
    store
}
