use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::{field, Record};

// ---------------------------------------------------------------------------
// Installment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Installment {
    pub id: String,
    pub buyer_id: String,
    pub emi_no: String,
    pub due_date: String,
    pub amount: String,
    pub status: String,
    pub paid_date: String,
}

impl Installment {
    /// Ordinal used for schedule ordering. Missing or non-numeric values
    /// sort as `0`.
    pub fn ordinal(&self) -> i64 {
        let raw = self.emi_no.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0)
    }

    /// Parsed `due_date`, if it is a `YYYY-MM-DD` date.
    pub fn due(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok()
    }

    /// Display status relative to `today`.
    pub fn status_on(&self, today: NaiveDate) -> InstallmentStatus {
        if self.status.trim().eq_ignore_ascii_case("paid") {
            return InstallmentStatus::Paid;
        }
        match self.due() {
            None => InstallmentStatus::Unpaid,
            Some(due) if due < today => InstallmentStatus::Overdue,
            Some(due) if due > today => InstallmentStatus::Upcoming,
            Some(_) => InstallmentStatus::DueToday,
        }
    }
}

impl From<&Record> for Installment {
    fn from(r: &Record) -> Self {
        Self {
            id: field(r, "id"),
            buyer_id: field(r, "buyer_id"),
            emi_no: field(r, "emi_no"),
            due_date: field(r, "due_date"),
            amount: field(r, "amount"),
            status: field(r, "status"),
            paid_date: field(r, "paid_date"),
        }
    }
}

// ---------------------------------------------------------------------------
// ScheduledInstallment
// ---------------------------------------------------------------------------

/// An installment as shown in a buyer's schedule, with its display status.
///
/// Serializes as the installment's own columns plus `derived_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    #[serde(flatten)]
    pub installment: Installment,
    pub derived_status: InstallmentStatus,
}

impl ScheduledInstallment {
    pub fn new(installment: Installment, today: NaiveDate) -> Self {
        let derived_status = installment.status_on(today);
        Self {
            installment,
            derived_status,
        }
    }
}

// ---------------------------------------------------------------------------
// InstallmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Paid,
    Unpaid,
    Overdue,
    DueToday,
    Upcoming,
}

impl InstallmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::Overdue => "Overdue",
            Self::DueToday => "Due Today",
            Self::Upcoming => "Upcoming",
        }
    }
}
