use serde::{Deserialize, Serialize};

use crate::table::{field, Record};

// ---------------------------------------------------------------------------
// VehicleStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    Stock,
    Sold,
}

impl VehicleStatus {
    /// Parse the exported status column. Matching is exact, as written by the
    /// export; anything else is not a known status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Stock" => Some(Self::Stock),
            "Sold" => Some(Self::Sold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "Stock",
            Self::Sold => "Sold",
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    #[serde(rename = "type")]
    pub type_field: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub number: String,
    /// `None` when the column is empty or holds an unknown value.
    pub status: Option<VehicleStatus>,

    // -- Seller side --
    pub seller_name: String,
    pub seller_phone: String,
    pub seller_city: String,
    pub buy_value: String,
    pub buy_date: String,
    pub comments: String,

    // -- Buyer side --
    pub buyer_id: String,
    pub record_no: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_address: String,
    pub sale_value: String,
    pub finance_amount: String,
    pub emi_amount: String,
    pub tenure: String,
    pub sale_date: String,
}

impl Vehicle {
    /// Whether a buyer is linked. This, not `status`, decides whether the
    /// vehicle is treated as sold.
    pub fn has_buyer(&self) -> bool {
        !self.buyer_id.is_empty()
    }

    /// Seller block for the detail view.
    pub fn seller(&self) -> Seller {
        Seller {
            vehicle_id: self.vehicle_id.clone(),
            seller_name: self.seller_name.clone(),
            seller_phone: self.seller_phone.clone(),
            seller_city: self.seller_city.clone(),
            buy_value: self.buy_value.clone(),
            buy_date: self.buy_date.clone(),
            comments: self.comments.clone(),
        }
    }

    /// Buyer block, or `None` when no `buyer_id` is linked.
    pub fn buyer(&self) -> Option<Buyer> {
        if !self.has_buyer() {
            return None;
        }
        Some(Buyer {
            buyer_id: self.buyer_id.clone(),
            vehicle_id: self.vehicle_id.clone(),
            record_no: self.record_no.clone(),
            buyer_name: self.buyer_name.clone(),
            buyer_phone: self.buyer_phone.clone(),
            buyer_address: self.buyer_address.clone(),
            sale_value: self.sale_value.clone(),
            finance_amount: self.finance_amount.clone(),
            emi_amount: self.emi_amount.clone(),
            tenure: self.tenure.clone(),
            sale_date: self.sale_date.clone(),
        })
    }

    /// Lower-cased haystack for free-text search.
    pub fn search_key(&self) -> String {
        [&self.name, &self.brand, &self.model, &self.number]
            .map(String::as_str)
            .join(" ")
            .to_lowercase()
    }
}

impl From<&Record> for Vehicle {
    fn from(r: &Record) -> Self {
        Self {
            vehicle_id: field(r, "vehicle_id"),
            type_field: field(r, "type"),
            name: field(r, "name"),
            brand: field(r, "brand"),
            model: field(r, "model"),
            color: field(r, "color"),
            number: field(r, "number"),
            status: VehicleStatus::parse(&field(r, "status")),
            seller_name: field(r, "seller_name"),
            seller_phone: field(r, "seller_phone"),
            seller_city: field(r, "seller_city"),
            buy_value: field(r, "buy_value"),
            buy_date: field(r, "buy_date"),
            comments: field(r, "comments"),
            buyer_id: field(r, "buyer_id"),
            record_no: field(r, "record_no"),
            buyer_name: field(r, "buyer_name"),
            buyer_phone: field(r, "buyer_phone"),
            buyer_address: field(r, "buyer_address"),
            sale_value: field(r, "sale_value"),
            finance_amount: field(r, "finance_amount"),
            emi_amount: field(r, "emi_amount"),
            tenure: field(r, "tenure"),
            sale_date: field(r, "sale_date"),
        }
    }
}

// ---------------------------------------------------------------------------
// Seller / Buyer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub vehicle_id: String,
    pub seller_name: String,
    pub seller_phone: String,
    pub seller_city: String,
    pub buy_value: String,
    pub buy_date: String,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub buyer_id: String,
    pub vehicle_id: String,
    pub record_no: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub buyer_address: String,
    pub sale_value: String,
    pub finance_amount: String,
    pub emi_amount: String,
    pub tenure: String,
    pub sale_date: String,
}
