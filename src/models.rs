//! Output records.
//!
//! These types define the wire schema written to the processed-data file and posted downstream.
//! Field names are part of the contract.

use serde::{Deserialize, Serialize};

/// A single-field `{"name": ...}` wrapper.
///
/// Department, speciality, category and nature of procedure all share this shape; the field of
/// [`ServiceRecord`] that holds it says which one it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One provider's price for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderOffer {
    pub id: u32,
    pub price: f64,
}

/// A service and the offers of every provider that prices it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub product_index: String,
    pub department: Named,
    pub speciality: Named,
    pub category: Named,
    pub nature_of_procedure: Named,
    pub service_providers: Vec<ProviderOffer>,
}
