use serde::{Deserialize, Serialize};

/// Package description sent to the calculator and order endpoints
///
/// Weights are grams, dimensions centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub number: String,
    pub weight: u32,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PackageItem>,
}

impl Package {
    /// Combined weight of the items, counting amounts
    pub fn items_weight(&self) -> u32 {
        self.items.iter().map(|item| item.weight * item.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub name: String,
    pub ware_key: String,
    pub payment: Payment,
    pub cost: f64,
    pub weight: u32,
    pub amount: u32,
}

/// Cash-on-delivery amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<u32>,
}

/// Sender or recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub phones: Vec<Phone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub number: String,
}
