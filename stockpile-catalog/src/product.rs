use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant-specific fields, tagged with the product type.
///
/// The tag is flattened into the parent record so persisted entries stay
/// flat: `{"product_id": ..., "type": "Grocery", "expiry_date": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductKind {
    Electronics { warranty_years: u32, brand: String },
    Grocery { expiry_date: NaiveDate },
    Clothing { size: String, material: String },
}

impl ProductKind {
    /// Discriminator tag as persisted in the `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            ProductKind::Electronics { .. } => "Electronics",
            ProductKind::Grocery { .. } => "Grocery",
            ProductKind::Clothing { .. } => "Clothing",
        }
    }
}

/// One stocked item, identified by `product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity_in_stock: u32,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl Product {
    pub fn electronics(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity_in_stock: quantity,
            kind: ProductKind::Electronics {
                warranty_years,
                brand: brand.into(),
            },
        }
    }

    pub fn grocery(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity_in_stock: quantity,
            kind: ProductKind::Grocery { expiry_date },
        }
    }

    pub fn clothing(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity_in_stock: quantity,
            kind: ProductKind::Clothing {
                size: size.into(),
                material: material.into(),
            },
        }
    }

    /// Add units to stock.
    pub fn restock(&mut self, amount: u32) {
        self.quantity_in_stock = self.quantity_in_stock.saturating_add(amount);
    }

    /// Remove units from stock, failing if the request exceeds availability.
    /// Selling zero units always succeeds.
    pub fn sell(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity > self.quantity_in_stock {
            return Err(ProductError::OutOfStock {
                requested: quantity,
                available: self.quantity_in_stock,
            });
        }
        self.quantity_in_stock -= quantity;
        Ok(())
    }

    /// Value of the held stock: `price * quantity_in_stock`.
    pub fn total_value(&self) -> f64 {
        self.price * f64::from(self.quantity_in_stock)
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Whether a grocery's expiry date falls strictly before `today`.
    /// Always false for non-grocery products.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        match &self.kind {
            ProductKind::Grocery { expiry_date } => *expiry_date < today,
            _ => false,
        }
    }

    /// Expiry evaluated against the current local date. Re-evaluated on
    /// every call, never cached.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProductKind::Electronics { brand, .. } => write!(
                f,
                "Electronics: {} ({}) - ${} [{} in stock]",
                self.name, brand, self.price, self.quantity_in_stock
            ),
            ProductKind::Grocery { .. } => {
                let status = if self.is_expired() { "Expired" } else { "Fresh" };
                write!(
                    f,
                    "Grocery: {} - ${} [{} in stock, {}]",
                    self.name, self.price, self.quantity_in_stock, status
                )
            }
            ProductKind::Clothing { size, material } => write!(
                f,
                "Clothing: {} ({}, {}) - ${} [{} in stock]",
                self.name, size, material, self.price, self.quantity_in_stock
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Not enough stock available: requested {requested}, available {available}")]
    OutOfStock { requested: u32, available: u32 },
}
