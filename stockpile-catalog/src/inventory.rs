use chrono::{Local, NaiveDate};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::product::{Product, ProductError};

/// In-memory product store, keyed by product id.
///
/// Iteration order is the insertion order of the map, so listings and
/// search results come back in the order products were added.
#[derive(Debug, Default)]
pub struct Inventory {
    products: IndexMap<String, Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            products: IndexMap::new(),
        }
    }

    /// Insert a product, rejecting duplicate ids.
    pub fn add_product(&mut self, product: Product) -> Result<(), InventoryError> {
        if self.products.contains_key(&product.product_id) {
            return Err(InventoryError::DuplicateProduct(product.product_id.clone()));
        }
        debug!(id = %product.product_id, kind = product.type_name(), "product added");
        self.products.insert(product.product_id.clone(), product);
        Ok(())
    }

    /// Remove a product if present. Unknown ids are a silent no-op.
    pub fn remove_product(&mut self, product_id: &str) -> Option<Product> {
        self.products.shift_remove(product_id)
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Case-insensitive substring match against product names.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive exact match against the variant tag.
    pub fn search_by_type(&self, type_name: &str) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.type_name().eq_ignore_ascii_case(type_name))
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Sell units of a product. Unknown ids are a silent no-op; an
    /// oversell propagates `OutOfStock` and leaves the product unchanged.
    pub fn sell_product(&mut self, product_id: &str, quantity: u32) -> Result<(), InventoryError> {
        if let Some(product) = self.products.get_mut(product_id) {
            product.sell(quantity)?;
            debug!(id = %product_id, quantity, "product sold");
        }
        Ok(())
    }

    /// Restock units of a product. Unknown ids are a silent no-op.
    pub fn restock_product(&mut self, product_id: &str, quantity: u32) {
        if let Some(product) = self.products.get_mut(product_id) {
            product.restock(quantity);
            debug!(id = %product_id, quantity, "product restocked");
        }
    }

    /// Total value of all held stock; 0.0 for an empty store.
    pub fn total_value(&self) -> f64 {
        self.products.values().map(Product::total_value).sum()
    }

    /// Drop every grocery whose expiry date falls strictly before `today`.
    /// Returns the number of products removed.
    pub fn remove_expired_on(&mut self, today: NaiveDate) -> usize {
        let before = self.products.len();
        self.products.retain(|_, p| !p.is_expired_on(today));
        let removed = before - self.products.len();
        if removed > 0 {
            info!(removed, "expired groceries removed");
        }
        removed
    }

    /// Expired-grocery sweep against the current local date.
    pub fn remove_expired_products(&mut self) -> usize {
        self.remove_expired_on(Local::now().date_naive())
    }

    /// Merge a persisted snapshot into the store, overwriting by id.
    ///
    /// The whole file is parsed before anything is merged: a malformed
    /// record anywhere fails the load and leaves the store untouched.
    /// Returns the number of records merged.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, InventoryError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let records: Vec<Product> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| InventoryError::InvalidProductData(e.to_string()))?;

        let count = records.len();
        for product in records {
            self.products.insert(product.product_id.clone(), product);
        }
        info!(count, path = %path.display(), "inventory loaded");
        Ok(count)
    }

    /// Write every held product as a pretty-printed JSON record,
    /// overwriting the file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), InventoryError> {
        let path = path.as_ref();
        let records: Vec<&Product> = self.products.values().collect();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &records).map_err(std::io::Error::from)?;
        writer.flush()?;
        info!(count = records.len(), path = %path.display(), "inventory saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Product ID already exists: {0}")]
    DuplicateProduct(String),

    #[error(transparent)]
    OutOfStock(#[from] ProductError),

    #[error("Invalid product data: {0}")]
    InvalidProductData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
