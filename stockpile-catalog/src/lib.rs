pub mod inventory;
pub mod product;

pub use inventory::{Inventory, InventoryError};
pub use product::{Product, ProductError, ProductKind};
