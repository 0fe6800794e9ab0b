use chrono::NaiveDate;
use std::fs;
use stockpile_catalog::{Inventory, InventoryError, Product};
use tempfile::tempdir;

fn sample_store() -> Inventory {
    let mut inventory = Inventory::new();
    inventory
        .add_product(Product::electronics("e1", "TV", 499.99, 2, 2, "Acme"))
        .unwrap();
    inventory
        .add_product(Product::grocery(
            "g1",
            "Milk",
            2.5,
            10,
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        ))
        .unwrap();
    inventory
        .add_product(Product::clothing("c1", "Shirt", 20.0, 3, "M", "Cotton"))
        .unwrap();
    inventory
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");

    let original = sample_store();
    original.save_to_file(&path).unwrap();

    let mut restored = Inventory::new();
    let count = restored.load_from_file(&path).unwrap();
    assert_eq!(count, 3);
    assert_eq!(restored.len(), 3);

    for product in original.list_all() {
        assert_eq!(restored.get(&product.product_id), Some(product));
    }
}

#[test]
fn test_load_merges_overwriting_by_id() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");

    sample_store().save_to_file(&path).unwrap();

    // A pre-existing store sharing id "e1" gets that entry replaced;
    // unrelated entries survive the merge.
    let mut inventory = Inventory::new();
    inventory
        .add_product(Product::electronics("e1", "Old TV", 100.0, 1, 1, "NoName"))
        .unwrap();
    inventory
        .add_product(Product::clothing("c9", "Hat", 5.0, 2, "S", "Wool"))
        .unwrap();

    inventory.load_from_file(&path).unwrap();

    assert_eq!(inventory.len(), 4);
    assert_eq!(inventory.get("e1").unwrap().name, "TV");
    assert!(inventory.get("c9").is_some());
}

#[test]
fn test_malformed_record_fails_load_and_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");

    // Second record is missing its variant fields.
    fs::write(
        &path,
        r#"[
            {"product_id": "e9", "name": "Radio", "price": 30.0,
             "quantity_in_stock": 5, "type": "Electronics",
             "warranty_years": 1, "brand": "Tecsun"},
            {"product_id": "c9", "name": "Hat", "price": 5.0,
             "quantity_in_stock": 2, "type": "Clothing"}
        ]"#,
    )
    .unwrap();

    let mut inventory = sample_store();
    let err = inventory.load_from_file(&path).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidProductData(_)));

    // Nothing merged, not even the well-formed first record.
    assert_eq!(inventory.len(), 3);
    assert!(inventory.get("e9").is_none());
}

#[test]
fn test_unknown_type_tag_fails_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unknown.json");

    fs::write(
        &path,
        r#"[{"product_id": "f1", "name": "Desk", "price": 80.0,
             "quantity_in_stock": 1, "type": "Furniture"}]"#,
    )
    .unwrap();

    let mut inventory = Inventory::new();
    let err = inventory.load_from_file(&path).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidProductData(_)));
    assert!(inventory.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let mut inventory = Inventory::new();
    let err = inventory
        .load_from_file(dir.path().join("nope.json"))
        .unwrap_err();
    assert!(matches!(err, InventoryError::Io(_)));
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");

    sample_store().save_to_file(&path).unwrap();

    let mut small = Inventory::new();
    small
        .add_product(Product::clothing("c1", "Shirt", 20.0, 3, "M", "Cotton"))
        .unwrap();
    small.save_to_file(&path).unwrap();

    let mut restored = Inventory::new();
    assert_eq!(restored.load_from_file(&path).unwrap(), 1);
    assert_eq!(restored.len(), 1);
}
