use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use stockpile_catalog::{Inventory, Product};

/// Drive the numbered menu until the user picks 0 or input closes.
///
/// Application errors never abort the loop: they are printed and the
/// menu comes back around.
pub fn run(inventory: &mut Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        print_menu();
        let Some(choice) = prompt(input, "Enter choice: ")? else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => add_product(inventory, input),
            "2" => sell_product(inventory, input),
            "3" => search_products(inventory, input),
            "4" => list_products(inventory),
            "5" => restock_product(inventory, input),
            "6" => remove_expired(inventory),
            "7" => print_total(inventory),
            "8" => save_inventory(inventory, input),
            "9" => load_inventory(inventory, input),
            "0" => {
                println!("Exiting...");
                break;
            }
            _ => {
                println!("Invalid choice.");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("Error: {err}");
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("Inventory Management System");
    println!("1. Add Product");
    println!("2. Sell Product");
    println!("3. Search/View Product");
    println!("4. List All Products");
    println!("5. Restock Product");
    println!("6. Remove Expired Groceries");
    println!("7. Total Inventory Value");
    println!("8. Save Inventory");
    println!("9. Load Inventory");
    println!("0. Exit");
}

/// Print a label and read one trimmed line. `None` means input closed.
fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_required(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    prompt(input, label)?.ok_or_else(|| anyhow!("input closed"))
}

/// Read and convert a value, rejecting non-parseable input before it
/// reaches the inventory layer.
fn prompt_parsed<T: FromStr>(input: &mut impl BufRead, label: &str) -> anyhow::Result<T> {
    let raw = prompt_required(input, label)?;
    raw.parse()
        .map_err(|_| anyhow!("Invalid value: {raw:?}"))
}

fn add_product(inventory: &mut Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let kind = prompt_required(input, "Enter product type (Electronics/Grocery/Clothing): ")?
        .to_lowercase();
    let product_id = prompt_required(input, "Product ID: ")?;
    let name = prompt_required(input, "Name: ")?;
    let price: f64 = prompt_parsed(input, "Price: ")?;
    let quantity: u32 = prompt_parsed(input, "Quantity: ")?;

    let product = match kind.as_str() {
        "electronics" => {
            let warranty_years: u32 = prompt_parsed(input, "Warranty Years: ")?;
            let brand = prompt_required(input, "Brand: ")?;
            Product::electronics(product_id, name, price, quantity, warranty_years, brand)
        }
        "grocery" => {
            let expiry: NaiveDate = prompt_parsed(input, "Expiry Date (YYYY-MM-DD): ")?;
            Product::grocery(product_id, name, price, quantity, expiry)
        }
        "clothing" => {
            let size = prompt_required(input, "Size: ")?;
            let material = prompt_required(input, "Material: ")?;
            Product::clothing(product_id, name, price, quantity, size, material)
        }
        _ => {
            println!("Invalid product type!");
            return Ok(());
        }
    };

    inventory.add_product(product)?;
    println!("Product added successfully.");
    Ok(())
}

fn sell_product(inventory: &mut Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let product_id = prompt_required(input, "Product ID to sell: ")?;
    let quantity: u32 = prompt_parsed(input, "Quantity to sell: ")?;
    inventory.sell_product(&product_id, quantity)?;
    println!("Product sold.");
    Ok(())
}

fn search_products(inventory: &Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let mode = prompt_required(input, "Search by name or type? (name/type): ")?;
    let keyword = prompt_required(input, "Enter keyword: ")?;

    let results = if mode == "name" {
        inventory.search_by_name(&keyword)
    } else {
        inventory.search_by_type(&keyword)
    };

    if results.is_empty() {
        println!("No products found.");
    } else {
        for product in results {
            println!("{product}");
        }
    }
    Ok(())
}

fn list_products(inventory: &Inventory) -> anyhow::Result<()> {
    for product in inventory.list_all() {
        println!("{product}");
    }
    Ok(())
}

fn restock_product(inventory: &mut Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let product_id = prompt_required(input, "Product ID to restock: ")?;
    let quantity: u32 = prompt_parsed(input, "Quantity to add: ")?;
    inventory.restock_product(&product_id, quantity);
    println!("Product restocked.");
    Ok(())
}

fn remove_expired(inventory: &mut Inventory) -> anyhow::Result<()> {
    inventory.remove_expired_products();
    println!("Expired groceries removed.");
    Ok(())
}

fn print_total(inventory: &Inventory) -> anyhow::Result<()> {
    println!("Total inventory value: ${:.2}", inventory.total_value());
    Ok(())
}

fn save_inventory(inventory: &Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let filename = prompt_required(input, "Filename to save: ")?;
    inventory.save_to_file(&filename)?;
    println!("Inventory saved.");
    Ok(())
}

fn load_inventory(inventory: &mut Inventory, input: &mut impl BufRead) -> anyhow::Result<()> {
    let filename = prompt_required(input, "Filename to load: ")?;
    inventory.load_from_file(&filename)?;
    println!("Inventory loaded.");
    Ok(())
}
