use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use comfy_table::Cell;

use super::{App, ui};
use crate::core::id::ProductId;
use crate::core::product::{DutyRate, Product, ProductDraft, ProductPatch};

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all catalog products
    List,
    /// Add a product directly
    Add {
        #[arg(long)]
        name: String,
        /// 6-8 digit HS classification code
        #[arg(long)]
        hs_code: String,
        /// Duty rate, e.g. "10%"
        #[arg(long)]
        duty_rate: DutyRate,
        #[arg(long)]
        base_price: f64,
        #[arg(long)]
        destination: String,
        #[arg(long, default_value = "")]
        incentive: String,
    },
    /// Update fields of an existing product
    Update {
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        hs_code: Option<String>,
        #[arg(long)]
        duty_rate: Option<DutyRate>,
        #[arg(long)]
        base_price: Option<f64>,
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        incentive: Option<String>,
    },
    /// Remove a product from the catalog
    Delete { id: ProductId },
}

pub fn run(app: &mut App, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List => list(app),
        ProductsCommand::Add {
            name,
            hs_code,
            duty_rate,
            base_price,
            destination,
            incentive,
        } => {
            let product = Product::new(
                ProductId::new(),
                ProductDraft {
                    name,
                    hs_code,
                    duty_rate,
                    base_price,
                    destination_country: destination,
                    incentive_info: incentive,
                },
                Utc::now(),
            )?;
            let summary = format!("{} -> {}", product.name, product.destination_country);
            app.catalog.add_product(product);
            app.save()?;
            println!("Added product: {summary}");
            Ok(())
        }
        ProductsCommand::Update {
            id,
            name,
            hs_code,
            duty_rate,
            base_price,
            destination,
            incentive,
        } => {
            // The store treats an unknown id as a no-op; surface it here
            // instead.
            if app.catalog.product(id).is_none() {
                bail!("No product with id {id}");
            }
            app.catalog.update_product(
                id,
                ProductPatch {
                    name,
                    hs_code,
                    duty_rate,
                    base_price,
                    destination_country: destination,
                    incentive_info: incentive,
                },
            )?;
            app.save()?;
            println!("Updated product {id}");
            Ok(())
        }
        ProductsCommand::Delete { id } => {
            if app.catalog.product(id).is_none() {
                bail!("No product with id {id}");
            }
            app.catalog.delete_product(id);
            app.save()?;
            println!("Deleted product {id}");
            Ok(())
        }
    }
}

fn list(app: &App) -> Result<()> {
    let products = app.catalog.products();
    if products.is_empty() {
        println!("No products yet. Try `crosswise classify` or `crosswise products add`.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Product"),
        ui::header_cell("HS Code"),
        ui::header_cell("Destination"),
        ui::header_cell("Duty"),
        ui::header_cell("Base Price"),
        ui::header_cell("Landed Price"),
    ]);

    for product in products {
        table.add_row(vec![
            Cell::new(product.id),
            Cell::new(&product.name),
            Cell::new(&product.hs_code),
            Cell::new(&product.destination_country),
            ui::percent_cell(product.duty_rate.percent()),
            ui::money_cell(product.base_price),
            ui::money_cell(product.total_price),
        ]);
    }

    println!("{table}");
    Ok(())
}
