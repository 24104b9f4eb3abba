use anyhow::{Result, bail};
use chrono::Utc;
use clap::Subcommand;
use comfy_table::Cell;

use super::{App, ui};
use crate::core::id::{OrderId, ProductId};
use crate::core::order::{Order, OrderStatus, ShippingTerm};

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List all orders
    List,
    /// Create an order for a catalog product
    Create {
        #[arg(long)]
        product: ProductId,
        #[arg(long)]
        quantity: u32,
        /// Shipping term: DDP (seller pays duty) or DAP (buyer pays duty)
        #[arg(long)]
        term: ShippingTerm,
        #[arg(long)]
        address: String,
    },
    /// Advance an order's status (pending -> processing -> completed)
    Advance { id: OrderId, status: OrderStatus },
}

pub fn run(app: &mut App, command: OrdersCommand) -> Result<()> {
    match command {
        OrdersCommand::List => list(app),
        OrdersCommand::Create {
            product,
            quantity,
            term,
            address,
        } => {
            let Some(snapshot) = app.catalog.product(product).cloned() else {
                bail!("No product with id {product}");
            };
            let order = Order::place(
                OrderId::new(),
                snapshot,
                quantity,
                term,
                address,
                Utc::now(),
            )?;
            let line = format!(
                "Order {}: {} x{} under {}: subtotal {:.2}, duty {:.2}, total {:.2}",
                order.id,
                order.product.name,
                order.quantity,
                order.shipping_term,
                order.subtotal,
                order.duty_amount,
                order.total_amount,
            );
            app.catalog.add_order(order);
            app.save()?;
            println!("{line}");
            Ok(())
        }
        OrdersCommand::Advance { id, status } => {
            if app.catalog.order(id).is_none() {
                bail!("No order with id {id}");
            }
            app.catalog.update_order_status(id, status)?;
            app.save()?;
            println!("Order {id} is now {status}");
            Ok(())
        }
    }
}

fn list(app: &App) -> Result<()> {
    let orders = app.catalog.orders();
    if orders.is_empty() {
        println!("No orders yet. Try `crosswise orders create`.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Product"),
        ui::header_cell("Qty"),
        ui::header_cell("Term"),
        ui::header_cell("Subtotal"),
        ui::header_cell("Duty"),
        ui::header_cell("Total"),
        ui::header_cell("Status"),
    ]);

    for order in orders {
        table.add_row(vec![
            Cell::new(order.id),
            Cell::new(&order.product.name),
            Cell::new(order.quantity),
            Cell::new(order.shipping_term),
            ui::money_cell(order.subtotal),
            ui::money_cell(order.duty_amount),
            ui::money_cell(order.total_amount),
            Cell::new(order.status),
        ]);
    }

    println!("{table}");
    Ok(())
}
