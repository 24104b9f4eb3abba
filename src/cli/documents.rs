use anyhow::{Context, Result, bail};
use clap::Subcommand;
use comfy_table::Cell;
use std::path::PathBuf;

use super::{App, ui};
use crate::core::document::{DocumentKind, Renderer};
use crate::core::id::{DocumentId, ProductId};
use crate::providers::JsonRenderer;

#[derive(Subcommand)]
pub enum DocumentsCommand {
    /// List generated documents
    List,
    /// Assemble one or more documents for a product
    Generate {
        #[arg(long)]
        product: ProductId,
        /// Document kinds, e.g. commercial_invoice packing_list
        #[arg(required = true)]
        kinds: Vec<DocumentKind>,
    },
    /// Render a generated document to a file
    Render {
        id: DocumentId,
        /// Output path; defaults to <document-id>.json
        #[arg(long)]
        out: Option<PathBuf>,
        /// Order quantity stamped into the rendered document
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

pub fn run(app: &mut App, command: DocumentsCommand) -> Result<()> {
    match command {
        DocumentsCommand::List => list(app),
        DocumentsCommand::Generate { product, kinds } => {
            for kind in &kinds {
                let document = app.catalog.generate_document(*kind, product)?;
                println!("Generated {} ({})", kind.label(), document.id);
            }
            app.save()?;
            Ok(())
        }
        DocumentsCommand::Render { id, out, quantity } => {
            let Some(document) = app.catalog.documents().iter().find(|d| d.id == id) else {
                bail!("No document with id {id}");
            };
            let bytes = JsonRenderer.render(&document.content, quantity)?;
            let path = out.unwrap_or_else(|| PathBuf::from(format!("{id}.json")));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} to {}", document.kind.label(), path.display());
            Ok(())
        }
    }
}

fn list(app: &App) -> Result<()> {
    let documents = app.catalog.documents();
    if documents.is_empty() {
        println!("No documents yet. Try `crosswise documents generate`.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Kind"),
        ui::header_cell("Product"),
        ui::header_cell("Generated"),
    ]);

    for document in documents {
        // The product reference is weak; it may have been deleted since.
        let product_name = app
            .catalog
            .product(document.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("(deleted) {}", document.product_id));
        table.add_row(vec![
            Cell::new(document.id),
            Cell::new(document.kind.label()),
            Cell::new(product_name),
            Cell::new(document.generated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
