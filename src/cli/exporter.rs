use anyhow::Result;
use clap::Subcommand;
use comfy_table::Cell;

use super::{App, ui};
use crate::core::exporter::ExporterProfile;

#[derive(Subcommand)]
pub enum ExporterCommand {
    /// Show the current exporter profile
    Show,
    /// Set the exporter profile (replaces any previous one)
    Set {
        /// Import-export code
        #[arg(long)]
        iec: String,
        /// Bank authorized-dealer code
        #[arg(long)]
        ad_code: String,
        /// GST letter-of-undertaking identifier
        #[arg(long)]
        gst_lut: String,
        #[arg(long)]
        pan: String,
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        company_address: String,
    },
}

pub fn run(app: &mut App, command: ExporterCommand) -> Result<()> {
    match command {
        ExporterCommand::Show => {
            let Some(profile) = app.catalog.exporter_profile() else {
                println!("No exporter profile set. Run `crosswise exporter set`.");
                return Ok(());
            };

            let mut table = ui::new_styled_table();
            table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
            table.add_row(vec![Cell::new("Company"), Cell::new(&profile.company_name)]);
            table.add_row(vec![
                Cell::new("Address"),
                Cell::new(&profile.company_address),
            ]);
            table.add_row(vec![Cell::new("IEC"), Cell::new(&profile.iec)]);
            table.add_row(vec![Cell::new("AD Code"), Cell::new(&profile.ad_code)]);
            table.add_row(vec![Cell::new("GST LUT"), Cell::new(&profile.gst_lut)]);
            table.add_row(vec![Cell::new("PAN"), Cell::new(&profile.pan)]);
            println!("{table}");
            Ok(())
        }
        ExporterCommand::Set {
            iec,
            ad_code,
            gst_lut,
            pan,
            company_name,
            company_address,
        } => {
            app.catalog.set_exporter_profile(ExporterProfile {
                iec,
                ad_code,
                gst_lut,
                pan,
                company_name,
                company_address,
            });
            app.save()?;
            println!("Exporter profile saved.");
            Ok(())
        }
    }
}
