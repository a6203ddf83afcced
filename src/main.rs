//! RxGate CLI — analyze prescriptions and drive order workflows against a
//! SQLite catalog.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use rxgate::db::{CatalogEntry, SqliteCatalog};
use rxgate::pipeline::ocr::VisionOcr;
use rxgate::pipeline::types::AnalysisResponse;
use rxgate::pipeline::PrescriptionAnalyzer;
use rxgate::workflow::billing::CatalogBilling;
use rxgate::workflow::stock::CatalogStock;
use rxgate::workflow::{CartItem, OrderWorkflow, WorkflowState};
use rxgate::{config, init_tracing};

#[derive(Parser)]
#[command(name = "rxgate")]
#[command(version = config::APP_VERSION)]
#[command(about = "Prescription authorization and pharmacy order workflow", long_about = None)]
struct Cli {
    /// Catalog database path (defaults to ~/RxGate/catalog.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a prescription image and print the decision payload
    Analyze {
        /// Path to the prescription image
        image: PathBuf,
    },

    /// Run the order workflow for a cart against a prescription image
    Order {
        /// JSON cart file: [{"name": "...", "quantity": N}, ...]
        #[arg(long)]
        cart: PathBuf,

        /// Path to the prescription image
        #[arg(long)]
        image: PathBuf,

        /// Resolve the confirmation gate in the same run
        #[arg(long)]
        confirm: Option<bool>,
    },

    /// Load medicines and registrations from a JSON seed file
    Seed {
        /// JSON file: {"medicines": [...], "registrations": [...]}
        file: PathBuf,
    },
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    medicines: Vec<CatalogEntry>,
    #[serde(default)]
    registrations: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = cli.db.unwrap_or_else(config::default_db_path);
    let catalog = Arc::new(SqliteCatalog::open(&db_path)?);

    match cli.command {
        Command::Analyze { image } => {
            let analyzer =
                PrescriptionAnalyzer::new(Box::new(VisionOcr::from_config()), catalog);
            let response: AnalysisResponse = analyzer.analyze_file(&image).into();
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Order {
            cart,
            image,
            confirm,
        } => {
            let items: Vec<CartItem> = serde_json::from_str(&std::fs::read_to_string(cart)?)?;
            let items: Vec<CartItem> = items
                .iter()
                .map(|item| CartItem::new(&item.name, item.quantity))
                .collect();

            let analyzer = PrescriptionAnalyzer::new(
                Box::new(VisionOcr::from_config()),
                catalog.clone(),
            );
            let mut workflow = OrderWorkflow::new(
                Box::new(CatalogStock::new(catalog.clone())),
                Box::new(analyzer),
                Box::new(CatalogBilling::new(catalog)),
            );

            let result = workflow.execute(&items, &image);
            println!("{}", serde_json::to_string_pretty(&result)?);

            if result.state == WorkflowState::AwaitingConfirmation {
                if let Some(confirm) = confirm {
                    let confirmed = workflow.confirm(confirm)?;
                    println!("{}", serde_json::to_string_pretty(&confirmed)?);
                }
            }
        }

        Command::Seed { file } => {
            let seed: SeedFile = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            let medicines = seed.medicines.len();
            let registrations = seed.registrations.len();
            for entry in &seed.medicines {
                catalog.upsert_medicine(entry)?;
            }
            for registration in &seed.registrations {
                catalog.add_registration(registration)?;
            }
            println!("Seeded {medicines} medicines, {registrations} registrations");
        }
    }

    Ok(())
}
