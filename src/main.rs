use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comanda::{
    config::Settings,
    format_date,
    handlers::{
        delivery_route::handle_delivery_route, order_detail::handle_order_detail,
        order_list::handle_order_list, payment_note::handle_payment_note, read_json_input,
    },
    models::delivery_route::DeliveryRouteParams,
};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(
        long,
        global = true,
        help = "(Optional) Sets the configuration file path.",
        required = false
    )]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregates one order-detail payload.
    Detail {
        #[arg(long, help = "(Optional) Reads the payload from a file instead of stdin.")]
        input: Option<PathBuf>,
    },

    /// Builds order cards from a list of orders with their details.
    Orders {
        #[arg(long, help = "(Optional) Reads the payload from a file instead of stdin.")]
        input: Option<PathBuf>,
    },

    /// Parses a payment note.
    Note {
        #[arg(help = "Note text, e.g. \"Método pago: Nequi - Observaciones: Portería\".")]
        text: String,
    },

    /// Builds the courier view of one delivery.
    Route {
        #[arg(long, help = "(Optional) Reads the delivery payload from a file.")]
        input: Option<PathBuf>,

        #[arg(long, help = "(Optional) Delivery identifier.")]
        id: Option<u64>,

        #[arg(long, help = "(Optional) Delivery address.")]
        direccion: Option<String>,

        #[arg(long, help = "(Optional) Client phone number.")]
        telefono: Option<String>,

        #[arg(long, help = "(Optional) Delivery note with payment method and observations.")]
        observaciones: Option<String>,
    },

    /// Renders a date as YYYY-MM-DD (UTC).
    FormatDate {
        #[arg(help = "RFC 3339 date-time or YYYY-MM-DD date.")]
        value: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let settings = Settings::load(&args.config)?;

    info!("Starting");

    let output = match args.command {
        Command::Detail { input } => {
            let detail = read_json_input(input.as_deref())?;
            handle_order_detail(&detail)?
        }
        Command::Orders { input } => handle_order_list(read_json_input(input.as_deref())?)?,
        Command::Note { text } => handle_payment_note(&text)?,
        Command::Route {
            input,
            id,
            direccion,
            telefono,
            observaciones,
        } => {
            let delivery = match input {
                Some(path) => read_json_input(Some(path.as_path()))?,
                None => Value::Null,
            };
            let params = DeliveryRouteParams {
                id,
                direccion,
                telefono,
                observaciones,
            };
            handle_delivery_route(&settings, &delivery, &params)?
        }
        Command::FormatDate { value } => format_date(&value),
    };

    println!("{output}");

    Ok(())
}
