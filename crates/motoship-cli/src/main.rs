use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "motoship-cli")]
#[command(about = "Shipping estimator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Quote shipping for a free-text address.
    Quote {
        /// Customer address, optionally containing a 6-digit pincode.
        address: String,
        /// Order value in rupees; at or above 999 ships free.
        #[arg(long, default_value_t = 0.0)]
        order_value: f64,
    },
    /// Validate a pincode and price its zone.
    ValidatePincode {
        pincode: String,
        #[arg(long, default_value_t = 0.0)]
        order_value: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = motoship_core::load_app_config()?;
    let pipeline = motoship_geo::ShippingPipeline::from_config(&config)?;

    match cli.command {
        Commands::Quote {
            address,
            order_value,
        } => {
            let quote = pipeline.estimate(&address, order_value).await;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Commands::ValidatePincode {
            pincode,
            order_value,
        } => {
            let validation = pipeline.validate_pincode(&pincode, order_value).await;
            println!("{}", serde_json::to_string_pretty(&validation)?);
        }
    }

    Ok(())
}
