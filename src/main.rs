use clap::{Parser, Subcommand};
use std::path::PathBuf;
use nz_pin_drop::{classify, config, data, render, server, Coordinate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single coordinate and print its simulated demographics
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// CSV band table to use instead of the built-in one
        #[arg(short, long, value_name = "FILE")]
        bands: Option<PathBuf>,
        /// Print JSON instead of labeled text
        #[arg(long)]
        json: bool,
    },
    /// Classify every `lat,lon` row of a CSV file
    Batch {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        bands: Option<PathBuf>,
    },
    /// List the latitude bands
    Bands {
        #[arg(short, long, value_name = "FILE")]
        bands: Option<PathBuf>,
    },
    /// Serve the pin drop map
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { lat, lon, bands, json } => {
            let coord = Coordinate::new(lat, lon)?;
            let record = match bands {
                Some(path) => classify::classify_with(&data::BandTable::load_csv(&path)?, coord),
                None => classify::classify(coord),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", render::render_text(&coord, &record));
            }
        }
        Commands::Batch { input, output, bands } => {
            let table = data::load_table(bands.as_deref())?;
            let points = data::load_points(&input)?;
            let rows = classify::classify_points(&table, &points);
            data::write_classified(&output, &rows)?;
            println!("Classified {} points into {:?}", rows.len(), output);
        }
        Commands::Bands { bands } => {
            let table = data::load_table(bands.as_deref())?;
            print!("{}", render::render_bands(&table));
        }
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(&config)?;
            let table = data::load_table(app_config.data.bands.as_deref())?;
            tracing::info!("Loaded {} latitude bands", table.len());

            server::start_server(app_config, table).await?;
        }
    }

    Ok(())
}
