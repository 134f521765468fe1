use clap::{Parser, Subcommand};

const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[derive(Parser, Debug)]
#[command(name = "hospital-finder")]
#[command(about = "Find nearby hospitals that meet resource requirements", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the input form and the /predict endpoint.
    Serve(ServeArgs),
    /// Run a single query against the dataset and print the result as JSON.
    Query(QueryArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Data directory holding hospital_data.csv.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Explicit dataset path (overrides <data-dir>/hospital_data.csv).
    #[arg(long)]
    pub dataset: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DatasetArgs,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8787)]
    pub port: u16,
}

#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub data: DatasetArgs,

    /// Minimum free beds.
    #[arg(long, default_value_t = 0)]
    pub beds: u32,

    /// Minimum oxygen cylinders.
    #[arg(long, default_value_t = 0)]
    pub oxy_cyl: u32,

    /// Minimum ventilators.
    #[arg(long, default_value_t = 0)]
    pub ventilators: u32,

    /// Minimum staff.
    #[arg(long, default_value_t = 0)]
    pub staff: u32,

    /// Minimum doctors.
    #[arg(long, default_value_t = 0)]
    pub doctors: u32,

    /// Required severity level (low, medium, high).
    #[arg(long)]
    pub severity: String,

    /// Maximum distance from the reference point.
    #[arg(long)]
    pub distance: u32,
}
