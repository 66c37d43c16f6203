use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hospital-finder")]
#[command(about = "Hospital lookup by pincode (data.gov.in proxy)", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP proxy API for the data.gov.in hospital directory.
    Serve(ServeArgs),
    /// Search for hospitals by pincode against a running proxy.
    Search(SearchArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// data.gov.in API key. The /hospitals endpoint fails without it.
    #[arg(long, env = "DATA_GOV_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// Pincode to search for.
    pub pincode: String,

    /// Base URL of a running proxy (see the serve command).
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Your latitude, for distance annotations and directions links.
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Your longitude, for distance annotations and directions links.
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,
}
