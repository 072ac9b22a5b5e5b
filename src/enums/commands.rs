use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check the configuration file for mistakes
    Validate,
    /// Classify a CT scan image as Normal, Malignant or Benign
    Analyze {
        image: PathBuf,
        #[clap(short, long)]
        provider: Option<String>,
        #[clap(short, long)]
        model: Option<String>,
        /// Also write a report (markdown, html or json)
        #[clap(short, long)]
        report: Option<String>,
        /// Print the raw result as JSON instead of the panel
        #[clap(long)]
        json: bool,
    },
    /// Produce a short free-text summary of any image
    Summarize {
        image: PathBuf,
        #[clap(short, long)]
        provider: Option<String>,
        #[clap(short, long)]
        model: Option<String>,
    },
    /// Show past analyses
    History,
    /// Run the local web front-end
    Serve {
        /// Overrides [server].port from the config file
        #[clap(short, long)]
        port: Option<u16>,
        /// Open the front-end in the default browser
        #[clap(long)]
        open: bool,
    },
}
