use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "lunglens")]
#[clap(about = "AI-assisted preliminary assessment of lung CT scans", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
