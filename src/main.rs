//! FARS Explorer - yearly traffic-fatality summaries & state accident maps
//!
//! `fars summarize 2013 2014 2015` prints accident counts per month with
//! one column per year; `fars map --state 6 --year 2015` renders that
//! state's accident locations to a PNG.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use fars_explorer::data::{parse_year, summarize_years};
use fars_explorer::map::{map_state, parse_state};

#[derive(Parser)]
#[command(name = "fars", version, about = "FARS traffic-fatality data explorer")]
struct Cli {
    /// Directory containing accident_<YYYY>.csv.bz2 files
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Accident counts per month, one column per requested year
    Summarize {
        /// Years to summarize, e.g. 2013 2014 2015
        #[arg(required = true)]
        years: Vec<String>,
    },
    /// Plot one state's accident locations for a year
    Map {
        /// FARS state code, e.g. 6 for California
        #[arg(long)]
        state: String,
        /// Year to plot
        #[arg(long)]
        year: String,
        /// Output PNG path (default: fars_map_<state>_<year>.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Summarize { years } => {
            let years = years
                .iter()
                .map(|raw| parse_year(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let table = summarize_years(&cli.data_dir, &years)?;
            println!("{table}");
        }
        Command::Map { state, year, out } => {
            let state = parse_state(&state)?;
            let year = parse_year(&year)?;
            let out =
                out.unwrap_or_else(|| PathBuf::from(format!("fars_map_{state}_{year}.png")));
            map_state(&cli.data_dir, state, year, &out)?;
        }
    }
    Ok(())
}
