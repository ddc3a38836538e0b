use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vinelab::TestType;

#[derive(Parser)]
#[command(
    name = "vinelab",
    version,
    about = "Vineyard soil and petiole test interpretation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret a lab record (JSON or YAML) and build a fertilizer plan
    Analyze {
        /// Lab record file
        file: PathBuf,

        /// Plan start date (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether new soil or petiole tests are due
    Remind {
        /// Date of the latest soil test
        #[arg(long)]
        soil_date: Option<NaiveDate>,

        /// Date of the latest petiole test
        #[arg(long)]
        petiole_date: Option<NaiveDate>,

        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show the plausible value ranges used for validation
    Ranges {
        #[arg(value_enum)]
        test_type: TestKind,
    },
    /// List the recognized parameters and their units
    Params,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestKind {
    Soil,
    Petiole,
}

impl From<TestKind> for TestType {
    fn from(kind: TestKind) -> Self {
        match kind {
            TestKind::Soil => TestType::Soil,
            TestKind::Petiole => TestType::Petiole,
        }
    }
}
