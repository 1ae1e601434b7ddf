use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, required = true, help = "The schema files, in registration order")]
    pub files: Vec<PathBuf>,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[clap(long, value_name = "URI", help = "Only report the schema with this target namespace")]
    pub namespace: Option<String>,

    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more (repeatable)")]
    pub verbose: u8,

    #[clap(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
