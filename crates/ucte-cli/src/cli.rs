use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ucte",
    author,
    version,
    about = "Decode, re-encode and inspect UCTE grid exchange files",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file (defaults to ~/.ucte/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a document and report its records and diagnostics
    Decode {
        /// UCTE file to decode
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Print the document and diagnostics as JSON
        #[arg(long)]
        json: bool,
        /// Fail when any line could not be decoded
        #[arg(long)]
        strict: bool,
    },
    /// Decode a document and write it back in canonical layout
    Encode {
        /// UCTE file to decode
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Output file path
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: PathBuf,
        /// Drop trailing blanks of absent columns
        #[arg(long, overrides_with = "no_trim")]
        trim: bool,
        /// Keep full-width lines even when the config enables trimming
        #[arg(long, overrides_with = "trim")]
        no_trim: bool,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
    /// Show the metadata carried by a standard UCTE file name
    Meta {
        /// File name or path; the file itself is not read
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-area node counts and net positions
    Areas {
        /// UCTE file to decode
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "ucte",
            "encode",
            "in.uct",
            "-o",
            "out.uct",
            "--trim",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level, Some(tracing::Level::DEBUG));
        match cli.command {
            Commands::Encode {
                output, trim, force, ..
            } => {
                assert_eq!(output, PathBuf::from("out.uct"));
                assert!(trim);
                assert!(!force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_last_trim_flag_wins() {
        let cli = Cli::parse_from([
            "ucte",
            "encode",
            "in.uct",
            "-o",
            "out.uct",
            "--trim",
            "--no-trim",
        ]);
        match cli.command {
            Commands::Encode { trim, no_trim, .. } => {
                assert!(!trim);
                assert!(no_trim);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
