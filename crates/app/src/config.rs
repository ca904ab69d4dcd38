//! Configuration for the bagstat application.
//!
//! Command-line arguments are parsed by clap into [`Cli`], then resolved and
//! validated into a [`Config`].
//!
//! The tool works with ZERO arguments: it scans the current directory for
//! `.bpe` files with the `BAG1` signature and the corrected tag table.

use bagstat_core::bias::Bias;
use bagstat_core::grammar::{self, Dialect, Grammar};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Scan container files and estimate a Huffman code for their kind tags.
#[derive(Debug, Parser)]
#[command(name = "bagstat", version, about)]
pub struct Cli {
    /// Files or directories to scan (directories are searched recursively)
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Container file extension, without the dot
    #[arg(long, default_value = grammar::EXTENSION)]
    pub extension: String,

    /// Required 4-character file signature
    #[arg(long, default_value = grammar::SIGNATURE)]
    pub signature: String,

    /// Tag table to decode with
    #[arg(long, value_enum, default_value_t = TagTableArg::Corrected)]
    pub tag_table: TagTableArg,

    /// Skip the frequency bias step
    #[arg(long)]
    pub no_bias: bool,

    /// Print key=value lines instead of listings
    #[arg(long)]
    pub export: bool,

    /// Print the resolved configuration to stderr
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the scan summary
    #[arg(long)]
    pub no_metrics: bool,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Tag table choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagTableArg {
    /// One tag per kind
    Corrected,
    /// Reproduce the historical tool's tag collisions
    Legacy,
}

impl From<TagTableArg> for Dialect {
    fn from(arg: TagTableArg) -> Self {
        match arg {
            TagTableArg::Corrected => Dialect::Corrected,
            TagTableArg::Legacy => Dialect::Legacy,
        }
    }
}

/// Complete configuration for a scan.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Files and directories to scan
    pub inputs: Vec<PathBuf>,

    /// Extension of container files inside directories
    pub extension: String,

    // === Decoding ===
    /// Signature and tag table
    pub grammar: Grammar,

    /// Which tag table `grammar` uses
    pub dialect: Dialect,

    // === Code construction ===
    /// Increments applied before building the code
    pub bias: Bias,

    // === Output ===
    /// Print key=value lines instead of listings
    pub export: bool,

    /// Whether to print the resolved config (to stderr)
    pub print_config: bool,

    /// Whether to print the scan summary
    pub print_metrics: bool,

    /// Default log filter (overridden by RUST_LOG)
    pub log_level: &'static str,
}

impl Config {
    /// Resolve and validate parsed arguments.
    ///
    /// # Errors
    /// `Error::Config` for an empty extension or a bad signature.
    pub fn from_cli(cli: Cli) -> bagstat_core::Result<Self> {
        let extension = cli.extension.trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(bagstat_core::Error::Config(
                "extension must not be empty".to_string(),
            ));
        }

        let dialect = Dialect::from(cli.tag_table);
        let grammar = Grammar::new(&cli.signature, dialect)?;

        let log_level = match (cli.quiet, cli.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };

        Ok(Config {
            inputs: cli.paths,
            extension,
            grammar,
            dialect,
            bias: if cli.no_bias {
                Bias::none()
            } else {
                Bias::standard()
            },
            export: cli.export,
            print_config: cli.print_config,
            print_metrics: !cli.no_metrics,
            log_level,
        })
    }

    /// Human-readable rendering of the configuration.
    pub fn describe(&self) -> String {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        let bias = if self.bias.is_empty() {
            "none".to_string()
        } else {
            self.bias
                .increments()
                .iter()
                .map(|(kind, inc)| format!("{}+{}", kind, inc))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "=== Configuration ===\n\
             Inputs: {}\n\
             Extension: .{}\n\
             Signature: {}\n\
             Tag table: {}\n\
             Bias: {}\n\
             Log level: {}\n",
            inputs.join(", "),
            self.extension,
            self.grammar.signature(),
            self.dialect,
            bias,
            self.log_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let cli = Cli::try_parse_from(std::iter::once("bagstat").chain(args.iter().copied()))
            .unwrap();
        Config::from_cli(cli).unwrap()
    }

    #[test]
    fn test_zero_argument_defaults() {
        let config = parse(&[]);
        assert_eq!(config.inputs, vec![PathBuf::from(".")]);
        assert_eq!(config.extension, "bpe");
        assert_eq!(config.grammar.signature(), "BAG1");
        assert_eq!(config.dialect, Dialect::Corrected);
        assert_eq!(config.bias, Bias::standard());
        assert!(!config.export);
        assert!(config.print_metrics);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let config = parse(&[
            "--extension",
            ".bag",
            "--signature",
            "PNT0",
            "--tag-table",
            "legacy",
            "--no-bias",
            "--export",
            "--no-metrics",
            "-vv",
            "a",
            "b/c.bpe",
        ]);

        assert_eq!(
            config.inputs,
            vec![PathBuf::from("a"), PathBuf::from("b/c.bpe")]
        );
        assert_eq!(config.extension, "bag");
        assert_eq!(config.grammar.signature(), "PNT0");
        assert_eq!(config.dialect, Dialect::Legacy);
        assert!(config.bias.is_empty());
        assert!(config.export);
        assert!(!config.print_metrics);
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_quiet() {
        assert_eq!(parse(&["-q"]).log_level, "warn");
        assert_eq!(parse(&["-v"]).log_level, "debug");
    }

    #[test]
    fn test_invalid_signature() {
        let cli = Cli::try_parse_from(["bagstat", "--signature", "BAG"]).unwrap();
        assert!(matches!(
            Config::from_cli(cli),
            Err(bagstat_core::Error::Config(_))
        ));
    }

    #[test]
    fn test_empty_extension() {
        let cli = Cli::try_parse_from(["bagstat", "--extension", "."]).unwrap();
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn test_unknown_tag_table_rejected() {
        assert!(Cli::try_parse_from(["bagstat", "--tag-table", "v2"]).is_err());
    }

    #[test]
    fn test_describe() {
        let text = parse(&["--tag-table", "legacy"]).describe();
        assert!(text.contains("Tag table: legacy"));
        assert!(text.contains("stuff8+0.9"));
        assert!(parse(&["--no-bias"]).describe().contains("Bias: none"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
