use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Load, filter, sort, display and export car passport records
#[derive(Debug, Parser)]
#[command(name = "passport-cli", version)]
pub struct Cli {
    /// Record file to load (header: number,timestamp,plate,brand)
    #[arg(
        long,
        value_name = "PATH",
        required_unless_present_any = ["dir", "generate_config"]
    )]
    pub csv: Option<PathBuf>,

    /// Sort by field (text order, also for `number`)
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Filter by field; requires --value
    #[arg(long, value_name = "FIELD", requires = "value")]
    pub filter: Option<String>,

    /// Value the filter field must equal exactly
    #[arg(long, value_name = "VALUE", requires = "filter")]
    pub value: Option<String>,

    /// Print the record with this number
    #[arg(long, value_name = "NUMBER", allow_negative_numbers = true)]
    pub get: Option<i64>,

    /// Export the resulting records to this file
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Count files under a directory
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Field delimiter, overrides the config file
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a commented default config file and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::try_parse_from([
            "passport-cli",
            "--csv",
            "data.csv",
            "--filter",
            "brand",
            "--value",
            "Honda",
            "--sort",
            "plate",
            "--get",
            "2",
            "--out",
            "out.csv",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.csv, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.filter.as_deref(), Some("brand"));
        assert_eq!(cli.value.as_deref(), Some("Honda"));
        assert_eq!(cli.sort.as_deref(), Some("plate"));
        assert_eq!(cli.get, Some(2));
        assert_eq!(cli.out, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_csv_required_without_dir() {
        assert!(Cli::try_parse_from(["passport-cli"]).is_err());
        assert!(Cli::try_parse_from(["passport-cli", "--dir", "."]).is_ok());
        assert!(Cli::try_parse_from(["passport-cli", "--generate-config"]).is_ok());
    }

    #[test]
    fn test_filter_and_value_go_together() {
        assert!(Cli::try_parse_from(["passport-cli", "--csv", "a.csv", "--filter", "brand"]).is_err());
        assert!(Cli::try_parse_from(["passport-cli", "--csv", "a.csv", "--value", "Honda"]).is_err());
    }

    #[test]
    fn test_get_must_be_integer() {
        assert!(Cli::try_parse_from(["passport-cli", "--csv", "a.csv", "--get", "two"]).is_err());
    }

    #[test]
    fn test_delimiter_is_single_char() {
        let cli = Cli::try_parse_from(["passport-cli", "--csv", "a.csv", "--delimiter", ";"]).unwrap();
        assert_eq!(cli.delimiter, Some(';'));
        assert!(Cli::try_parse_from(["passport-cli", "--csv", "a.csv", "--delimiter", ";;"]).is_err());
    }
}
