use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None
)]
pub struct Args {
    /// C file or directory to analyze; asked for interactively when omitted
    pub target: Option<PathBuf>,

    #[arg(short, long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Directory the reports are written to (default: current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Forward at most this many characters of each file to the model
    #[arg(long)]
    pub max_file_chars: Option<usize>,

    /// Stop the whole batch when a completion or report write fails
    #[arg(long)]
    pub fail_fast: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[arg(long)]
    pub debug: bool,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the default configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    pub target: Option<PathBuf>,
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub max_file_chars: Option<usize>,
    pub fail_fast: bool,
    pub verbosity: u8,
    pub debug: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for ScanArgs {
    fn from(args: &Args) -> Self {
        ScanArgs {
            target: args.target.clone(),
            model: args.model.clone(),
            api_base_url: args.api_base_url.clone(),
            output_dir: args.output_dir.clone(),
            max_file_chars: args.max_file_chars,
            fail_fast: args.fail_fast,
            verbosity: args.verbosity,
            debug: args.debug,
            config: args.config.clone(),
        }
    }
}

impl ScanArgs {
    /// Tracing filter directive implied by `-v` and `--debug`.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            return "debug";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_target() {
        let args = Args::try_parse_from(["memsentry"]).unwrap();
        assert!(args.target.is_none());
        assert!(!args.fail_fast);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "memsentry",
            "src",
            "--model",
            "gpt-4o",
            "--output-dir",
            "reports",
            "--max-file-chars",
            "5000",
            "--fail-fast",
            "-vv",
        ])
        .unwrap();

        let scan_args = ScanArgs::from(&args);
        assert_eq!(scan_args.target, Some(PathBuf::from("src")));
        assert_eq!(scan_args.model.as_deref(), Some("gpt-4o"));
        assert_eq!(scan_args.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(scan_args.max_file_chars, Some(5000));
        assert!(scan_args.fail_fast);
        assert_eq!(scan_args.verbosity, 2);
    }

    #[test]
    fn test_log_level() {
        let mut args = ScanArgs::default();
        assert_eq!(args.log_level(), "warn");
        args.verbosity = 1;
        assert_eq!(args.log_level(), "info");
        args.verbosity = 5;
        assert_eq!(args.log_level(), "trace");
        args.verbosity = 0;
        args.debug = true;
        assert_eq!(args.log_level(), "debug");
    }
}
