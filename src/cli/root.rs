use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Args, ScanArgs};
use crate::cli::commands::run_scan_command;
use crate::config::MemsentryConfig;

pub struct RootCommand;

impl RootCommand {
    pub async fn execute() -> Result<()> {
        let args = Args::parse();

        if args.generate_config {
            println!("{}", MemsentryConfig::generate_default_config());
            return Ok(());
        }

        let scan_args = ScanArgs::from(&args);
        init_tracing(&scan_args);

        println!(
            r#"
   ┌──────────────┐
   │  ░░  ▓▓  ░░  │
   │  ▓▓  ██  ▓▓  │
   └──────┬───────┘
          │
  M E M S E N T R Y  v{}
"#,
            env!("CARGO_PKG_VERSION")
        );
        println!("Code Vulnerability and Memory Leak Analyzer");
        println!("{}", "=".repeat(50));

        run_scan_command(scan_args).await
    }
}

/// `RUST_LOG` wins when set; otherwise the level follows `-v` / `--debug`.
fn init_tracing(args: &ScanArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
