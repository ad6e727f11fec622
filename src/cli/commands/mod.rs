pub mod scan;

pub use scan::{read_target, run_scan_command, scan_target, ScanOutcome};
