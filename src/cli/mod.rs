pub mod args;
pub mod commands;
pub mod root;
pub mod ui;

pub use args::{Args, ScanArgs};
pub use root::RootCommand;
