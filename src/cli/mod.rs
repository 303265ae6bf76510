//! CLI subcommand implementations for the parkfetch binary.

pub mod output;
pub mod parks_cmd;
pub mod scrape_cmd;
