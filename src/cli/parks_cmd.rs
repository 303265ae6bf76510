//! `parkfetch parks` — list the static park table.

use anyhow::Result;
use serde_json::json;

use crate::cli::output;
use crate::config::PARKS;

/// Run the parks command.
pub fn run() -> Result<()> {
    if output::is_json() {
        let parks: Vec<_> = PARKS
            .iter()
            .map(|p| json!({ "code": p.code, "name": p.name }))
            .collect();
        output::print_json(&json!(parks));
        return Ok(());
    }

    for park in &PARKS {
        println!("{}  {}", park.code, park.name);
    }
    Ok(())
}
