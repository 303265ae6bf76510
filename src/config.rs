//! Static park table and run configuration.
//!
//! The park list and the sink targets are plain values constructed at process
//! start and passed explicitly into the pipeline — nothing here reads the
//! environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::resolver::UrlTemplates;

/// One row of the static park table: the NPS 4-letter park code plus the
/// display name used in URL templates and output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkEntry {
    /// 4-letter NPS park code (e.g. "yell").
    pub code: &'static str,
    /// Full park name (e.g. "Yellowstone").
    pub name: &'static str,
}

/// Major National Parks with their 4-letter codes, in fixed scrape order.
pub const PARKS: [ParkEntry; 30] = [
    ParkEntry { code: "yell", name: "Yellowstone" },
    ParkEntry { code: "yose", name: "Yosemite" },
    ParkEntry { code: "grca", name: "Grand Canyon" },
    ParkEntry { code: "zion", name: "Zion" },
    ParkEntry { code: "acad", name: "Acadia" },
    ParkEntry { code: "glac", name: "Glacier" },
    ParkEntry { code: "romo", name: "Rocky Mountain" },
    ParkEntry { code: "olym", name: "Olympic" },
    ParkEntry { code: "grsm", name: "Great Smoky Mountains" },
    ParkEntry { code: "shen", name: "Shenandoah" },
    ParkEntry { code: "arch", name: "Arches" },
    ParkEntry { code: "cany", name: "Canyonlands" },
    ParkEntry { code: "brca", name: "Bryce Canyon" },
    ParkEntry { code: "jotr", name: "Joshua Tree" },
    ParkEntry { code: "deva", name: "Death Valley" },
    ParkEntry { code: "seki", name: "Sequoia" },
    ParkEntry { code: "redw", name: "Redwood" },
    ParkEntry { code: "noca", name: "North Cascades" },
    ParkEntry { code: "mora", name: "Mount Rainier" },
    ParkEntry { code: "grte", name: "Grand Teton" },
    ParkEntry { code: "badl", name: "Badlands" },
    ParkEntry { code: "cave", name: "Carlsbad Caverns" },
    ParkEntry { code: "pefo", name: "Petrified Forest" },
    ParkEntry { code: "thro", name: "Theodore Roosevelt" },
    ParkEntry { code: "meve", name: "Mesa Verde" },
    ParkEntry { code: "crla", name: "Crater Lake" },
    ParkEntry { code: "lavo", name: "Lassen Volcanic" },
    ParkEntry { code: "chis", name: "Channel Islands" },
    ParkEntry { code: "pinn", name: "Pinnacles" },
    ParkEntry { code: "kova", name: "Kobuk Valley" },
];

/// Reference to the target spreadsheet: the document plus a credential
/// granting edit access. `spreadsheet` may be a bare ID or a full
/// `docs.google.com/spreadsheets/d/<id>/...` URL.
#[derive(Debug, Clone)]
pub struct SheetRef {
    pub spreadsheet: String,
    pub token: String,
}

/// Configuration for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Maximum number of parks to process from the table.
    pub limit: usize,
    /// Pacing delay between park attempts, measured from the previous
    /// park's first request.
    pub delay: Duration,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// URL templates the resolver substitutes park identifiers into.
    pub templates: UrlTemplates,
    /// Output path for the JSON backup.
    pub output_path: PathBuf,
    /// Optional spreadsheet sink target. `None` skips the spreadsheet write.
    pub sheet: Option<SheetRef>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            delay: Duration::from_secs(10),
            http_timeout: Duration::from_secs(30),
            templates: UrlTemplates::default(),
            output_path: PathBuf::from("parks_data.json"),
            sheet: None,
        }
    }
}

impl ScrapeConfig {
    /// The slice of the park table this run will process.
    pub fn parks(&self) -> &'static [ParkEntry] {
        let n = self.limit.min(PARKS.len());
        &PARKS[..n]
    }
}
