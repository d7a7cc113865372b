//! Persistence of scraped records.
//!
//! # Submodules
//!
//! - [`journal`]: Merges a run's records into the dated and current entries
//! - [`json`]: Reads and writes a single [`JournalEntry`] file
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── 2024-01-01.json   # every record seen on 2024-01-01
//! ├── 2024-01-02.json
//! └── today.json        # same as the newest dated file, reset on date change
//! ```
//!
//! [`JournalEntry`]: crate::models::JournalEntry

pub mod journal;
pub mod json;
