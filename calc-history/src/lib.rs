//! Calculator History
//!
//! Persisted log of past computations:
//! - `HistoryEntry`: one `(operation, operand1, operand2, result)` record
//! - `HistoryStore`: in-memory log mirrored to a CSV file, no duplicates
//! - `render_table`: 1-indexed text table for `history show`

mod entry;
mod render;
mod store;

pub use entry::HistoryEntry;
pub use render::render_table;
pub use store::{HistoryStore, HEADER, DEFAULT_HISTORY_FILE};
