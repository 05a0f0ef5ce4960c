//! Meta-commands

mod history;
mod menu;

pub use history::History;
pub use menu::Menu;
