//! CLI command implementations

mod config_gen;
mod create;
mod listing;
mod lookup;

pub use config_gen::config_generate;
pub use create::{create_bulk, create_link};
pub use listing::{export_links, list_links};
pub use lookup::{click_link, open_link, resolve_link};
