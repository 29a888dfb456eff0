//! CLI command implementations

mod config_gen;
mod dimensions;
mod urls;

pub use config_gen::config_generate;
pub use dimensions::{add_value, list_values, remove_value, run_seed, set_default_campaign};
pub use urls::{generate_url, show_history};
