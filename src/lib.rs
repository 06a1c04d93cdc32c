mod app;
mod config;
mod hosts;
mod input;
mod matcher;
mod select_box;
mod session;
mod terminal;

pub use app::App;
pub use config::*;
pub use hosts::{load_records, parse_records, Record};
pub use matcher::{resolve, MatchOutcome};
pub use select_box::{SelectBox, SelectionResult};
pub use session::connect;
pub use terminal::{install_panic_hook, Terminal};
