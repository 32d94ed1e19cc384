// Configuration module
// Public interface for settings loading

pub mod constants;
mod settings;

pub use settings::Settings;
pub(crate) use settings::non_blank;
