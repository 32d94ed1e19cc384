// IsCoolGPT - tutoring backend
// Library exports

pub mod cli;
pub mod config;
pub mod providers;
pub mod server;
pub mod tutor;

pub use config::Settings;
pub use providers::{create_provider, Provider, ProviderError};
pub use server::{build_app, AppState, TutorServer};
pub use tutor::TutorService;
