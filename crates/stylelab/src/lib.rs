//! Stylelab: loads Stable Diffusion style comparison galleries from a content
//! directory and assembles the prompt × style image grid for each model.

pub mod config;
pub mod copy;
pub mod error;
pub mod grid;
pub mod loader;
pub mod logging;
pub mod model;
pub mod parser;
pub mod scroll;
pub mod view;

pub use error::LoadError;
pub use loader::{ModelEntry, PageOutcome, list_models, load_model, load_page};
