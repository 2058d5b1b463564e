//! Parsers for the per-model data files.
//!
//! Each parser names the file it reads and turns its text into a typed value.
//! JSON is parsed strictly; CSV keeps every field as a raw string.

use std::path::Path;

use anyhow::Result;

/// Parser trait implemented by each per-model file format.
pub trait ContentParser {
    type Output;

    /// File name inside the model directory.
    const FILE_NAME: &'static str;

    fn parse(content: &str, path: &Path) -> Result<Self::Output>;
}

pub mod csv_table;
pub mod image_data;
pub mod model_info;

pub use csv_table::{CommonPromptsParser, StyleTableParser};
pub use image_data::ImageDataParser;
pub use model_info::ModelInfoParser;

/// File names every model directory must contain.
pub const MODEL_FILES: [&str; 4] = [
    ModelInfoParser::FILE_NAME,
    StyleTableParser::FILE_NAME,
    ImageDataParser::FILE_NAME,
    CommonPromptsParser::FILE_NAME,
];
