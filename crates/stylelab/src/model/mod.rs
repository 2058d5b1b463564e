//! Gallery domain types: model metadata, tables, image records, bundles.

pub mod bundle;
pub mod images;
pub mod prompt;
pub mod types;

pub use bundle::*;
pub use images::*;
pub use prompt::*;
pub use types::*;
