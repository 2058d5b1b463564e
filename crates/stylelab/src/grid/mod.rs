//! Row-major grid over a model bundle.
//!
//! The detail view is a single virtualized list of `rows × columns` cells.
//! A flat position `p` maps to `(p / columns, p % columns)`; column 0 of every
//! row is the prompt label, the remaining columns are image references.

pub mod badges;
pub mod cell;
pub mod index;

pub use badges::*;
pub use cell::*;
pub use index::*;
