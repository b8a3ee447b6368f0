//! Image gallery, library and upload components
//!
//! The crate scans folders for images, lays them out on a grid of columns and
//! describes per-image details panels, without depending on any UI toolkit.
//! The `uploads-library` binary draws these layouts with iced.

pub mod config;
pub mod error;
pub mod layout;
pub mod library;

pub use error::{Error, Result};
