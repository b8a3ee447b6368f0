//! Image library module
//!
//! This module handles everything between a folder on disk and the grid:
//! - Scanning folders for image files (scan.rs)
//! - Shared data structures (data.rs)
//! - Image header probing (metadata.rs)
//! - Details panels and their controls (details.rs)
//! - Rename/delete from the details panel (files.rs)
//! - Saving uploads (upload.rs)
//! - Memoized layouts (cache.rs, view.rs)

pub mod cache;
pub mod data;
pub mod details;
pub mod files;
pub mod metadata;
pub mod scan;
pub mod upload;
pub mod view;

pub use cache::{Invalidate, LayoutCache};
pub use data::{Collection, Item};
pub use details::{DefaultDetailRenderer, DetailForm, DetailRenderer, WidgetKey};
pub use view::{GalleryCache, GalleryLayout, LibraryCache, LibraryLayout};
