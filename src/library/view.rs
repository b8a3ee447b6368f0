//! Gallery and library layouts
//!
//! Combines a directory scan with the grid layout engine (and, for the
//! library, one details panel per image) into a result the UI can draw
//! without touching the filesystem again.

use serde::Serialize;
use std::sync::Arc;

use super::cache::LayoutCache;
use super::data::{Collection, Item};
use super::details::{DetailForm, DetailRenderer};
use super::scan::scan_directory;
use crate::config::{GalleryConfig, LibraryConfig};
use crate::error::Result;
use crate::layout::{layout, layout_rows, GridSpec, Placement};

pub type GalleryCache = LayoutCache<GalleryConfig, GalleryLayout>;
pub type LibraryCache = LayoutCache<LibraryConfig, LibraryLayout>;

/// Image cell of a gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCell<'a> {
    pub placement: Placement<'a, Item>,
    pub caption: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryLayout {
    collection: Collection,
    #[serde(skip)]
    spec: GridSpec,
    show_filename: bool,
}

impl GalleryLayout {
    pub fn build(config: &GalleryConfig) -> Result<Self> {
        // Reject a bad column count before touching the disk
        GridSpec::new(config.number_of_columns, 0)?;

        let collection = scan_directory(&config.directory, &config.file_extensions)?;
        let spec = GridSpec::new(config.number_of_columns, collection.len())?;
        log::info!(
            "Gallery '{}': {} images in {} rows",
            config.uid,
            collection.len(),
            spec.row_count()
        );

        Ok(Self {
            collection,
            spec,
            show_filename: config.show_filename,
        })
    }

    /// Build through `cache`, reusing the last layout while the folder is unchanged
    pub fn load(cache: &GalleryCache, config: &GalleryConfig) -> Result<Arc<Self>> {
        GridSpec::new(config.number_of_columns, 0)?;
        cache.get_or_build(&config.directory, config, || Self::build(config))
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Cells in placement order
    pub fn cells(&self) -> Vec<GalleryCell<'_>> {
        layout(self.collection.items(), self.spec.column_count() as i64)
            .unwrap_or_default()
            .into_iter()
            .map(|placement| {
                let item = placement.item;
                GalleryCell {
                    caption: self.show_filename.then(|| item.name()),
                    placement,
                }
            })
            .collect()
    }

    /// Cells grouped by row
    pub fn rows(&self) -> Vec<Vec<GalleryCell<'_>>> {
        let mut rows: Vec<Vec<GalleryCell<'_>>> = vec![Vec::new(); self.spec.row_count()];
        for cell in self.cells() {
            rows[cell.placement.row].push(cell);
        }
        rows
    }
}

/// One row group of a library: an image band and a details band sharing
/// the same column partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRow<'a> {
    pub row: usize,
    pub images: Vec<Placement<'a, Item>>,
    /// Same coordinates as `images`; empty when details are disabled
    pub details: Vec<(Placement<'a, Item>, &'a DetailForm)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryLayout {
    collection: Collection,
    #[serde(skip)]
    spec: GridSpec,
    /// Indexed like `collection.items()`; empty when details are disabled
    details: Vec<DetailForm>,
}

impl LibraryLayout {
    pub fn build(config: &LibraryConfig, renderer: &dyn DetailRenderer) -> Result<Self> {
        GridSpec::new(config.number_of_columns, 0)?;

        let collection = scan_directory(&config.directory, &config.file_extensions)?;
        let spec = GridSpec::new(config.number_of_columns, collection.len())?;

        let details = if config.show_details {
            collection
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| renderer.create_details(item, index, &config.uid))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        log::info!(
            "Library '{}': {} images in {} rows",
            config.uid,
            collection.len(),
            spec.row_count()
        );

        Ok(Self {
            collection,
            spec,
            details,
        })
    }

    pub fn load(
        cache: &LibraryCache,
        config: &LibraryConfig,
        renderer: &dyn DetailRenderer,
    ) -> Result<Arc<Self>> {
        GridSpec::new(config.number_of_columns, 0)?;
        cache.get_or_build(&config.directory, config, || Self::build(config, renderer))
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    pub fn details_for(&self, index: usize) -> Option<&DetailForm> {
        self.details.get(index)
    }

    pub fn rows(&self) -> Vec<LibraryRow<'_>> {
        layout_rows(self.collection.items(), self.spec.column_count() as i64)
            .unwrap_or_default()
            .into_iter()
            .map(|batch| {
                let images: Vec<_> = batch.placements().collect();
                let details = images
                    .iter()
                    .filter_map(|p| self.details.get(p.index).map(|form| (*p, form)))
                    .collect();
                LibraryRow {
                    row: batch.row,
                    images,
                    details,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtensionFilter;
    use crate::error::Error;
    use crate::layout::LayoutError;
    use crate::library::details::{DefaultDetailRenderer, FieldKind};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(dir.join(name)).unwrap();
    }

    fn gallery_config(dir: &Path, columns: i64) -> GalleryConfig {
        GalleryConfig {
            directory: dir.to_path_buf(),
            number_of_columns: columns,
            ..GalleryConfig::default()
        }
    }

    #[test]
    fn test_gallery_rows_and_captions() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png", "d.png", "e.png", "f.png", "g.png"] {
            write_png(dir.path(), name, 2, 2);
        }

        let mut config = gallery_config(dir.path(), 3);
        config.show_filename = true;
        let gallery = GalleryLayout::build(&config).unwrap();

        let rows = gallery.rows();
        let names: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.iter().map(|c| c.placement.item.name()).collect())
            .collect();
        assert_eq!(
            names,
            vec![vec!["a.png", "b.png", "c.png"], vec!["d.png", "e.png", "f.png"], vec!["g.png"]]
        );
        assert_eq!(rows[2][0].caption, Some("g.png"));

        config.show_filename = false;
        let gallery = GalleryLayout::build(&config).unwrap();
        assert!(gallery.cells().iter().all(|c| c.caption.is_none()));
    }

    #[test]
    fn test_zero_columns_fails_before_scanning() {
        let config = gallery_config(Path::new("/definitely/not/here"), 0);
        assert!(matches!(
            GalleryLayout::build(&config),
            Err(Error::Layout(LayoutError::InvalidArgument(0)))
        ));
    }

    #[test]
    fn test_library_details_align_with_images() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "tall.png", 2, 9);
        write_png(dir.path(), "wide.png", 9, 2);
        write_png(dir.path(), "square.png", 3, 3);
        fs::write(dir.path().join("skip.txt"), b"x").unwrap();

        let config = LibraryConfig {
            directory: dir.path().to_path_buf(),
            number_of_columns: 2,
            ..LibraryConfig::default()
        };
        let library = LibraryLayout::build(&config, &DefaultDetailRenderer).unwrap();
        let rows = library.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].images.len(), 1);
        for row in &rows {
            assert_eq!(row.images.len(), row.details.len());
            for (image, (detail, form)) in row.images.iter().zip(&row.details) {
                assert_eq!((image.row, image.col), (detail.row, detail.col));
                let (_, name) = form.name_field().unwrap();
                assert_eq!(name, image.item.stem());
            }
        }
    }

    #[test]
    fn test_library_survives_broken_images() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "good.png", 4, 2);
        fs::write(dir.path().join("empty.png"), b"").unwrap();
        fs::write(dir.path().join("trunc.png"), b"\x89PNG\r\n\x1a\n\0\0").unwrap();

        let config = LibraryConfig {
            directory: dir.path().to_path_buf(),
            number_of_columns: 3,
            ..LibraryConfig::default()
        };
        let library = LibraryLayout::build(&config, &DefaultDetailRenderer).unwrap();
        assert_eq!(library.collection().len(), 3);

        let dimensions = |index: usize| {
            let form = library.details_for(index).unwrap();
            let width = form.fields().find(|f| f.label == "Width:").unwrap();
            let height = form.fields().find(|f| f.label == "Height:").unwrap();
            (width.kind.clone(), height.kind.clone())
        };
        let text = |value: &str| FieldKind::Text {
            value: value.to_string(),
            editable: false,
        };

        // sorted: empty.png, good.png, trunc.png
        assert_eq!(dimensions(0), (text("-1"), text("-1")));
        assert_eq!(dimensions(1), (text("4"), text("2")));
        assert_eq!(dimensions(2), (text("-1"), text("-1")));
    }

    #[test]
    fn test_library_without_details() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "a.png", 1, 1);

        let config = LibraryConfig {
            directory: dir.path().to_path_buf(),
            show_details: false,
            ..LibraryConfig::default()
        };
        let library = LibraryLayout::build(&config, &DefaultDetailRenderer).unwrap();
        assert!(!library.has_details());
        assert!(library.rows()[0].details.is_empty());
    }

    #[test]
    fn test_load_uses_cache() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "a.png", 1, 1);
        let cache = GalleryCache::new();
        let config = gallery_config(dir.path(), 4);

        let first = GalleryLayout::load(&cache, &config).unwrap();
        let second = GalleryLayout::load(&cache, &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        write_png(dir.path(), "b.png", 1, 1);
        let third = GalleryLayout::load(&cache, &config).unwrap();
        assert_eq!(third.collection().len(), 2);
    }

    #[test]
    fn test_case_sensitive_library() {
        let dir = tempdir().unwrap();
        write_png(dir.path(), "a.PNG", 1, 1);
        write_png(dir.path(), "b.png", 1, 1);

        let config = LibraryConfig {
            directory: dir.path().to_path_buf(),
            file_extensions: ExtensionFilter::new([".png"]).case_sensitive(true),
            show_details: false,
            ..LibraryConfig::default()
        };
        let library = LibraryLayout::build(&config, &DefaultDetailRenderer).unwrap();
        assert_eq!(library.collection().len(), 1);
    }
}
