//! Component configuration
//!
//! Every component takes an explicit, caller-supplied `uid`. Controls built
//! for a component derive their identity from it, so two components showing
//! the same directory never collide.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Outer shell of a component
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    #[default]
    Container,
    Expander,
}

/// Shell settings shared by the gallery and the uploader
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Frame {
    pub widget_type: WidgetType,
    /// Header text. `None` shows no header on a container and an empty
    /// header on an expander.
    pub label: Option<String>,
    /// Initial state of an expander; ignored for containers
    pub expanded: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            widget_type: WidgetType::Container,
            label: Some("Gallery".to_string()),
            expanded: true,
        }
    }
}

impl Frame {
    /// Text for the header, if one should be drawn at all
    pub fn header(&self) -> Option<&str> {
        match (self.widget_type, self.label.as_deref()) {
            (_, Some(label)) => Some(label),
            (WidgetType::Expander, None) => Some(""),
            (WidgetType::Container, None) => None,
        }
    }
}

/// Which files a scan accepts, by filename suffix
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct ExtensionFilter {
    pub suffixes: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            suffixes: vec![".png".into(), ".jpg".into(), ".jpeg".into()],
            case_sensitive: false,
        }
    }
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Whether `file_name` ends with one of the accepted suffixes
    pub fn matches(&self, file_name: &str) -> bool {
        if self.case_sensitive {
            self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
        } else {
            let file_name = file_name.to_lowercase();
            self.suffixes
                .iter()
                .any(|s| file_name.ends_with(&s.to_lowercase()))
        }
    }

    /// Suffixes without the leading dot, for file pickers
    pub fn bare_extensions(&self) -> Vec<String> {
        self.suffixes
            .iter()
            .map(|s| s.trim_start_matches('.').to_string())
            .collect()
    }
}

/// Vertical alignment of the images inside a library row
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlignment {
    Start,
    Center,
    #[default]
    End,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct GalleryConfig {
    pub uid: String,
    pub directory: PathBuf,
    pub frame: Frame,
    pub file_extensions: ExtensionFilter,
    pub number_of_columns: i64,
    /// Show the filename as a caption under each image
    pub show_filename: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            uid: "gallery".to_string(),
            directory: PathBuf::from("assets"),
            frame: Frame::default(),
            file_extensions: ExtensionFilter::default(),
            number_of_columns: 5,
            show_filename: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct LibraryConfig {
    pub uid: String,
    pub directory: PathBuf,
    pub file_extensions: ExtensionFilter,
    pub image_alignment: ImageAlignment,
    pub number_of_columns: i64,
    /// Show the editable details band under every row
    pub show_details: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            uid: "library".to_string(),
            directory: PathBuf::from("assets"),
            file_extensions: ExtensionFilter::default(),
            image_alignment: ImageAlignment::default(),
            number_of_columns: 5,
            show_details: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct UploaderConfig {
    pub uid: String,
    pub save_location: PathBuf,
    pub frame: Frame,
    pub file_extensions: ExtensionFilter,
    pub info_msg: Option<String>,
    pub upload_label: Option<String>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            uid: "files".to_string(),
            save_location: PathBuf::from("assets"),
            frame: Frame {
                label: Some("Upload Files".to_string()),
                ..Frame::default()
            },
            file_extensions: ExtensionFilter::default(),
            info_msg: Some("Upload new files here.".to_string()),
            upload_label: Some("Upload Files".to_string()),
        }
    }
}

/// Settings for the viewer application
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub gallery: GalleryConfig,
    pub library: LibraryConfig,
    pub uploader: UploaderConfig,
}

impl AppConfig {
    /// Default location of the config file
    /// - Linux: ~/.config/uploads-library/config.json
    /// - macOS: ~/Library/Application Support/uploads-library/config.json
    /// - Windows: %APPDATA%\uploads-library\config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("uploads-library").join("config.json"))
    }

    /// Load the config at `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        serde_json::from_str(&json).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    /// Point all three components at the same directory
    pub fn set_directory(&mut self, directory: PathBuf) {
        self.gallery.directory = directory.clone();
        self.library.directory = directory.clone();
        self.uploader.save_location = directory;
    }

    pub fn set_columns(&mut self, columns: i64) {
        self.gallery.number_of_columns = columns;
        self.library.number_of_columns = columns;
    }
}
