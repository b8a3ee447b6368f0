use clap::{Parser, ValueEnum};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use uploads_library::config::{AppConfig, GalleryConfig, LibraryConfig};
use uploads_library::Error;
use uploads_library::library::files::update_file;
use uploads_library::library::upload::{save_uploaded_files, UploadedFile};
use uploads_library::library::{
    DefaultDetailRenderer, DetailRenderer, GalleryCache, GalleryLayout, Invalidate, LibraryCache,
    LibraryLayout, WidgetKey,
};

mod ui;

/// Browse, edit and upload images in a folder
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Folder shown by the gallery and library, and receiving uploads
    directory: Option<PathBuf>,

    /// Number of grid columns
    #[arg(short, long)]
    columns: Option<i64>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Screen shown at startup
    #[arg(long, value_enum, default_value_t = Screen::Gallery)]
    screen: Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Screen {
    Gallery,
    Library,
    Uploads,
}

/// Main application state
struct UploadsLibrary {
    config: AppConfig,
    screen: Screen,
    gallery_cache: Arc<GalleryCache>,
    library_cache: Arc<LibraryCache>,
    renderer: Arc<dyn DetailRenderer>,
    gallery: Option<Arc<GalleryLayout>>,
    library: Option<Arc<LibraryLayout>>,
    forms: ui::library::FormState,
    /// Expander state per component uid
    expanded: HashMap<String, bool>,
    upload_result: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    ShowScreen(Screen),
    Refresh,
    GalleryLoaded(Result<Arc<GalleryLayout>, String>),
    LibraryLoaded(Result<Arc<LibraryLayout>, String>),
    ToggleExpanded(String),
    NameChanged(WidgetKey, String),
    DeleteToggled(WidgetKey, bool),
    /// Details panel submit: rename to `new_name`, or delete
    Submit {
        path: PathBuf,
        new_name: String,
        delete: bool,
    },
    /// Open the native picker and save the chosen files
    PickUploads,
}

impl UploadsLibrary {
    fn new(config: AppConfig, screen: Screen) -> (Self, Task<Message>) {
        let expanded = [&config.gallery.frame, &config.uploader.frame]
            .into_iter()
            .zip([&config.gallery.uid, &config.uploader.uid])
            .map(|(frame, uid)| (uid.clone(), frame.expanded))
            .collect();

        let app = UploadsLibrary {
            config,
            screen,
            gallery_cache: Arc::new(GalleryCache::new()),
            library_cache: Arc::new(LibraryCache::new()),
            renderer: Arc::new(DefaultDetailRenderer),
            gallery: None,
            library: None,
            forms: ui::library::FormState::default(),
            expanded,
            upload_result: String::new(),
            status: "Loading...".to_string(),
        };

        let task = app.reload();
        (app, task)
    }

    /// Rebuild both layouts in the background; unchanged folders come
    /// straight from the cache
    fn reload(&self) -> Task<Message> {
        Task::batch([
            Task::perform(
                load_gallery_async(Arc::clone(&self.gallery_cache), self.config.gallery.clone()),
                Message::GalleryLoaded,
            ),
            Task::perform(
                load_library_async(
                    Arc::clone(&self.library_cache),
                    Arc::clone(&self.renderer),
                    self.config.library.clone(),
                ),
                Message::LibraryLoaded,
            ),
        ])
    }

    fn invalidate_all(&self) {
        let caches: [&dyn Invalidate; 2] = [self.gallery_cache.as_ref(), self.library_cache.as_ref()];
        for dir in [
            &self.config.gallery.directory,
            &self.config.library.directory,
            &self.config.uploader.save_location,
        ] {
            for cache in caches {
                cache.invalidate(dir);
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowScreen(screen) => {
                self.screen = screen;
                Task::none()
            }
            Message::Refresh => {
                self.invalidate_all();
                self.status = "Refreshing...".to_string();
                self.reload()
            }
            Message::GalleryLoaded(result) => {
                match result {
                    Ok(layout) => {
                        self.status = format!("{} images in gallery", layout.collection().len());
                        self.gallery = Some(layout);
                    }
                    Err(e) => {
                        log::error!("Failed to load gallery: {}", e);
                        self.status = format!("Failed to load gallery: {}", e);
                    }
                }
                Task::none()
            }
            Message::LibraryLoaded(result) => {
                match result {
                    Ok(layout) => {
                        self.forms.clear();
                        self.library = Some(layout);
                    }
                    Err(e) => {
                        log::error!("Failed to load library: {}", e);
                        self.status = format!("Failed to load library: {}", e);
                    }
                }
                Task::none()
            }
            Message::ToggleExpanded(uid) => {
                let expanded = self.expanded.entry(uid).or_insert(true);
                *expanded = !*expanded;
                Task::none()
            }
            Message::NameChanged(key, value) => {
                self.forms.set_name(key, value);
                Task::none()
            }
            Message::DeleteToggled(key, checked) => {
                self.forms.set_delete(key, checked);
                Task::none()
            }
            Message::Submit {
                path,
                new_name,
                delete,
            } => match update_file(&path, &new_name, delete) {
                Ok(update) if update.changed_disk() => {
                    self.status = format!("Updated {}", path.display());
                    self.invalidate_all();
                    self.reload()
                }
                Ok(_) => {
                    self.status = format!("Nothing changed for {}", path.display());
                    Task::none()
                }
                Err(e @ Error::InvalidName { .. }) => {
                    log::warn!("Not renaming {}: {}", path.display(), e);
                    self.status = e.to_string();
                    Task::none()
                }
                Err(e) => {
                    log::error!("Failed to update {}: {}", path.display(), e);
                    self.status = e.to_string();
                    Task::none()
                }
            },
            Message::PickUploads => {
                let uploader = &self.config.uploader;
                let extensions = uploader.file_extensions.bare_extensions();
                let picked = FileDialog::new()
                    .set_title(uploader.upload_label.as_deref().unwrap_or("Upload Files"))
                    .add_filter("Images", &extensions[..])
                    .pick_files();

                let Some(paths) = picked else {
                    return Task::none();
                };

                let files: Vec<UploadedFile> = paths
                    .iter()
                    .filter_map(|path| match UploadedFile::from_path(path) {
                        Ok(file) => Some(file),
                        Err(e) => {
                            log::warn!("Skipping upload: {}", e);
                            None
                        }
                    })
                    .collect();

                let caches: [&dyn Invalidate; 2] =
                    [self.gallery_cache.as_ref(), self.library_cache.as_ref()];
                match save_uploaded_files(
                    &files,
                    &uploader.save_location,
                    &uploader.file_extensions,
                    &caches,
                ) {
                    Ok(outcome) => {
                        self.upload_result = format!(
                            "Saved {} files, rejected {}",
                            outcome.saved.len(),
                            outcome.rejected.len()
                        );
                        self.reload()
                    }
                    Err(e) => {
                        log::error!("Upload failed: {}", e);
                        self.upload_result = format!("Upload failed: {}", e);
                        Task::none()
                    }
                }
            }
        }
    }

    fn is_expanded(&self, uid: &str) -> bool {
        self.expanded.get(uid).copied().unwrap_or(true)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let nav = row![
            nav_button("Gallery", Screen::Gallery, self.screen),
            nav_button("Library", Screen::Library, self.screen),
            nav_button("Uploads", Screen::Uploads, self.screen),
            button("Refresh").on_press(Message::Refresh).style(button::secondary),
        ]
        .spacing(10);

        let screen: Element<Message> = match self.screen {
            Screen::Gallery => ui::gallery::view(
                self.gallery.as_deref(),
                &self.config.gallery,
                self.is_expanded(&self.config.gallery.uid),
            ),
            Screen::Library => ui::library::view(self.library.as_deref(), &self.config.library, &self.forms),
            Screen::Uploads => {
                let uploader = &self.config.uploader;
                ui::uploader::view(uploader, self.is_expanded(&uploader.uid), &self.upload_result)
            }
        };

        let content: Column<Message> = column![
            nav,
            scrollable(screen).height(Length::Fill),
            text(&self.status).size(14),
        ]
        .spacing(20)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn nav_button(label: &str, target: Screen, current: Screen) -> Element<'_, Message> {
    let style = if target == current {
        button::primary
    } else {
        button::secondary
    };
    button(text(label))
        .on_press(Message::ShowScreen(target))
        .style(style)
        .into()
}

/// Build the gallery layout off the UI thread
async fn load_gallery_async(
    cache: Arc<GalleryCache>,
    config: GalleryConfig,
) -> Result<Arc<GalleryLayout>, String> {
    tokio::task::spawn_blocking(move || {
        GalleryLayout::load(&cache, &config).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Build the library layout (details included) off the UI thread
async fn load_library_async(
    cache: Arc<LibraryCache>,
    renderer: Arc<dyn DetailRenderer>,
    config: LibraryConfig,
) -> Result<Arc<LibraryLayout>, String> {
    tokio::task::spawn_blocking(move || {
        LibraryLayout::load(&cache, &config, renderer.as_ref()).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}

/// Log to a rotating file in the user data directory, warnings also to stderr
fn init_logging() -> Option<LoggerHandle> {
    let log_dir = dirs::data_dir()?.join("uploads-library");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let logger = Logger::try_with_env_or_str("info, iced=error, wgpu_hal=error, wgpu_core=error")
        .ok()?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename("uploads-library")
                .suffix("log")
                .suppress_timestamp(),
        )
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn);

    match logger.start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    }
}

fn main() -> iced::Result {
    let args = Args::parse();
    let _logger = init_logging();

    let config_path = args.config.clone().or_else(AppConfig::default_path);
    let mut config = match config_path.as_deref().map(AppConfig::load) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("{}, using defaults", e);
            AppConfig::default()
        }
        None => AppConfig::default(),
    };

    if let Some(directory) = args.directory {
        config.set_directory(directory);
    }
    if let Some(columns) = args.columns {
        config.set_columns(columns);
    }

    log::info!(
        "Starting Uploads Library {} on {}",
        env!("CARGO_PKG_VERSION"),
        config.gallery.directory.display()
    );

    let screen = args.screen;
    iced::application("Uploads Library", UploadsLibrary::update, UploadsLibrary::view)
        .theme(UploadsLibrary::theme)
        .centered()
        .run_with(move || UploadsLibrary::new(config, screen))
}
