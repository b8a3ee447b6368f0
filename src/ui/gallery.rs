//! Gallery view: images on a grid with optional filename captions
use iced::alignment::Vertical;
use iced::widget::image::{Handle, Image};
use iced::widget::{column, text, Column};
use iced::{Element, Length};

use uploads_library::config::GalleryConfig;
use uploads_library::library::view::GalleryCell;
use uploads_library::library::GalleryLayout;

use super::{frame, grid_row, GRID_SPACING};
use crate::Message;

fn cell<'a>(cell: &GalleryCell<'a>) -> Element<'a, Message> {
    let image = Image::new(Handle::from_path(cell.placement.item.path())).width(Length::Fill);

    match cell.caption {
        Some(caption) => column![image, text(caption).size(14)].spacing(4).into(),
        None => image.into(),
    }
}

pub fn view<'a>(
    layout: Option<&'a GalleryLayout>,
    config: &GalleryConfig,
    expanded: bool,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match layout {
        None => text("Refreshing gallery...").into(),
        Some(layout) if layout.collection().is_empty() => {
            text(format!("No images in {}", layout.collection().root().display())).into()
        }
        Some(layout) => {
            let columns = layout.spec().column_count();
            Column::with_children(layout.rows().into_iter().map(|row| {
                grid_row(row.iter().map(cell).collect(), columns, Vertical::Top)
            }))
            .spacing(GRID_SPACING)
            .into()
        }
    };

    frame::view(&config.uid, &config.frame, expanded, content)
}
