//! UI module
//!
//! Draws the layouts built by the library crate with iced widgets:
//! - Container/expander shell shared by all components (frame.rs)
//! - Image gallery (gallery.rs)
//! - Library with aligned details panels (library.rs)
//! - File uploader (uploader.rs)

pub mod frame;
pub mod gallery;
pub mod library;
pub mod uploader;

use iced::alignment::Vertical;
use iced::widget::{container, Row, Space};
use iced::{Element, Length};

use uploads_library::config::ImageAlignment;

use crate::Message;

/// Spacing between grid columns and rows
pub const GRID_SPACING: u16 = 10;

/// Empty columns to pad a row holding `used` cells out to `columns`
fn filler_count(used: usize, columns: usize) -> usize {
    columns.saturating_sub(used)
}

/// Lay `cells` out over `columns` equal-width columns.
///
/// A short last row keeps the same column widths and gutters: every unused
/// column becomes its own empty space, never a cell widget.
pub fn grid_row<'a>(
    cells: Vec<Element<'a, Message>>,
    columns: usize,
    align: Vertical,
) -> Element<'a, Message> {
    let fillers = filler_count(cells.len(), columns);
    let row = Row::with_children(
        cells
            .into_iter()
            .map(|cell| container(cell).width(Length::FillPortion(1)).into()),
    )
    .spacing(GRID_SPACING)
    .align_y(align)
    .width(Length::Fill);

    (0..fillers)
        .fold(row, |row, _| row.push(Space::with_width(Length::FillPortion(1))))
        .into()
}

pub fn vertical(alignment: ImageAlignment) -> Vertical {
    match alignment {
        ImageAlignment::Start => Vertical::Top,
        ImageAlignment::Center => Vertical::Center,
        ImageAlignment::End => Vertical::Bottom,
    }
}
