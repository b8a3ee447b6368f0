//! Library view: one row group per grid row, images on top and their
//! details panels underneath in the same columns
use iced::alignment::Vertical;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, checkbox, column, text, text_input, Column, Row};
use iced::{Element, Length};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use uploads_library::config::LibraryConfig;
use uploads_library::library::details::{DetailField, FieldKind};
use uploads_library::library::{DetailForm, LibraryLayout, WidgetKey};

use super::{grid_row, vertical, GRID_SPACING};
use crate::Message;

/// Values typed into the details panels that have not been submitted yet
#[derive(Debug, Default)]
pub struct FormState {
    names: HashMap<WidgetKey, String>,
    delete_checked: HashSet<WidgetKey>,
}

impl FormState {
    pub fn set_name(&mut self, key: WidgetKey, value: String) {
        self.names.insert(key, value);
    }

    pub fn set_delete(&mut self, key: WidgetKey, checked: bool) {
        if checked {
            self.delete_checked.insert(key);
        } else {
            self.delete_checked.remove(&key);
        }
    }

    /// Current text of the name field, falling back to the file's stem
    pub fn name<'a>(&'a self, key: &WidgetKey, initial: &'a str) -> &'a str {
        self.names.get(key).map(String::as_str).unwrap_or(initial)
    }

    pub fn is_delete_checked(&self, key: &WidgetKey) -> bool {
        self.delete_checked.contains(key)
    }

    /// Forget edits; control keys may point at other files after a reload
    pub fn clear(&mut self) {
        self.names.clear();
        self.delete_checked.clear();
    }
}

fn labelled<'a>(label: &str, widget: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    column![text(label.to_string()).size(12), widget.into()]
        .spacing(2)
        .width(Length::Fill)
        .into()
}

fn field<'a>(
    field: &DetailField,
    path: &Path,
    form: &DetailForm,
    state: &'a FormState,
) -> Element<'a, Message> {
    match &field.kind {
        FieldKind::Text {
            value,
            editable: true,
        } => {
            let key = field.key.clone();
            labelled(
                &field.label,
                text_input(&field.label, state.name(&field.key, value))
                    .on_input(move |value| Message::NameChanged(key.clone(), value)),
            )
        }
        FieldKind::Text {
            value,
            editable: false,
        } => labelled(&field.label, text_input(&field.label, value)),
        FieldKind::DeleteToggle => {
            let key = field.key.clone();
            checkbox(field.label.clone(), state.is_delete_checked(&field.key))
                .on_toggle(move |checked| Message::DeleteToggled(key.clone(), checked))
                .into()
        }
        FieldKind::Submit => {
            let delete = form
                .delete_key()
                .is_some_and(|key| state.is_delete_checked(key));
            let new_name = form
                .name_field()
                .map(|(key, initial)| state.name(key, initial).to_string())
                .unwrap_or_default();

            let (label, style): (&str, fn(&iced::Theme, button::Status) -> button::Style) = if delete {
                ("Delete", button::danger)
            } else {
                (field.label.as_str(), button::primary)
            };

            button(text(label.to_string()))
                .on_press(Message::Submit {
                    path: path.to_path_buf(),
                    new_name,
                    delete,
                })
                .style(style)
                .width(Length::Fill)
                .into()
        }
    }
}

fn details_panel<'a>(path: &Path, form: &DetailForm, state: &'a FormState) -> Element<'a, Message> {
    Column::with_children(form.lines.iter().map(|line| {
        Row::with_children(line.iter().map(|f| field(f, path, form, state)))
            .spacing(6)
            .into()
    }))
    .spacing(6)
    .into()
}

pub fn view<'a>(
    layout: Option<&'a LibraryLayout>,
    config: &LibraryConfig,
    state: &'a FormState,
) -> Element<'a, Message> {
    let Some(layout) = layout else {
        return text("Refreshing library...").into();
    };

    if layout.collection().is_empty() {
        return text(format!("No images in {}", layout.collection().root().display())).into();
    }

    let columns = layout.spec().column_count();
    let align = vertical(config.image_alignment);

    Column::with_children(layout.rows().into_iter().map(|row| {
        let images: Vec<Element<'a, Message>> = row
            .images
            .iter()
            .map(|p| Image::new(Handle::from_path(p.item.path())).width(Length::Fill).into())
            .collect();

        let mut group = column![grid_row(images, columns, align)].spacing(GRID_SPACING);

        if !row.details.is_empty() {
            let panels: Vec<Element<'a, Message>> = row
                .details
                .iter()
                .map(|(p, form)| details_panel(p.item.path(), form, state))
                .collect();
            group = group.push(grid_row(panels, columns, Vertical::Top));
        }

        group.into()
    }))
    .spacing(GRID_SPACING * 2)
    .into()
}
