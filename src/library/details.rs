//! Per-image details panel
//!
//! The panel is described as data ([`DetailForm`]) and drawn by the UI layer.
//! Callers wanting different fields plug in their own [`DetailRenderer`].

use serde::Serialize;
use std::fmt;

use super::data::Item;
use super::metadata::{read_image_meta, ImageMeta};
use crate::error::Result;

/// Identity of a single control, unique across every component on a screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WidgetKey(String);

impl WidgetKey {
    /// `{stem}_{uid}_{field}_{index}`
    pub fn new(uid: &str, item: &Item, field: &str, index: usize) -> Self {
        WidgetKey(format!("{}_{}_{}_{}", item.stem(), uid, field, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Text field; read-only unless `editable`
    Text { value: String, editable: bool },
    /// "Delete ?" checkbox that switches the submit button into delete mode
    DeleteToggle,
    /// Applies the rename, or the delete when the toggle is checked
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub key: WidgetKey,
    pub label: String,
    pub kind: FieldKind,
}

/// Fields of one details panel, grouped in lines; fields sharing a line
/// are drawn side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailForm {
    pub lines: Vec<Vec<DetailField>>,
}

impl DetailForm {
    pub fn fields(&self) -> impl Iterator<Item = &DetailField> {
        self.lines.iter().flatten()
    }

    /// Initial value of the editable name field, if the form has one
    pub fn name_field(&self) -> Option<(&WidgetKey, &str)> {
        self.fields().find_map(|field| match &field.kind {
            FieldKind::Text {
                value,
                editable: true,
            } => Some((&field.key, value.as_str())),
            _ => None,
        })
    }

    pub fn delete_key(&self) -> Option<&WidgetKey> {
        self.fields()
            .find(|field| field.kind == FieldKind::DeleteToggle)
            .map(|field| &field.key)
    }

    pub fn submit_key(&self) -> Option<&WidgetKey> {
        self.fields()
            .find(|field| field.kind == FieldKind::Submit)
            .map(|field| &field.key)
    }
}

/// Builds the details panel for one image
pub trait DetailRenderer: Send + Sync {
    /// `index` is the item's flat index in the collection; `uid` is the
    /// owning component's identifier
    fn create_details(&self, item: &Item, index: usize, uid: &str) -> Result<DetailForm>;
}

/// Name (editable), type, width and height (read-only), delete toggle and
/// submit button
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDetailRenderer;

impl DefaultDetailRenderer {
    fn text(uid: &str, item: &Item, index: usize, field: &str, label: &str, value: String, editable: bool) -> DetailField {
        DetailField {
            key: WidgetKey::new(uid, item, field, index),
            label: label.to_string(),
            kind: FieldKind::Text { value, editable },
        }
    }

    pub fn form_for(item: &Item, meta: &ImageMeta, index: usize, uid: &str) -> DetailForm {
        let text = |field: &str, label: &str, value: String, editable: bool| {
            Self::text(uid, item, index, field, label, value, editable)
        };

        DetailForm {
            lines: vec![
                vec![text("name", "Name:", item.stem(), true)],
                vec![text("type", "Type:", meta.file_type.clone(), false)],
                vec![
                    text("width", "Width:", meta.width.to_string(), false),
                    text("height", "Height:", meta.height.to_string(), false),
                ],
                vec![DetailField {
                    key: WidgetKey::new(uid, item, "del_check", index),
                    label: "Delete ?".to_string(),
                    kind: FieldKind::DeleteToggle,
                }],
                vec![DetailField {
                    key: WidgetKey::new(uid, item, "submit_button", index),
                    label: "Update".to_string(),
                    kind: FieldKind::Submit,
                }],
            ],
        }
    }
}

impl DetailRenderer for DefaultDetailRenderer {
    fn create_details(&self, item: &Item, index: usize, uid: &str) -> Result<DetailForm> {
        let meta = read_image_meta(item.path())?;
        Ok(Self::form_for(item, &meta, index, uid))
    }
}
