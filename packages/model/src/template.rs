//! Template tree: Template → Body → Row[] → Column[] → Content[].
//!
//! The serialised form of these types is the persisted document format.
//! Keys the editor does not interpret (`_override`, `displayCondition`,
//! popup chrome details, ...) are kept in `extra` maps so a load → save
//! round trip is lossless.

use crate::content::Content;
use crate::id_generator::IdSource;
use mailblocks_style::Border;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema version written into freshly created templates.
pub const SCHEMA_VERSION: u32 = 18;

/// Default body content width in pixels.
pub const DEFAULT_CONTENT_WIDTH: u32 = 700;

fn default_true() -> bool {
    true
}

fn default_content_width() -> u32 {
    DEFAULT_CONTENT_WIDTH
}

fn default_row_padding() -> String {
    "0px".to_string()
}

fn default_column_padding() -> String {
    "0px".to_string()
}

/// Root document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Advisory per-type id suffixes; never used as keys.
    #[serde(default)]
    pub counters: BTreeMap<String, u64>,
    pub body: Body,
    #[serde(default)]
    pub schema_version: u32,
}

impl Template {
    /// Empty template with default body values.
    pub fn blank(ids: &mut dyn IdSource) -> Self {
        Self {
            counters: BTreeMap::new(),
            body: Body {
                id: ids.new_id(),
                rows: Vec::new(),
                headers: Vec::new(),
                footers: Vec::new(),
                values: BodyValues::default(),
            },
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.body.rows
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: String,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub headers: Vec<Value>,
    #[serde(default)]
    pub footers: Vec<Value>,
    #[serde(default)]
    pub values: BodyValues,
}

/// `_meta` bag carried by every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "htmlID", default)]
    pub html_id: String,
    #[serde(rename = "htmlClassNames", default)]
    pub html_class_names: String,
}

/// Capability flags gating what the editor may do with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default = "default_true")]
    pub duplicatable: bool,
    #[serde(default = "default_true")]
    pub deletable: bool,
    #[serde(default = "default_true")]
    pub hideable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            selectable: true,
            draggable: true,
            duplicatable: true,
            deletable: true,
            hideable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub full_width: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub repeat: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub position: String,
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            url: String::new(),
            full_width: false,
            width: None,
            height: None,
            repeat: "no-repeat".to_string(),
            size: "cover".to_string(),
            position: "center center".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamily {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_font: Option<bool>,
    /// `weights` and anything else the font picker stores.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<bool>,
    #[serde(default)]
    pub inherit: bool,
    #[serde(default)]
    pub link_color: String,
    #[serde(default)]
    pub link_underline: bool,
    #[serde(default)]
    pub link_hover_color: String,
    #[serde(default)]
    pub link_hover_underline: bool,
}

/// Body-level style values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyValues {
    #[serde(default)]
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(default = "default_content_width")]
    pub content_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<LinkStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preheader_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup_background_color: Option<String>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BodyValues {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            background_image: None,
            content_width: DEFAULT_CONTENT_WIDTH,
            content_align: Some("center".to_string()),
            text_color: Some("#000000".to_string()),
            font_family: None,
            link_style: None,
            preheader_text: Some(String::new()),
            popup_position: None,
            popup_width: None,
            popup_height: None,
            popup_background_color: None,
            meta: Some(Meta {
                html_id: "u_body".to_string(),
                html_class_names: "u_body".to_string(),
            }),
            extra: Map::new(),
        }
    }
}

/// One horizontal band of the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    /// Relative column widths; `cells[i]` governs `columns[i]`.
    pub cells: Vec<u32>,
    pub columns: Vec<Column>,
    pub values: RowValues,
}

impl Row {
    /// Default single-column row.
    pub fn new(ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.new_id(),
            cells: vec![1],
            columns: vec![Column::new(ids)],
            values: RowValues::default(),
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// `cells` and `columns` agree in length.
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == self.columns.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowValues {
    #[serde(default)]
    pub columns: bool,
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub columns_background_color: String,
    #[serde(default)]
    pub background_image: BackgroundImage,
    #[serde(default = "default_row_padding")]
    pub padding: String,
    #[serde(default)]
    pub anchor: String,
    #[serde(rename = "_meta", default)]
    pub meta: Meta,
    #[serde(flatten)]
    pub capabilities: Capabilities,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RowValues {
    fn default() -> Self {
        let mut extra = Map::new();
        extra.insert("displayCondition".to_string(), Value::Null);
        Self {
            columns: true,
            background_color: String::new(),
            columns_background_color: String::new(),
            background_image: BackgroundImage::default(),
            padding: default_row_padding(),
            anchor: String::new(),
            meta: Meta::default(),
            capabilities: Capabilities::default(),
            extra,
        }
    }
}

/// A vertical slot inside a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub contents: Vec<Content>,
    pub values: ColumnValues,
}

impl Column {
    /// Empty column with default values.
    pub fn new(ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.new_id(),
            contents: Vec::new(),
            values: ColumnValues::default(),
        }
    }

    pub fn position_of(&self, content_id: &str) -> Option<usize> {
        self.contents.iter().position(|c| c.id == content_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValues {
    #[serde(default)]
    pub background_color: String,
    #[serde(default = "default_column_padding")]
    pub padding: String,
    #[serde(default)]
    pub border: Border,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    /// A blocked column accepts no new or moved-in content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnValues {
    pub fn is_deletable(&self) -> bool {
        self.deletable.unwrap_or(true)
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.unwrap_or(false)
    }
}

impl Default for ColumnValues {
    fn default() -> Self {
        Self {
            background_color: String::new(),
            padding: "20px".to_string(),
            border: Border::default(),
            border_radius: Some("0px".to_string()),
            background_image_url: None,
            meta: Meta::default(),
            deletable: None,
            blocked: None,
            extra: Map::new(),
        }
    }
}
