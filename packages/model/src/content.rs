//! Content blocks and their per-type values.
//!
//! A block serialises as `{ "id", "type", "values" }`. In memory the
//! `type` discriminant and the values are one enum, so a text block can never
//! carry button fields and every consumer matches exhaustively.

use crate::template::{Capabilities, FontFamily, LinkStyle, Meta};
use mailblocks_style::{Border, ShorthandBorder};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Button,
    Image,
    Heading,
    Divider,
    Menu,
    Social,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Text,
        ContentType::Button,
        ContentType::Image,
        ContentType::Heading,
        ContentType::Divider,
        ContentType::Menu,
        ContentType::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Button => "button",
            ContentType::Image => "image",
            ContentType::Heading => "heading",
            ContentType::Divider => "divider",
            ContentType::Menu => "menu",
            ContentType::Social => "social",
        }
    }

    /// Key of this type's entry in `Template::counters`.
    pub fn counter_key(&self) -> String {
        format!("u_content_{}", self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type `{0}`")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

fn default_container_padding() -> String {
    "10px".to_string()
}

/// Values shared by every block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonValues {
    #[serde(default = "default_container_padding")]
    pub container_padding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: Meta,
    #[serde(flatten)]
    pub capabilities: Capabilities,
    /// `_override`, `displayCondition`, `calculatedWidth` and any other key
    /// the editor does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CommonValues {
    fn default() -> Self {
        Self {
            container_padding: default_container_padding(),
            anchor: None,
            meta: Meta::default(),
            capabilities: Capabilities::default(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Link target of a button, image or menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(default)]
    pub values: ActionValues,
}

impl Action {
    pub fn web(href: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: "web".to_string(),
            attrs: None,
            values: ActionValues {
                href: Some(href.into()),
                target: Some(target.into()),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextValues {
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default)]
    pub font_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(default)]
    pub text_align: String,
    #[serde(default)]
    pub line_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<LinkStyle>,
    #[serde(flatten)]
    pub common: CommonValues,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingType {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingValues {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub heading_type: HeadingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default)]
    pub font_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(default)]
    pub text_align: String,
    #[serde(default)]
    pub line_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_style: Option<LinkStyle>,
    #[serde(flatten)]
    pub common: CommonValues,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonColors {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSize {
    pub auto_width: bool,
    pub width: String,
}

impl Default for ButtonSize {
    fn default() -> Self {
        Self {
            auto_width: true,
            width: "auto".to_string(),
        }
    }
}

fn default_button_padding() -> String {
    "10px".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonValues {
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<Action>,
    #[serde(default)]
    pub button_colors: ButtonColors,
    #[serde(default)]
    pub size: ButtonSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default)]
    pub font_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(default)]
    pub line_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default = "default_button_padding")]
    pub padding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<ShorthandBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(flatten)]
    pub common: CommonValues,
}

impl Default for ButtonValues {
    fn default() -> Self {
        Self {
            text: String::new(),
            href: None,
            button_colors: ButtonColors::default(),
            size: ButtonSize::default(),
            font_family: None,
            font_size: String::new(),
            font_weight: None,
            line_height: String::new(),
            letter_spacing: None,
            text_align: None,
            padding: default_button_padding(),
            border: None,
            border_radius: None,
            common: CommonValues::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_width: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageValues {
    #[serde(default)]
    pub src: ImageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(flatten)]
    pub common: CommonValues,
}

fn default_divider_width() -> String {
    "100%".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerValues {
    #[serde(default = "default_divider_width")]
    pub width: String,
    /// Only the top side is drawn.
    #[serde(default)]
    pub border: Border,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(flatten)]
    pub common: CommonValues,
}

impl Default for DividerValues {
    fn default() -> Self {
        Self {
            width: default_divider_width(),
            border: Border::default(),
            text_align: None,
            common: CommonValues::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub link: Action,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

fn default_menu_padding() -> String {
    "5px 10px".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuValues {
    #[serde(default)]
    pub menu: Menu,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(default)]
    pub font_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default)]
    pub text_color: String,
    #[serde(default)]
    pub link_color: String,
    #[serde(default)]
    pub align: String,
    #[serde(default)]
    pub layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default = "default_menu_padding")]
    pub padding: String,
    #[serde(flatten)]
    pub common: CommonValues,
}

impl Default for MenuValues {
    fn default() -> Self {
        Self {
            menu: Menu::default(),
            font_family: None,
            font_size: String::new(),
            font_weight: None,
            letter_spacing: None,
            line_height: None,
            text_color: String::new(),
            link_color: String::new(),
            align: String::new(),
            layout: String::new(),
            separator: None,
            padding: default_menu_padding(),
            common: CommonValues::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialIcon {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialIcons {
    #[serde(default)]
    pub icon_type: String,
    #[serde(default)]
    pub icons: Vec<SocialIcon>,
    #[serde(default)]
    pub spacing: u32,
}

fn default_icon_size() -> u32 {
    24
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialValues {
    #[serde(default)]
    pub icons: SocialIcons,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
    #[serde(flatten)]
    pub common: CommonValues,
}

impl Default for SocialValues {
    fn default() -> Self {
        Self {
            icons: SocialIcons::default(),
            icon_size: default_icon_size(),
            common: CommonValues::default(),
        }
    }
}

/// Per-type values of a block; the variant is the block's `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentValues {
    Text(TextValues),
    Button(ButtonValues),
    Image(ImageValues),
    Heading(HeadingValues),
    Divider(DividerValues),
    Menu(MenuValues),
    Social(SocialValues),
}

impl ContentValues {
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentValues::Text(_) => ContentType::Text,
            ContentValues::Button(_) => ContentType::Button,
            ContentValues::Image(_) => ContentType::Image,
            ContentValues::Heading(_) => ContentType::Heading,
            ContentValues::Divider(_) => ContentType::Divider,
            ContentValues::Menu(_) => ContentType::Menu,
            ContentValues::Social(_) => ContentType::Social,
        }
    }

    pub fn common(&self) -> &CommonValues {
        match self {
            ContentValues::Text(v) => &v.common,
            ContentValues::Button(v) => &v.common,
            ContentValues::Image(v) => &v.common,
            ContentValues::Heading(v) => &v.common,
            ContentValues::Divider(v) => &v.common,
            ContentValues::Menu(v) => &v.common,
            ContentValues::Social(v) => &v.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonValues {
        match self {
            ContentValues::Text(v) => &mut v.common,
            ContentValues::Button(v) => &mut v.common,
            ContentValues::Image(v) => &mut v.common,
            ContentValues::Heading(v) => &mut v.common,
            ContentValues::Divider(v) => &mut v.common,
            ContentValues::Menu(v) => &mut v.common,
            ContentValues::Social(v) => &mut v.common,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.common().capabilities
    }

    /// Decode the `values` object of a block of type `ty`.
    pub fn from_json(ty: ContentType, values: Value) -> Result<Self, serde_json::Error> {
        Ok(match ty {
            ContentType::Text => ContentValues::Text(serde_json::from_value(values)?),
            ContentType::Button => ContentValues::Button(serde_json::from_value(values)?),
            ContentType::Image => ContentValues::Image(serde_json::from_value(values)?),
            ContentType::Heading => ContentValues::Heading(serde_json::from_value(values)?),
            ContentType::Divider => ContentValues::Divider(serde_json::from_value(values)?),
            ContentType::Menu => ContentValues::Menu(serde_json::from_value(values)?),
            ContentType::Social => ContentValues::Social(serde_json::from_value(values)?),
        })
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Short human-readable label for listings.
    pub fn summary(&self) -> String {
        match self {
            ContentValues::Text(v) => v.text.clone(),
            ContentValues::Heading(v) => v.text.clone(),
            ContentValues::Button(v) => v.text.clone(),
            ContentValues::Image(v) => v.src.url.clone().unwrap_or_default(),
            ContentValues::Divider(v) => v.width.clone(),
            ContentValues::Menu(v) => format!("{} items", v.menu.items.len()),
            ContentValues::Social(v) => format!("{} icons", v.icons.icons.len()),
        }
    }
}

impl Serialize for ContentValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentValues::Text(v) => v.serialize(serializer),
            ContentValues::Button(v) => v.serialize(serializer),
            ContentValues::Image(v) => v.serialize(serializer),
            ContentValues::Heading(v) => v.serialize(serializer),
            ContentValues::Divider(v) => v.serialize(serializer),
            ContentValues::Menu(v) => v.serialize(serializer),
            ContentValues::Social(v) => v.serialize(serializer),
        }
    }
}

/// Wire shape of a block before its values are decoded by type.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    id: String,
    #[serde(rename = "type")]
    content_type: ContentType,
    #[serde(default)]
    values: Value,
    #[serde(default)]
    has_deprecated_font_controls: Option<bool>,
}

/// A leaf block inside a column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawContent")]
pub struct Content {
    pub id: String,
    pub values: ContentValues,
    pub has_deprecated_font_controls: Option<bool>,
}

impl Content {
    pub fn new(id: impl Into<String>, values: ContentValues) -> Self {
        Self {
            id: id.into(),
            values,
            has_deprecated_font_controls: None,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.values.content_type()
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.values.capabilities()
    }
}

impl TryFrom<RawContent> for Content {
    type Error = serde_json::Error;

    fn try_from(raw: RawContent) -> Result<Self, Self::Error> {
        let values = match raw.values {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(Self {
            values: ContentValues::from_json(raw.content_type, values)?,
            id: raw.id,
            has_deprecated_font_controls: raw.has_deprecated_font_controls,
        })
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.has_deprecated_font_controls.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("Content", len)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.content_type())?;
        state.serialize_field("values", &self.values)?;
        if let Some(flag) = self.has_deprecated_font_controls {
            state.serialize_field("hasDeprecatedFontControls", &flag)?;
        }
        state.end()
    }
}
