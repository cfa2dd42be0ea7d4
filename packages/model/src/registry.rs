//! Palette of insertable block types and their default values.

use crate::content::{
    ButtonColors, ButtonSize, ButtonValues, CommonValues, Content, ContentType, ContentValues,
    DividerValues, HeadingType, HeadingValues, ImageSource, ImageValues, Menu, MenuValues,
    SocialIcons, SocialValues, TextValues,
};
use crate::id_generator::IdSource;
use crate::template::FontFamily;
use mailblocks_style::Border;
use serde_json::Map;
use std::collections::BTreeMap;

/// A palette entry as shown in the block picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub content_type: ContentType,
    pub label: &'static str,
    pub defaults: ContentValues,
}

/// Registry mapping each block type to the values a fresh block starts with.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: BTreeMap<ContentType, PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        let entries = ContentType::ALL
            .into_iter()
            .map(|ty| {
                let entry = PaletteEntry {
                    content_type: ty,
                    label: default_label(ty),
                    defaults: default_values(ty),
                };
                (ty, entry)
            })
            .collect();
        Self { entries }
    }
}

impl Palette {
    pub fn entries(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.values()
    }

    pub fn get(&self, ty: ContentType) -> Option<&PaletteEntry> {
        self.entries.get(&ty)
    }

    /// Replace the defaults for one type. Values of another type are ignored.
    pub fn set_defaults(&mut self, values: ContentValues) {
        let ty = values.content_type();
        if let Some(entry) = self.entries.get_mut(&ty) {
            entry.defaults = values;
        }
    }

    pub fn defaults(&self, ty: ContentType) -> ContentValues {
        self.entries
            .get(&ty)
            .map(|entry| entry.defaults.clone())
            .unwrap_or_else(|| default_values(ty))
    }

    /// A new block of type `ty` with a fresh id and the registered defaults.
    pub fn instantiate(&self, ty: ContentType, ids: &mut dyn IdSource) -> Content {
        Content::new(ids.new_id(), self.defaults(ty))
    }
}

fn default_label(ty: ContentType) -> &'static str {
    match ty {
        ContentType::Text => "Text",
        ContentType::Button => "Button",
        ContentType::Image => "Image",
        ContentType::Heading => "Heading",
        ContentType::Divider => "Divider",
        ContentType::Menu => "Menu",
        ContentType::Social => "Social",
    }
}

fn default_values(ty: ContentType) -> ContentValues {
    let common = CommonValues::default();
    match ty {
        ContentType::Text => ContentValues::Text(TextValues {
            text: "This is a new Text block. Change the text".to_string(),
            color: Some("#FFFFFF".to_string()),
            font_family: None,
            font_size: "16px".to_string(),
            font_weight: Some(400),
            text_align: "left".to_string(),
            line_height: "140%".to_string(),
            letter_spacing: Some("0px".to_string()),
            link_style: None,
            common,
        }),
        ContentType::Heading => ContentValues::Heading(HeadingValues {
            text: String::new(),
            heading_type: HeadingType::H1,
            color: Some("#000000".to_string()),
            font_family: Some(FontFamily {
                label: "Arial".to_string(),
                value: "Arial".to_string(),
                url: None,
                default_font: Some(true),
                extra: Map::new(),
            }),
            font_size: "32px".to_string(),
            font_weight: Some(700),
            text_align: "left".to_string(),
            line_height: "120%".to_string(),
            letter_spacing: Some("0px".to_string()),
            link_style: None,
            common,
        }),
        ContentType::Button => ContentValues::Button(ButtonValues {
            text: "Button Text".to_string(),
            href: None,
            button_colors: ButtonColors {
                color: "#FFFFFF".to_string(),
                background_color: "#3AAEE0".to_string(),
                hover_color: Some(String::new()),
                hover_background_color: Some(String::new()),
            },
            size: ButtonSize::default(),
            font_family: None,
            font_size: "14px".to_string(),
            font_weight: Some(400),
            line_height: "140%".to_string(),
            letter_spacing: Some("0px".to_string()),
            text_align: None,
            padding: "10px".to_string(),
            border: None,
            border_radius: Some("4px".to_string()),
            common,
        }),
        ContentType::Image => ContentValues::Image(ImageValues {
            src: ImageSource {
                url: Some(String::new()),
                max_width: Some("100%".to_string()),
                ..Default::default()
            },
            alt_text: None,
            text_align: None,
            action: None,
            common,
        }),
        ContentType::Divider => {
            let mut border = Border::default();
            border.border_top_color = Some("#FFFFFF".to_string());
            ContentValues::Divider(DividerValues {
                width: "100%".to_string(),
                border,
                text_align: None,
                common,
            })
        }
        ContentType::Menu => ContentValues::Menu(MenuValues {
            menu: Menu::default(),
            font_family: None,
            font_size: "14px".to_string(),
            font_weight: Some(400),
            letter_spacing: Some("0px".to_string()),
            line_height: Some("140%".to_string()),
            text_color: "#ffffff".to_string(),
            link_color: "#ffffff".to_string(),
            align: "center".to_string(),
            layout: "horizontal".to_string(),
            separator: Some("|".to_string()),
            padding: "5px 10px".to_string(),
            common,
        }),
        ContentType::Social => ContentValues::Social(SocialValues {
            icons: SocialIcons {
                icon_type: "social".to_string(),
                icons: Vec::new(),
                spacing: 10,
            },
            icon_size: 24,
            common,
        }),
    }
}
