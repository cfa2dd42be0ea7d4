//! Border values.
//!
//! Columns and dividers store twelve independent per-side properties
//! (`borderTopWidth`, `borderTopStyle`, ...). Buttons store a shorthand
//! triple (`borderWidth`, `borderStyle`, `borderColor`) whose strings are
//! themselves one- or four-token shorthands.

use crate::length::{parse_px, px};
use crate::sides::{Side, Sides};
use serde::{Deserialize, Serialize};

pub const BORDER_STYLES: [&str; 5] = ["none", "solid", "dashed", "dotted", "double"];

const DEFAULT_STYLE: &str = "none";
const DEFAULT_COLOR: &str = "#000000";

/// Resolved width/style/colour of one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderSide {
    pub width: i64,
    pub style: String,
    pub color: String,
}

impl Default for BorderSide {
    fn default() -> Self {
        Self {
            width: 0,
            style: DEFAULT_STYLE.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Per-side border with every property optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left_color: Option<String>,
}

impl Border {
    /// Same width/style/colour on every side.
    pub fn uniform(side: &BorderSide) -> Self {
        let mut border = Self::default();
        border.set_all(side);
        border
    }

    fn fields(&self, side: Side) -> (&Option<String>, &Option<String>, &Option<String>) {
        match side {
            Side::Top => (&self.border_top_width, &self.border_top_style, &self.border_top_color),
            Side::Right => (
                &self.border_right_width,
                &self.border_right_style,
                &self.border_right_color,
            ),
            Side::Bottom => (
                &self.border_bottom_width,
                &self.border_bottom_style,
                &self.border_bottom_color,
            ),
            Side::Left => (
                &self.border_left_width,
                &self.border_left_style,
                &self.border_left_color,
            ),
        }
    }

    fn fields_mut(
        &mut self,
        side: Side,
    ) -> (&mut Option<String>, &mut Option<String>, &mut Option<String>) {
        match side {
            Side::Top => (
                &mut self.border_top_width,
                &mut self.border_top_style,
                &mut self.border_top_color,
            ),
            Side::Right => (
                &mut self.border_right_width,
                &mut self.border_right_style,
                &mut self.border_right_color,
            ),
            Side::Bottom => (
                &mut self.border_bottom_width,
                &mut self.border_bottom_style,
                &mut self.border_bottom_color,
            ),
            Side::Left => (
                &mut self.border_left_width,
                &mut self.border_left_style,
                &mut self.border_left_color,
            ),
        }
    }

    /// Resolve one side, filling gaps with width 0, style `none`, colour `#000000`.
    pub fn side(&self, side: Side) -> BorderSide {
        let (width, style, color) = self.fields(side);
        BorderSide {
            width: width.as_deref().map(parse_px).unwrap_or(0),
            style: style.clone().unwrap_or_else(|| DEFAULT_STYLE.to_string()),
            color: color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }
    }

    pub fn sides(&self) -> Sides<BorderSide> {
        Sides {
            top: self.side(Side::Top),
            right: self.side(Side::Right),
            bottom: self.side(Side::Bottom),
            left: self.side(Side::Left),
        }
    }

    pub fn set_side(&mut self, side: Side, value: &BorderSide) {
        let (width, style, color) = self.fields_mut(side);
        *width = Some(px(value.width));
        *style = Some(value.style.clone());
        *color = Some(value.color.clone());
    }

    pub fn set_all(&mut self, value: &BorderSide) {
        for side in Side::ALL {
            self.set_side(side, value);
        }
    }

    pub fn set_width(&mut self, side: Side, width: i64) {
        *self.fields_mut(side).0 = Some(px(width));
    }

    pub fn set_style(&mut self, side: Side, style: impl Into<String>) {
        *self.fields_mut(side).1 = Some(style.into());
    }

    pub fn set_color(&mut self, side: Side, color: impl Into<String>) {
        *self.fields_mut(side).2 = Some(color.into());
    }

    pub fn set_all_width(&mut self, width: i64) {
        for side in Side::ALL {
            self.set_width(side, width);
        }
    }

    pub fn set_all_style(&mut self, style: &str) {
        for side in Side::ALL {
            self.set_style(side, style);
        }
    }

    pub fn set_all_color(&mut self, color: &str) {
        for side in Side::ALL {
            self.set_color(side, color);
        }
    }

    /// "All sides" view: the top side stands in for the whole border.
    pub fn collapse(&self) -> Self {
        Self::uniform(&self.side(Side::Top))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// CSS value for one side, or `None` when the side has no width.
    pub fn css(&self, side: Side) -> Option<String> {
        let (width, style, color) = self.fields(side);
        width.as_ref().map(|width| {
            format!(
                "{} {} {}",
                width,
                style.as_deref().unwrap_or("solid"),
                color.as_deref().unwrap_or("#000")
            )
        })
    }
}

/// Button-style border: each field is a one- or four-token shorthand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShorthandBorder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl ShorthandBorder {
    fn first_width(&self) -> i64 {
        self.border_width
            .as_deref()
            .and_then(|w| w.split_whitespace().next())
            .map(parse_px)
            .unwrap_or(0)
    }

    fn first_token(value: &Option<String>, fallback: &str) -> String {
        value
            .as_deref()
            .and_then(|v| v.split_whitespace().next())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Single-token form anchored on the first side of each property.
    pub fn collapse(&self) -> Self {
        Self {
            border_width: Some(px(self.first_width())),
            border_style: Some(Self::first_token(&self.border_style, DEFAULT_STYLE)),
            border_color: Some(Self::first_token(&self.border_color, "transparent")),
        }
    }

    /// Four-token form repeating the first side of each property.
    pub fn expand(&self) -> Self {
        let repeat = |v: String| format!("{v} {v} {v} {v}");
        Self {
            border_width: Some(repeat(px(self.first_width()))),
            border_style: Some(repeat(Self::first_token(&self.border_style, DEFAULT_STYLE))),
            border_color: Some(repeat(Self::first_token(&self.border_color, "transparent"))),
        }
    }
}
