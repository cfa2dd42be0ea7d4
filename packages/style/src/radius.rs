use crate::error::StyleError;
use crate::length::{parse_px, px};
use crate::sides::{to_shorthand, to_sides, Sides};
use serde::{Deserialize, Serialize};

/// A box corner, in shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// Four corner values in `top-left top-right bottom-right bottom-left` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corners {
    pub top_left: String,
    pub top_right: String,
    pub bottom_right: String,
    pub bottom_left: String,
}

impl Corners {
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let sides = to_sides(value)?;
        Ok(Self {
            top_left: sides.top,
            top_right: sides.right,
            bottom_right: sides.bottom,
            bottom_left: sides.left,
        })
    }

    pub fn to_shorthand(&self) -> String {
        to_shorthand(&Sides {
            top: self.top_left.clone(),
            right: self.top_right.clone(),
            bottom: self.bottom_right.clone(),
            left: self.bottom_left.clone(),
        })
    }
}

/// Per-corner radius object, every corner optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadius {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_left_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top_right_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_right_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom_left_radius: Option<String>,
}

impl BorderRadius {
    pub fn from_shorthand(value: &str) -> Result<Self, StyleError> {
        let corners = Corners::parse(value)?;
        Ok(Self {
            border_top_left_radius: Some(corners.top_left),
            border_top_right_radius: Some(corners.top_right),
            border_bottom_right_radius: Some(corners.bottom_right),
            border_bottom_left_radius: Some(corners.bottom_left),
        })
    }

    fn slot(&mut self, corner: Corner) -> &mut Option<String> {
        match corner {
            Corner::TopLeft => &mut self.border_top_left_radius,
            Corner::TopRight => &mut self.border_top_right_radius,
            Corner::BottomRight => &mut self.border_bottom_right_radius,
            Corner::BottomLeft => &mut self.border_bottom_left_radius,
        }
    }

    /// Radius of one corner in whole pixels; missing corners are 0.
    pub fn corner(&self, corner: Corner) -> i64 {
        let value = match corner {
            Corner::TopLeft => &self.border_top_left_radius,
            Corner::TopRight => &self.border_top_right_radius,
            Corner::BottomRight => &self.border_bottom_right_radius,
            Corner::BottomLeft => &self.border_bottom_left_radius,
        };
        value.as_deref().map(parse_px).unwrap_or(0)
    }

    pub fn set_corner(&mut self, corner: Corner, radius: i64) {
        *self.slot(corner) = Some(px(radius));
    }

    pub fn set_all(&mut self, radius: i64) {
        for corner in Corner::ALL {
            self.set_corner(corner, radius);
        }
    }

    /// "All corners" view, anchored on the top-left corner.
    pub fn collapse(&self) -> Self {
        let mut collapsed = Self::default();
        collapsed.set_all(self.corner(Corner::TopLeft));
        collapsed
    }

    pub fn to_shorthand(&self) -> String {
        Corners {
            top_left: px(self.corner(Corner::TopLeft)),
            top_right: px(self.corner(Corner::TopRight)),
            bottom_right: px(self.corner(Corner::BottomRight)),
            bottom_left: px(self.corner(Corner::BottomLeft)),
        }
        .to_shorthand()
    }
}
