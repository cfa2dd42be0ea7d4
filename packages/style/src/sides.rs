use crate::error::StyleError;
use crate::length::{parse_px, px};
use serde::{Deserialize, Serialize};

/// One side of a box, in shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// Four per-side values in `top right bottom left` order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Clone> Sides<T> {
    pub fn all(value: T) -> Self {
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }
}

impl<T> Sides<T> {
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }

    pub fn set(&mut self, side: Side, value: T) {
        match side {
            Side::Top => self.top = value,
            Side::Right => self.right = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Sides<U> {
        Sides {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

impl<T: PartialEq> Sides<T> {
    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.top == self.bottom && self.top == self.left
    }
}

/// Expand a shorthand value into its four sides.
///
/// One token applies to every side; four tokens are assigned positionally.
/// Any other token count is a caller error.
pub fn to_sides(value: &str) -> Result<Sides<String>, StyleError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    match tokens.as_slice() {
        [all] => Ok(Sides::all((*all).to_string())),
        [top, right, bottom, left] => Ok(Sides {
            top: (*top).to_string(),
            right: (*right).to_string(),
            bottom: (*bottom).to_string(),
            left: (*left).to_string(),
        }),
        _ => Err(StyleError::MalformedShorthand {
            value: value.to_string(),
            tokens: tokens.len(),
        }),
    }
}

/// Collapse four sides into the shortest shorthand.
pub fn to_shorthand(sides: &Sides<String>) -> String {
    if sides.is_uniform() {
        sides.top.clone()
    } else {
        format!("{} {} {} {}", sides.top, sides.right, sides.bottom, sides.left)
    }
}

/// Turn "more options" off: keep only the first side, as whole pixels.
pub fn collapse(value: &str) -> String {
    px(first_px(value))
}

/// Turn "more options" on: repeat the first side four times.
pub fn expand(value: &str) -> String {
    let first = px(first_px(value));
    format!("{first} {first} {first} {first}")
}

/// Replace one side of a shorthand value with a pixel length.
///
/// The result is always in the four-token form, matching what the per-side
/// inputs emit.
pub fn set_side(value: &str, side: Side, value_px: i64) -> Result<String, StyleError> {
    let mut sides = to_sides(value)?;
    sides.set(side, px(value_px));
    Ok(format!(
        "{} {} {} {}",
        sides.top, sides.right, sides.bottom, sides.left
    ))
}

/// Return `value` if it is a well-formed shorthand, otherwise `fallback`.
pub fn normalize_or(value: &str, fallback: &str) -> String {
    match to_sides(value) {
        Ok(_) => value.to_string(),
        Err(_) => fallback.to_string(),
    }
}

fn first_px(value: &str) -> i64 {
    value.split_whitespace().next().map(parse_px).unwrap_or(0)
}
