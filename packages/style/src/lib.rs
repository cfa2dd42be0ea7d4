//! # Mailblocks Style
//!
//! Normalisation of CSS-like box values used by template blocks.
//!
//! Padding, border and border-radius are stored either as a single shorthand
//! token (`"10px"`) that applies to every side, or as four tokens in
//! `top right bottom left` order. Property panels toggle between the two
//! forms; collapsing is lossy and always anchored on the first side.
//!
//! ```rust
//! use mailblocks_style::{to_sides, to_shorthand, collapse, expand};
//!
//! let sides = to_sides("10px").unwrap();
//! assert_eq!(sides.left, "10px");
//! assert_eq!(to_shorthand(&sides), "10px");
//!
//! assert_eq!(expand("5px"), "5px 5px 5px 5px");
//! assert_eq!(collapse("5px 1px 2px 3px"), "5px");
//! ```

mod border;
mod error;
mod length;
mod radius;
mod sides;

pub use border::{Border, BorderSide, ShorthandBorder, BORDER_STYLES};
pub use error::StyleError;
pub use length::{parse_px, px};
pub use radius::{BorderRadius, Corner, Corners};
pub use sides::{collapse, expand, normalize_or, set_side, to_shorthand, to_sides, Side, Sides};
