pub mod content;
pub mod id_generator;
pub mod query;
pub mod registry;
pub mod template;

pub use content::{
    Action, ActionValues, ButtonColors, ButtonSize, ButtonValues, CommonValues, Content,
    ContentType, ContentValues, DividerValues, HeadingType, HeadingValues, ImageSource,
    ImageValues, Menu, MenuItem, MenuValues, SocialIcon, SocialIcons, SocialValues, TextValues,
    UnknownContentType,
};
pub use id_generator::{get_seed, IDGenerator, IdSource, RandomIds};
pub use query::{
    check_invariants, column_at, column_width_percent, column_widths_px, contents, find_column,
    find_content, find_row, find_row_index, ColumnLocation, ContentLocation, InvariantViolation,
};
pub use registry::{Palette, PaletteEntry};
pub use template::{
    BackgroundImage, Body, BodyValues, Capabilities, Column, ColumnValues, FontFamily, LinkStyle,
    Meta, Row, RowValues, Template, DEFAULT_CONTENT_WIDTH, SCHEMA_VERSION,
};
