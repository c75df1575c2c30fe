//! Line shape: which fields a line carries and how logger names are rendered
//!
//! - `name`: fixed-width logger name tokens
//! - `template`: leading-field composition and the line template

mod name;
mod template;

pub use name::{
    DEFAULT_NAME_WIDTH, FILLER, MAX_NAME_WIDTH, NameFormatter, TRUNCATION_MARKER_LEN, format_name,
    logger_name,
};
pub use template::{DELIMITER, Field, FieldComposer, LineTemplate};
