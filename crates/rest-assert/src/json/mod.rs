//! JSON comparison and selection.
//!
//! - `compare` - Structural diff with dotted-path difference messages
//! - `path` - JSONPath normalization and node selection
//! - `entry` - Expected (path, value) pairs
//! - `load` - Loading expected documents from strings, files, URLs and values

mod compare;
mod entry;
pub mod load;
mod path;

pub use compare::{
    compare_json, compare_json_ignoring, compare_values, compare_values_detailed, is_array, is_object,
    is_valid, Difference, DifferenceKind,
};
pub use entry::{entry, JsonEntry};
pub use path::{normalize_path, select};

pub(crate) use compare::{compare_numbers, render, values_equal};
