//! Output formats for syntax trees
//!
//! - treeviz: one line per node with box-drawing connectors
//! - json: pretty JSON of `{type, content?, children}`

pub mod json;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_str, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_truncation, TreevizFormatter};
