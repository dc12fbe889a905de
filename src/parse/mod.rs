pub mod entry;
pub mod list_parser;
pub mod list_serializer;

pub use entry::{Entry, flatten_entry, parse_entry, prefill_entry};
pub use list_parser::{FIELD_SEPARATOR, parse_line, parse_list};
pub use list_serializer::{serialize_line, serialize_list};
