pub mod field_codec;
pub mod xml_utils;

pub use field_codec::{coerce_int, IndexedFieldArray};
pub use xml_utils::parse_flat_xml;
