//! Converts cluster definitions between external schema versions through the canonical model.
pub mod conversion;

pub use self::conversion::{convert_document, convert_documents, ConvertError};
