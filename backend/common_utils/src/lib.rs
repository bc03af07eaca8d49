//! Utilities shared across the WeChat Pay adapter crates

pub mod consts;
pub mod device;
pub mod errors;
pub mod fp_utils;
pub mod id_type;

pub use errors::{CustomResult, ParsingError, ValidationError};
pub use id_type::TradeNo;
