pub mod connectors;
pub mod utils;

pub use connectors::{parse_notification, WxPay};
