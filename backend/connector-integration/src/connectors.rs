pub mod wxpay;

pub use self::wxpay::{parse_notification, WxPay};
