pub mod app;
pub mod configs;
pub mod consts;
pub mod error;
pub mod logger;

pub use app::{client_builder, Client};
pub use common_enums::{OrderIdType, RefundQueryType};
pub use common_utils::TradeNo;
pub use connector_integration::{parse_notification, WxPay};
pub use domain_types::connector_types::{NotificationRecord, ParamValue, RequestParameterSet};
pub use interfaces::api::{NonceGenerator, XmlTransport};
