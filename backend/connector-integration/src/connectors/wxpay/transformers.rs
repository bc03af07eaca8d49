use chrono::{DateTime, Duration, Local};
use common_enums::{OrderIdType, RefundQueryType};
use common_utils::{consts, TradeNo};
use domain_types::{
    connector_types::{NotificationRecord, RequestParameterSet},
    types::MerchantIdentity,
};
use interfaces::api::NonceGenerator;
use serde_json::Value;

use crate::utils::field_codec::{coerce_int, IndexedFieldArray};

pub const APP_ID: &str = "appid";
pub const MCH_ID: &str = "mch_id";
pub const NONCE_STR: &str = "nonce_str";
pub const DEVICE_INFO: &str = "device_info";
pub const TIME_START: &str = "time_start";
pub const TIME_EXPIRE: &str = "time_expire";
pub const OUT_TRADE_NO: &str = "out_trade_no";
pub const OUT_REFUND_NO: &str = "out_refund_no";

/// Notification fields that always carry integers (amounts in fen, counts).
pub const NOTIFICATION_INT_FIELDS: [&str; 5] = [
    "total_fee",
    "settlement_total_fee",
    "cash_fee",
    "coupon_fee",
    "coupon_count",
];

/// `coupon_type_$n` / `coupon_id_$n` / `coupon_fee_$n`, sized by `coupon_count`.
pub const COUPONS: IndexedFieldArray<'static> = IndexedFieldArray::new(
    "coupon_count",
    &["coupon_type", "coupon_id", "coupon_fee"],
    &["coupon_type", "coupon_fee"],
);

/// Writes the merchant identity over whatever the caller supplied.
fn apply_identity(params: &mut RequestParameterSet, identity: &MerchantIdentity) {
    params.insert(APP_ID, identity.app_id());
    params.insert(MCH_ID, identity.merchant_id());
}

fn identity_params<N>(identity: &MerchantIdentity, nonce: &N) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
{
    let mut params = RequestParameterSet::new().with(NONCE_STR, nonce.generate_nonce_str());
    apply_identity(&mut params, identity);
    params
}

/// `unifiedorder` parameters.
///
/// Defaults `nonce_str`, `time_start` (now) and `time_expire` (now + 15 min) when the caller
/// left them out, renders timestamp values as `YYYYMMDDHHmmss`, then stamps the identity.
pub fn unified_order_params<N>(
    identity: &MerchantIdentity,
    nonce: &N,
    args: RequestParameterSet,
    now: DateTime<Local>,
) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
{
    let mut params = args;
    params.insert_if_missing(NONCE_STR, || nonce.generate_nonce_str());
    params.insert_if_missing(TIME_START, || now);
    params.insert_if_missing(TIME_EXPIRE, || {
        now + Duration::milliseconds(consts::ORDER_EXPIRY_MILLIS)
    });
    params.format_time(TIME_START);
    params.format_time(TIME_EXPIRE);
    apply_identity(&mut params, identity);
    params
}

/// `orderquery` parameters, keyed on either the merchant or the gateway order id.
pub fn order_query_params<N>(
    identity: &MerchantIdentity,
    nonce: &N,
    id: &str,
    id_type: OrderIdType,
) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
{
    identity_params(identity, nonce).with(id_type.field_name(), id)
}

/// `closeorder` parameters.
pub fn close_order_params<N>(
    identity: &MerchantIdentity,
    nonce: &N,
    out_trade_no: &str,
) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
{
    identity_params(identity, nonce).with(OUT_TRADE_NO, out_trade_no)
}

/// `refund` parameters.
///
/// Caller fields win over the computed `nonce_str`, `device_info` and `out_refund_no`
/// defaults, but never over the identity.
pub fn refund_params<N, F>(
    identity: &MerchantIdentity,
    nonce: &N,
    args: RequestParameterSet,
    device_info: &str,
    refund_no: F,
) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
    F: FnOnce() -> TradeNo,
{
    let mut params = RequestParameterSet::new()
        .with(NONCE_STR, nonce.generate_nonce_str())
        .with(DEVICE_INFO, device_info);
    params.merge(args);
    params.insert_if_missing(NONCE_STR, || nonce.generate_nonce_str());
    params.insert_if_missing(OUT_REFUND_NO, refund_no);
    apply_identity(&mut params, identity);
    params
}

/// `refundquery` parameters with exactly one lookup key.
pub fn refund_query_params<N>(
    identity: &MerchantIdentity,
    nonce: &N,
    id: &str,
    query_type: RefundQueryType,
    device_info: &str,
) -> RequestParameterSet
where
    N: NonceGenerator + ?Sized,
{
    identity_params(identity, nonce)
        .with(DEVICE_INFO, device_info)
        .with(query_type.field_name(), id)
}

/// Turns the amount and count fields of a parsed notification into integers.
pub fn normalize_notification(record: &mut NotificationRecord) {
    let fields = record.fields_mut();
    for field in NOTIFICATION_INT_FIELDS {
        coerce_int(fields, field);
    }
    COUPONS.coerce_ints(fields);
}

/// One coupon applied to a payment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WxPayCoupon {
    pub coupon_type: Option<i64>,
    pub coupon_id: Option<String>,
    pub coupon_fee: Option<i64>,
}

/// Coupons of a normalized notification, one entry per declared slot.
pub fn coupons(record: &NotificationRecord) -> Vec<WxPayCoupon> {
    COUPONS
        .decode(record.fields())
        .into_iter()
        .map(|slot| WxPayCoupon {
            coupon_type: slot.get("coupon_type").and_then(Value::as_i64),
            coupon_id: slot
                .get("coupon_id")
                .and_then(Value::as_str)
                .map(str::to_owned),
            coupon_fee: slot.get("coupon_fee").and_then(Value::as_i64),
        })
        .collect()
}
