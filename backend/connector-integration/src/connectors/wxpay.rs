pub mod transformers;


use chrono::Local;
use common_enums::{OrderIdType, RefundQueryType};
use common_utils::{consts, device, CustomResult, ParsingError, TradeNo};
use domain_types::{
    connector_types::{NotificationRecord, RequestParameterSet},
    errors::ConnectorError,
    types::{GatewayAction, GatewayEndpoints, MerchantIdentity},
};
use interfaces::api::{NonceGenerator, RandomNonce, XmlTransport};

use crate::utils::xml_utils::parse_flat_xml;

/// Client for the gateway's XML RPC endpoints.
///
/// Holds no per-call state: each operation builds its own parameter set, hands it to the
/// transport and returns the transport's result unchanged.
#[derive(Debug)]
pub struct WxPay<T, N = RandomNonce> {
    identity: MerchantIdentity,
    endpoints: GatewayEndpoints,
    transport: T,
    nonce: N,
}

impl<T> WxPay<T>
where
    T: XmlTransport,
{
    pub fn new(identity: MerchantIdentity, transport: T) -> Self {
        Self {
            identity,
            endpoints: GatewayEndpoints::default(),
            transport,
            nonce: RandomNonce,
        }
    }
}

impl<T, N> WxPay<T, N>
where
    T: XmlTransport,
    N: NonceGenerator,
{
    pub fn with_endpoints(mut self, endpoints: GatewayEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_nonce_generator<M: NonceGenerator>(self, nonce: M) -> WxPay<T, M> {
        WxPay {
            identity: self.identity,
            endpoints: self.endpoints,
            transport: self.transport,
            nonce,
        }
    }

    pub fn identity(&self) -> &MerchantIdentity {
        &self.identity
    }

    pub fn endpoints(&self) -> &GatewayEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// New trade number; `None` or an empty prefix uses `WX`.
    pub fn generate_trade_no(&self, prefix: Option<&str>) -> TradeNo {
        TradeNo::generate(prefix)
    }

    pub fn build_unified_order_request(&self, args: RequestParameterSet) -> RequestParameterSet {
        transformers::unified_order_params(&self.identity, &self.nonce, args, Local::now())
    }

    pub fn build_order_query_request(&self, id: &str, id_type: OrderIdType) -> RequestParameterSet {
        transformers::order_query_params(&self.identity, &self.nonce, id, id_type)
    }

    pub fn build_close_order_request(&self, out_trade_no: &str) -> RequestParameterSet {
        transformers::close_order_params(&self.identity, &self.nonce, out_trade_no)
    }

    pub fn build_refund_request(&self, args: RequestParameterSet) -> RequestParameterSet {
        transformers::refund_params(
            &self.identity,
            &self.nonce,
            args,
            device::device_info(),
            || self.generate_trade_no(Some(consts::REFUND_NO_PREFIX)),
        )
    }

    pub fn build_refund_query_request(
        &self,
        id: &str,
        query_type: RefundQueryType,
    ) -> RequestParameterSet {
        transformers::refund_query_params(
            &self.identity,
            &self.nonce,
            id,
            query_type,
            device::device_info(),
        )
    }

    /// Places an order (`unifiedorder`).
    #[tracing::instrument(skip_all, fields(action = %GatewayAction::UnifiedOrder))]
    pub async fn unified_order(
        &self,
        args: RequestParameterSet,
    ) -> CustomResult<T::Output, ConnectorError> {
        let params = self.build_unified_order_request(args);
        tracing::info!(
            out_trade_no = params.get_text(transformers::OUT_TRADE_NO),
            "Creating order"
        );
        self.send(GatewayAction::UnifiedOrder, params).await
    }

    /// Looks up an order by merchant or gateway id (`orderquery`).
    #[tracing::instrument(skip_all, fields(action = %GatewayAction::OrderQuery, %id_type))]
    pub async fn query_order(
        &self,
        id: &str,
        id_type: OrderIdType,
    ) -> CustomResult<T::Output, ConnectorError> {
        let params = self.build_order_query_request(id, id_type);
        self.send(GatewayAction::OrderQuery, params).await
    }

    /// Closes an unpaid order (`closeorder`).
    #[tracing::instrument(skip_all, fields(action = %GatewayAction::CloseOrder))]
    pub async fn close_order(&self, out_trade_no: &str) -> CustomResult<T::Output, ConnectorError> {
        let params = self.build_close_order_request(out_trade_no);
        tracing::info!(out_trade_no, "Closing order");
        self.send(GatewayAction::CloseOrder, params).await
    }

    /// Requests a refund (`secapi/pay/refund`). Generates a `WR` refund number when the caller
    /// did not pass `out_refund_no`.
    #[tracing::instrument(skip_all, fields(action = %GatewayAction::Refund))]
    pub async fn refund(
        &self,
        args: RequestParameterSet,
    ) -> CustomResult<T::Output, ConnectorError> {
        let params = self.build_refund_request(args);
        tracing::info!(
            out_refund_no = params.get_text(transformers::OUT_REFUND_NO),
            out_trade_no = params.get_text(transformers::OUT_TRADE_NO),
            "Requesting refund"
        );
        self.send(GatewayAction::Refund, params).await
    }

    /// Looks up a refund (`refundquery`) by the identifier selected with `query_type`.
    #[tracing::instrument(skip_all, fields(action = %GatewayAction::RefundQuery, %query_type))]
    pub async fn query_refund(
        &self,
        id: &str,
        query_type: RefundQueryType,
    ) -> CustomResult<T::Output, ConnectorError> {
        let params = self.build_refund_query_request(id, query_type);
        self.send(GatewayAction::RefundQuery, params).await
    }

    /// See [`parse_notification`].
    pub fn parse_notification(&self, xml: &str) -> CustomResult<NotificationRecord, ParsingError> {
        parse_notification(xml)
    }

    async fn send(
        &self,
        action: GatewayAction,
        params: RequestParameterSet,
    ) -> CustomResult<T::Output, ConnectorError> {
        let url = self.endpoints.url_for(action);
        tracing::debug!(
            %url,
            fields = ?params.keys().collect::<Vec<_>>(),
            "Dispatching gateway request"
        );
        self.transport
            .xml_request(&url, params)
            .await
            .inspect_err(|err| tracing::warn!(error = ?err, %action, "Gateway request failed"))
    }
}

/// Parses an asynchronous payment notification and coerces its amount fields.
///
/// `total_fee`, `settlement_total_fee`, `cash_fee`, `coupon_fee`, `coupon_count` and the
/// `coupon_type_$n` / `coupon_fee_$n` slots become integers; malformed values become `0`.
/// The signature is not checked here.
pub fn parse_notification(xml: &str) -> CustomResult<NotificationRecord, ParsingError> {
    let fields = parse_flat_xml(xml)?;
    let mut record = NotificationRecord::new(fields);
    transformers::normalize_notification(&mut record);
    tracing::info!(
        out_trade_no = record.get_str(transformers::OUT_TRADE_NO),
        transaction_id = record.get_str("transaction_id"),
        total_fee = record.get_i64("total_fee"),
        "Parsed gateway notification"
    );
    Ok(record)
}
