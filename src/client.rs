use crate::core::config::GatewayConfig;
use crate::core::errors::GatewayError;
use crate::core::kernel::{ReqwestTransport, RequestSigner, Transport, TransportConfig};
use crate::core::types::{ParamSet, ParamValue};
use serde_json::Value;

/// Thin typed facade over the gateway transport
///
/// Each method shapes its arguments into the parameter set the remote action
/// expects and delegates to [`Transport::call`]. The returned value is the
/// gateway's opaque response payload; remote business errors (numeric error
/// codes) ride inside it and are not interpreted locally.
pub struct GsgClient<T = ReqwestTransport> {
    transport: T,
}

impl GsgClient<ReqwestTransport> {
    /// Create a client from gateway credentials and endpoint configuration
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let signer = RequestSigner::new(config.project, config.secret().to_string());
        let transport = ReqwestTransport::new(TransportConfig::new(config.endpoint.clone()), signer)?;
        Ok(Self { transport })
    }
}

impl<T: Transport> GsgClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Pre-pay check of payment possibility for an account
    ///
    /// `extra` carries optional action parameters such as `amount` and
    /// `currency`; entries there override the named arguments on key
    /// collision.
    pub async fn check(
        &self,
        txn_id: i64,
        paysystem: u32,
        account: impl Into<String>,
        extra: ParamSet,
    ) -> Result<Value, GatewayError> {
        let mut params = ParamSet::new();
        params.insert("txn_id".to_string(), ParamValue::from(txn_id));
        params.insert("paysystem".to_string(), ParamValue::from(paysystem));
        params.insert("account".to_string(), ParamValue::from(account.into()));
        params.extend(extra);

        self.send("check", params).await
    }

    /// Initiate a payment for an invoice returned by `check`
    pub async fn pay(
        &self,
        invoice: i64,
        txn_id: i64,
        extra: ParamSet,
    ) -> Result<Value, GatewayError> {
        let mut params = ParamSet::new();
        params.insert("invoice".to_string(), ParamValue::from(invoice));
        params.insert("txn_id".to_string(), ParamValue::from(txn_id));
        params.extend(extra);

        self.send("pay", params).await
    }

    /// Query the status of a payment
    pub async fn pay_status(&self, invoice: i64, txn_id: i64) -> Result<Value, GatewayError> {
        let mut params = ParamSet::new();
        params.insert("invoice".to_string(), ParamValue::from(invoice));
        params.insert("txn_id".to_string(), ParamValue::from(txn_id));

        self.send("pay_status", params).await
    }

    /// Fetch the project's main balance
    pub async fn main_balance(&self) -> Result<Value, GatewayError> {
        self.send("main_balance", ParamSet::new()).await
    }

    /// List the payment systems available to the project
    pub async fn paysystems(&self) -> Result<Value, GatewayError> {
        self.send("paysystems", ParamSet::new()).await
    }

    /// Fetch the gateway's error-code catalog
    pub async fn errors(&self) -> Result<Value, GatewayError> {
        self.send("errors", ParamSet::new()).await
    }

    /// Issue an arbitrary action against the gateway
    ///
    /// The primitive underneath every named method; useful for remote actions
    /// added server-side before this client grows a wrapper for them.
    pub async fn send(&self, action: &str, params: ParamSet) -> Result<Value, GatewayError> {
        self.transport.call(action, params).await
    }
}
