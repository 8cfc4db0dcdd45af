//! Untron HTTP API client implementation.
//!
//! The remote service quotes liquidity, tracks orders, and relays signed
//! ERC-3009 transfers on-chain on the user's behalf.

pub mod http_client;

pub use http_client::{Arguments, HttpClientFactory};

use {
    model::{
        info::ExchangeInfo,
        order::{CreateOrderRequest, CreatedOrder, OrderId, OrderSnapshot},
        u256_decimal,
    },
    primitive_types::{H160, H256, U256},
    reqwest::{Client, IntoUrl, RequestBuilder, Url},
    serde::{Deserialize, Serialize},
    signing::{EcdsaSignature, TransferAuthorization},
    std::time::Duration,
    thiserror::Error,
};

/// How often [`wait_for_order_settlement`] polls by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// A signed gasless transfer ready for on-chain submission by the relay.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    /// The ERC-3009 token contract the transfer is drawn on.
    pub token: H160,
    pub from: H160,
    pub to: H160,
    #[serde(with = "u256_decimal")]
    pub value: U256,
    pub valid_after: u64,
    pub valid_before: u64,
    pub nonce: H256,
    pub r: H256,
    pub s: H256,
    pub v: u8,
}

impl RelayRequest {
    pub fn new(
        token: H160,
        authorization: &TransferAuthorization,
        signature: &EcdsaSignature,
    ) -> Self {
        Self {
            token,
            from: authorization.from,
            to: authorization.to,
            value: authorization.value,
            valid_after: authorization.valid_after,
            valid_before: authorization.valid_before,
            nonce: authorization.nonce,
            r: signature.r,
            s: signature.s,
            v: signature.v,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayReceipt {
    pub transaction_hash: H256,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with its error envelope.
    #[error("api error: {0}")]
    Server(String),

    #[error("error ({0}) deserializing response {1}")]
    Deserialize(serde_json::Error, String),

    #[error("failed to fetch response body")]
    TextFetch(#[source] reqwest::Error),

    // Connectivity or non-response error
    #[error("failed on send")]
    Send(#[source] reqwest::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResponse<Ok> {
    ResponseOk(Ok),
    ResponseErr { error: String },
}

/// Abstract Untron API. Provides a mockable implementation.
#[mockall::automock]
#[async_trait::async_trait]
pub trait UntronApi: Send + Sync {
    /// Retrieves the current rate, fees, and liquidity limits.
    async fn info(&self) -> Result<ExchangeInfo, ApiError>;

    /// Registers a new order and returns its id and expiry.
    async fn create_order(&self, request: &CreateOrderRequest)
        -> Result<CreatedOrder, ApiError>;

    /// Retrieves the current snapshot of an order.
    async fn order(&self, id: &OrderId) -> Result<OrderSnapshot, ApiError>;

    /// Submits a signed gasless transfer for on-chain relay.
    async fn relay_transfer(&self, request: &RelayRequest) -> Result<RelayReceipt, ApiError>;
}

/// Untron API client implementation.
#[derive(Debug)]
pub struct DefaultUntronApi {
    client: Client,
    base_url: Url,
}

impl DefaultUntronApi {
    pub const DEFAULT_URL: &'static str = "https://untron.finance/api/v1/";

    /// Create a new client using the given base URL.
    pub fn new(base_url: impl IntoUrl, client: Client) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: base_url.into_url()?,
        })
    }

    /// Create a new client using the default URL.
    pub fn with_default_url(client: Client) -> Self {
        Self::new(Self::DEFAULT_URL, client).unwrap()
    }

    fn url(&self, endpoint: &str) -> Url {
        self.base_url
            .join(endpoint)
            .expect("unexpectedly invalid URL segment")
    }

    async fn request<T: for<'a> serde::Deserialize<'a>>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response_text = request
            .send()
            .await
            .map_err(ApiError::Send)?
            .text()
            .await
            .map_err(ApiError::TextFetch)?;
        tracing::trace!("response from untron API: {}", response_text);

        match serde_json::from_str::<RawResponse<T>>(&response_text) {
            Ok(RawResponse::ResponseOk(response)) => Ok(response),
            Ok(RawResponse::ResponseErr { error }) => Err(ApiError::Server(error)),
            Err(err) => Err(ApiError::Deserialize(err, response_text)),
        }
    }
}

impl Default for DefaultUntronApi {
    fn default() -> Self {
        Self::with_default_url(HttpClientFactory::default().create())
    }
}

#[async_trait::async_trait]
impl UntronApi for DefaultUntronApi {
    async fn info(&self) -> Result<ExchangeInfo, ApiError> {
        self.request(self.client.get(self.url("info"))).await
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreatedOrder, ApiError> {
        self.request(self.client.post(self.url("orders")).json(request))
            .await
    }

    async fn order(&self, id: &OrderId) -> Result<OrderSnapshot, ApiError> {
        self.request(self.client.get(self.url(&format!("orders/{id}"))))
            .await
    }

    async fn relay_transfer(&self, request: &RelayRequest) -> Result<RelayReceipt, ApiError> {
        self.request(self.client.post(self.url("relay")).json(request))
            .await
    }
}

/// Polls an order until the service reports it settled or expired.
///
/// Returns the first terminal snapshot observed. The caller bounds the wait
/// by dropping the future; no internal deadline is applied.
pub async fn wait_for_order_settlement(
    api: &dyn UntronApi,
    id: &OrderId,
    poll_interval: Duration,
) -> Result<OrderSnapshot, ApiError> {
    loop {
        let snapshot = api.order(id).await?;
        if snapshot.status.is_terminal() {
            return Ok(snapshot);
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        chrono::{TimeZone, Utc},
        model::order::OrderStatus,
        serde_json::json,
    };

    fn order_id() -> OrderId {
        OrderId {
            receiver: "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL".parse().unwrap(),
            nonce: 7,
        }
    }

    fn snapshot(status: OrderStatus) -> OrderSnapshot {
        OrderSnapshot {
            id: order_id(),
            rate: 999_700,
            requested_total: 100_000_000u64.into(),
            received_total: U256::zero(),
            paid_total: U256::zero(),
            status,
            expires_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_relay_request() {
        let authorization = TransferAuthorization {
            from: H160::from_low_u64_be(1),
            to: H160::from_low_u64_be(2),
            value: 2_500_000u64.into(),
            valid_after: 0,
            valid_before: 1_700_000_000,
            nonce: H256::from_low_u64_be(42),
        };
        let signature = EcdsaSignature {
            r: H256::from_low_u64_be(3),
            s: H256::from_low_u64_be(4),
            v: 27,
        };
        let request = RelayRequest::new(H160::from_low_u64_be(9), &authorization, &signature);
        assert_eq!(
            json!(request),
            json!({
                "token": "0x0000000000000000000000000000000000000009",
                "from": "0x0000000000000000000000000000000000000001",
                "to": "0x0000000000000000000000000000000000000002",
                "value": "2500000",
                "validAfter": 0,
                "validBefore": 1_700_000_000,
                "nonce": "0x000000000000000000000000000000000000000000000000000000000000002a",
                "r": "0x0000000000000000000000000000000000000000000000000000000000000003",
                "s": "0x0000000000000000000000000000000000000000000000000000000000000004",
                "v": 27,
            })
        );
    }

    #[test]
    fn parses_error_envelope() {
        let raw: RawResponse<RelayReceipt> =
            serde_json::from_value(json!({ "error": "insufficient liquidity" })).unwrap();
        assert!(matches!(raw, RawResponse::ResponseErr { error } if error == "insufficient liquidity"));

        let raw: RawResponse<RelayReceipt> = serde_json::from_value(json!({
            "transactionHash":
                "0x0000000000000000000000000000000000000000000000000000000000000001",
        }))
        .unwrap();
        assert!(matches!(
            raw,
            RawResponse::ResponseOk(receipt) if receipt.transaction_hash == H256::from_low_u64_be(1)
        ));
    }

    #[tokio::test]
    async fn waits_until_the_order_is_terminal() {
        observe::initialize_reentrant("debug");
        let mut api = MockUntronApi::new();
        let mut sequence = mockall::Sequence::new();
        api.expect_order()
            .times(2)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(snapshot(OrderStatus::Open)));
        api.expect_order()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(snapshot(OrderStatus::Closed)));

        let settled = wait_for_order_settlement(&api, &order_id(), Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(settled.status, OrderStatus::Closed);
    }

    #[tokio::test]
    #[ignore]
    async fn real_api_info() {
        let api = DefaultUntronApi::default();
        let info = api.info().await.unwrap();
        println!("{info:?}");
    }
}
