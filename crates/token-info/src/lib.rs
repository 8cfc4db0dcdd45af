//! Fetching of the ERC-20 metadata that parameterizes a token's EIP-712
//! domain: the contract's `name()` and `version()` strings.

use {
    async_trait::async_trait,
    mockall::automock,
    primitive_types::H160,
    std::{collections::HashMap, sync::Arc},
    tokio::sync::Mutex,
    web3::{
        ethabi::{self, ParamType},
        transports::Http,
        types::{Bytes, CallRequest},
        Web3,
    },
};

/// Selector of `name()`.
const NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];
/// Selector of `version()`.
const VERSION_SELECTOR: [u8; 4] = [0x54, 0xfd, 0x4d, 0x50];

/// The domain parameters of a token. Fields a node call failed to produce
/// are `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl TokenInfo {
    const DEFAULT_NAME: &'static str = "USD Coin";
    const DEFAULT_VERSION: &'static str = "2";

    /// The token's name, falling back to the canonical USDC value when the
    /// contract did not answer.
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }

    /// The token's version, falling back to the canonical USDC value when
    /// the contract did not answer.
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or(Self::DEFAULT_VERSION)
    }
}

#[automock]
#[async_trait]
pub trait TokenInfoFetching: Send + Sync {
    /// Retrieves the domain parameters for the token at the given address.
    async fn token_info(&self, token: H160) -> TokenInfo;
}

/// Fetches token metadata with `eth_call`s against an Ethereum compatible
/// node.
pub struct Web3TokenInfoFetcher {
    web3: Web3<Http>,
}

impl Web3TokenInfoFetcher {
    pub fn new(web3: Web3<Http>) -> Self {
        Self { web3 }
    }

    async fn call_string(&self, token: H160, selector: [u8; 4]) -> Option<String> {
        let request = CallRequest {
            to: Some(token),
            data: Some(Bytes(selector.to_vec())),
            ..Default::default()
        };
        let output = match self.web3.eth().call(request, None).await {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(?token, ?err, "token metadata call failed");
                return None;
            }
        };
        let mut tokens = match ethabi::decode(&[ParamType::String], &output.0) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::debug!(?token, ?err, "token metadata decoding failed");
                return None;
            }
        };
        tokens.pop().and_then(|token| token.into_string())
    }
}

#[async_trait]
impl TokenInfoFetching for Web3TokenInfoFetcher {
    async fn token_info(&self, token: H160) -> TokenInfo {
        TokenInfo {
            name: self.call_string(token, NAME_SELECTOR).await,
            version: self.call_string(token, VERSION_SELECTOR).await,
        }
    }
}

/// Caches the results of an inner fetcher. Tokens for which some calls
/// failed are not cached so that a transient node error does not pin the
/// fallback values forever.
pub struct CachedTokenInfoFetcher {
    inner: Arc<dyn TokenInfoFetching>,
    cache: Mutex<HashMap<H160, TokenInfo>>,
}

impl CachedTokenInfoFetcher {
    pub fn new(inner: Arc<dyn TokenInfoFetching>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TokenInfoFetching for CachedTokenInfoFetcher {
    async fn token_info(&self, token: H160) -> TokenInfo {
        let mut cache = self.cache.lock().await;
        if let Some(info) = cache.get(&token) {
            return info.clone();
        }
        let info = self.inner.token_info(token).await;
        if info.name.is_some() && info.version.is_some() {
            cache.insert(token, info.clone());
        }
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in_missing_fields() {
        let info = TokenInfo::default();
        assert_eq!(info.name_or_default(), "USD Coin");
        assert_eq!(info.version_or_default(), "2");

        let info = TokenInfo {
            name: Some("Bridged USDC".to_string()),
            version: None,
        };
        assert_eq!(info.name_or_default(), "Bridged USDC");
        assert_eq!(info.version_or_default(), "2");
    }

    #[tokio::test]
    async fn caches_complete_answers_only() {
        let complete = H160::from_low_u64_be(1);
        let partial = H160::from_low_u64_be(2);

        let mut inner = MockTokenInfoFetching::new();
        inner
            .expect_token_info()
            .withf(move |token| *token == complete)
            .times(1)
            .returning(|_| TokenInfo {
                name: Some("USD Coin".to_string()),
                version: Some("2".to_string()),
            });
        inner
            .expect_token_info()
            .withf(move |token| *token == partial)
            .times(2)
            .returning(|_| TokenInfo {
                name: Some("USD Coin".to_string()),
                version: None,
            });

        let cached = CachedTokenInfoFetcher::new(Arc::new(inner));
        for _ in 0..2 {
            let info = cached.token_info(complete).await;
            assert_eq!(info.name.as_deref(), Some("USD Coin"));
            assert_eq!(info.version.as_deref(), Some("2"));

            let info = cached.token_info(partial).await;
            assert_eq!(info.version, None);
        }
    }
}
