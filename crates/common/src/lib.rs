use thiserror::Error;

pub mod types;
pub mod utils;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

pub mod say {
    //! Client for the external "say" cloud function.

    use std::time::Duration;

    use reqwest::{Client, Url};
    use tracing::debug;

    use super::*;

    #[derive(Clone, Debug)]
    pub struct SayClient {
        http: Client,
        function_url: Url,
    }

    impl SayClient {
        pub fn new(function_url: &str, timeout: Duration) -> Result<Self, CoreError> {
            let function_url =
                Url::parse(function_url).map_err(|e| CoreError::Parse(e.to_string()))?;
            let http = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| CoreError::Network(e.to_string()))?;
            Ok(Self { http, function_url })
        }

        pub fn function_url(&self) -> &Url {
            &self.function_url
        }

        /// Full upstream URL for a keyword, with the keyword percent-encoded.
        pub fn url_for(&self, keyword: &str) -> Url {
            let mut url = self.function_url.clone();
            url.query_pairs_mut().clear().append_pair("keyword", keyword);
            url
        }

        /// Call the function and return its JSON body untouched.
        pub async fn say(&self, keyword: &str) -> Result<serde_json::Value, CoreError> {
            let url = self.url_for(keyword);
            debug!(%url, "calling say function");
            let resp = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| CoreError::Network(e.to_string()))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(CoreError::Status(status.as_u16()));
            }
            let json = resp
                .json::<serde_json::Value>()
                .await
                .map_err(|e| CoreError::Parse(e.to_string()))?;
            Ok(json)
        }
    }
}
