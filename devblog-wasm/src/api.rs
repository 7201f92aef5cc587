use async_trait::async_trait;
use devblog_core::loader::PostSource;
use devblog_core::{BlogConfig, LoadError};
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

/// Fetches the posts document over HTTP, giving up after `timeout_ms`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout_ms: u64,
}

impl HttpSource {
    pub fn new(config: &BlogConfig) -> Self {
        Self {
            url: config.data_url.clone(),
            timeout_ms: config.fetch_timeout_ms,
        }
    }

    async fn request(&self) -> Result<String, LoadError> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(LoadError::Http(response.status()));
        }

        // Берём тело как текст, чтобы в логе была видна исходная JSON-строка
        response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("Failed to read response: {}", e)))
    }
}

#[async_trait(?Send)]
impl PostSource for HttpSource {
    async fn fetch_text(&self) -> Result<String, LoadError> {
        let millis = u32::try_from(self.timeout_ms).unwrap_or(u32::MAX);
        let request = Box::pin(self.request());
        let timeout = Box::pin(TimeoutFuture::new(millis));

        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(LoadError::Timeout(self.timeout_ms)),
        }
    }
}
