//! オブザーバー付きの `reqwest::Client` ラッパー

use crate::common::error::{LogResult, ReqlogError};
use crate::config::HttpClientConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, Request, Response};
use std::sync::Arc;
use tracing::debug;

/// オブザーバーに渡される完了済みの呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRequest {
    /// 呼び出し先URL
    pub endpoint: String,
    /// HTTPメソッド（不明なら `None`）
    pub method: Option<String>,
    /// ステータスコード。レスポンス受信前に失敗した場合は `None`
    pub status: Option<u16>,
}

/// 外向き呼び出しが完了するたびに1回通知を受ける
#[async_trait]
pub trait RequestObserver: Send + Sync {
    /// 呼び出し完了後、呼び出し元に結果を返す前に呼ばれる
    async fn on_request_complete(&self, request: &CompletedRequest);
}

/// 呼び出しごとにオブザーバーへ通知するHTTPクライアント
#[derive(Clone, Default)]
pub struct ObservedClient {
    inner: Client,
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl ObservedClient {
    /// 既存のクライアントをラップする（オブザーバーなし）
    pub fn new(inner: Client) -> Self {
        Self {
            inner,
            observers: Vec::new(),
        }
    }

    /// 設定のタイムアウトでクライアントを作成
    pub fn from_config(config: &HttpClientConfig) -> LogResult<Self> {
        let inner = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReqlogError::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::new(inner))
    }

    /// オブザーバーを登録
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// 登録済みオブザーバー数
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// 組み立て済みのリクエストを実行
    ///
    /// 成否にかかわらずオブザーバーへ通知し、`reqwest` の結果はそのまま返す。
    pub async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        let endpoint = request.url().to_string();
        let method = request.method().as_str().to_string();

        let result = self.inner.execute(request).await;
        let status = match &result {
            Ok(response) => Some(response.status().as_u16()),
            Err(e) => {
                debug!(endpoint = %endpoint, error = %e, "Outgoing request failed");
                None
            }
        };

        self.notify(&CompletedRequest {
            endpoint,
            method: Some(method),
            status,
        })
        .await;

        result
    }

    /// ボディなしのリクエストを指定メソッドで送信
    pub async fn send(&self, method: Method, url: &str) -> reqwest::Result<Response> {
        match self.inner.request(method.clone(), url).build() {
            Ok(request) => self.execute(request).await,
            Err(e) => {
                // URLが不正で送信自体が行われていない
                debug!(endpoint = %url, error = %e, "Failed to build outgoing request");
                self.notify(&CompletedRequest {
                    endpoint: url.to_string(),
                    method: Some(method.as_str().to_string()),
                    status: None,
                })
                .await;
                Err(e)
            }
        }
    }

    /// `send(Method::GET, url)` の省略形
    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.send(Method::GET, url).await
    }

    async fn notify(&self, completed: &CompletedRequest) {
        for observer in &self.observers {
            observer.on_request_complete(completed).await;
        }
    }
}
