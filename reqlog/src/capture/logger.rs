//! 完了した呼び出しを `api_request_logs` に書き込むオブザーバー

use super::client::{CompletedRequest, RequestObserver};
use crate::common::protocol::NewRequestLogEntry;
use crate::db::request_logs::RequestLogStorage;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{trace, warn};

/// リクエストロガー
///
/// 書き込みは呼び出し元に結果が返る前に完了する。失敗してもログを出すだけで、
/// 呼び出し元にはエラーを伝えない。
#[derive(Clone)]
pub struct RequestLogger {
    storage: Arc<RequestLogStorage>,
}

impl RequestLogger {
    /// 新しいロガーを作成
    pub fn new(storage: Arc<RequestLogStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestObserver for RequestLogger {
    async fn on_request_complete(&self, request: &CompletedRequest) {
        let entry = NewRequestLogEntry::from_call(
            sanitize_endpoint(&request.endpoint),
            request.method.as_deref(),
            request.status,
        );

        match self.storage.insert(&entry).await {
            Ok(id) => trace!(
                id,
                endpoint = %entry.endpoint,
                method = %entry.method,
                response = entry.response,
                "Recorded outgoing request"
            ),
            Err(e) => warn!(
                endpoint = %entry.endpoint,
                error = %e,
                "Failed to record outgoing request"
            ),
        }
    }
}

/// 記録前にURLを整える（前後の空白と制御文字を除去）
pub fn sanitize_endpoint(raw: &str) -> String {
    raw.trim().chars().filter(|c| !c.is_control()).collect()
}
