//! 管理API用の認証ミドルウェア

use super::error::AppError;
use crate::common::error::ReqlogError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

/// 管理トークンが設定されている場合に `Authorization: Bearer <token>` を要求する
///
/// トークン未設定時は全リクエストを通す。
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let token_matches = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| tokens_match(token, expected));

    match token_matches {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            tracing::warn!(path = %request.uri().path(), "Rejected admin request with invalid token");
            Err(ReqlogError::Authentication("Invalid admin token".to_string()).into())
        }
        None => Err(ReqlogError::Authentication("Missing Authorization header".to_string()).into()),
    }
}

/// SHA-256ダイジェスト同士を比較し、比較時間が入力内容や長さに依存しないようにする
fn tokens_match(provided: &str, expected: &str) -> bool {
    let provided = sha256(provided);
    let expected = sha256(expected);
    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn sha256(input: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher.finalize().to_vec()
}
