//! `{type, payload}` → `{text}` 形式の生成エンドポイントを呼ぶクライアント
//!
//! サーバー側が Gemini 呼び出しを肩代わりする構成用。API キーはクライアントに置かない。

use crate::error::Error;
use crate::llm::wrap_failure;
use crate::ports::outbound::{GenerateRequest, PromptGenerator, RefineRequest};
use serde_json::{json, Value};

/// 生成エンドポイントクライアント
pub struct EndpointGenerator {
    url: String,
}

impl EndpointGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// リクエストボディ `{"type": ..., "payload": {...}}` を組み立てる
    pub fn make_request_body(kind: &str, payload: Value) -> Value {
        json!({ "type": kind, "payload": payload })
    }

    /// レスポンスを解釈する。失敗ステータスなら `error` フィールド、無ければステータス行をメッセージにする
    pub fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<String, Error> {
        let data: Value = serde_json::from_str(body)
            .map_err(|e| Error::json(format!("Malformed response from generation endpoint: {}", e)))?;

        if !status.is_success() {
            let msg = data["error"]
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("Server error: {}", status));
            return Err(Error::http(msg));
        }

        match data["text"].as_str() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(Error::http("The API response did not contain text.")),
        }
    }

    fn call(&self, kind: &str, payload: Value) -> Result<String, Error> {
        let body = Self::make_request_body(kind, payload);
        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;
        Self::parse_response(status, &text)
    }
}

impl PromptGenerator for EndpointGenerator {
    fn name(&self) -> &str {
        "endpoint"
    }

    fn generate(&self, req: &GenerateRequest) -> Result<String, Error> {
        let payload = json!({
            "idea": req.idea,
            "fileContext": req.file_context,
        });
        self.call("generate", payload).map_err(wrap_failure)
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, Error> {
        let payload = json!({
            "idea": req.idea,
            "fileContext": req.file_context,
            "currentPrompt": req.current_prompt,
            "feedback": req.feedback,
        });
        self.call("refine", payload).map_err(wrap_failure)
    }
}
