//! Gemini generateContent API を直接呼ぶ生成クライアント

use crate::error::Error;
use crate::llm::instructions::{
    generate_user_content, refine_user_content, GENERATE_SYSTEM_INSTRUCTION,
    REFINE_SYSTEM_INSTRUCTION,
};
use crate::llm::wrap_failure;
use crate::ports::outbound::{GenerateRequest, PromptGenerator, RefineRequest};
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 生成クライアント
pub struct GeminiGenerator {
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiGenerator {
    /// 新しい Gemini クライアントを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-2.5-flash"）
    /// * `api_key` - API キー（None の場合はエラー）
    pub fn new(model: Option<String>, api_key: Option<String>) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_key = api_key.ok_or_else(|| {
            Error::env("The AI client is not configured: GEMINI_API_KEY environment variable is not set")
        })?;
        Ok(Self {
            model,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// API のベース URL を差し替える（プロキシ・テスト用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// リクエストペイロードを生成
    pub fn make_request_payload(&self, system_instruction: &str, user_content: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{"text": system_instruction}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": user_content}]
            }]
        })
    }

    fn make_http_request(&self, payload: &Value) -> Result<String, Error> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text));
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    /// レスポンスからテキストを抽出（全 text part を連結）。テキストが無ければ Err
    pub fn parse_response_text(response_json: &str) -> Result<String, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text: String = v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::http("The AI did not return a valid text response."));
        }
        Ok(text)
    }

    fn call(&self, system_instruction: &str, user_content: &str) -> Result<String, Error> {
        let payload = self.make_request_payload(system_instruction, user_content);
        let body = self.make_http_request(&payload)?;
        Self::parse_response_text(&body)
    }
}

impl PromptGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, req: &GenerateRequest) -> Result<String, Error> {
        self.call(GENERATE_SYSTEM_INSTRUCTION, &generate_user_content(req))
            .map_err(wrap_failure)
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, Error> {
        self.call(REFINE_SYSTEM_INSTRUCTION, &refine_user_content(req))
            .map_err(wrap_failure)
    }
}
