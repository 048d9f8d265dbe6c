//! リモート生成サービスのクライアント実装
//!
//! いずれも `ports::outbound::PromptGenerator` を実装する。
//! - gemini: Gemini generateContent API を直接呼ぶ
//! - endpoint: `{type, payload}` → `{text}` 形式のサーバーレス関数を呼ぶ
//! - echo: ネットワークを使わず決定的なプロンプトを返す

pub mod echo;
pub mod endpoint;
pub mod factory;
pub mod gemini;
pub mod instructions;

pub use echo::EchoGenerator;
pub use endpoint::EndpointGenerator;
pub use factory::{create_generator, GeneratorKind, GeneratorSettings};
pub use gemini::GeminiGenerator;

use crate::error::Error;

/// 生成失敗をユーザー向けメッセージに包む（呼び出し元はこれをそのまま表示する）
pub(crate) fn wrap_failure(err: Error) -> Error {
    let detail = err.to_string();
    let msg = format!("Could not reach the AI assistant. Details: {}", detail);
    match err {
        Error::Json(_) => Error::json(msg),
        Error::Env(_) => Error::env(msg),
        _ => Error::http(msg),
    }
}
