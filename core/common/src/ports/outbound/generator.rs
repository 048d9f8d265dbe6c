//! リモート生成サービス Outbound ポート
//!
//! generate: アイデア（+ ファイルコンテキスト）からエンジニアリング済みプロンプトを生成する。
//! refine: 生成済みプロンプトをフィードバックで改訂する。
//! いずれも 1 リクエスト 1 レスポンスで、自動リトライはしない。

use crate::error::Error;

/// generate のリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub idea: String,
    pub file_context: Option<String>,
}

/// refine のリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineRequest {
    pub idea: String,
    pub file_context: Option<String>,
    pub current_prompt: String,
    pub feedback: String,
}

/// 生成サービスの抽象（Outbound ポート）
///
/// 実装は `common::llm::GeminiGenerator` や `EchoGenerator`。
/// レスポンスが壊れている・テキストが無い・HTTP ステータスが失敗の場合は説明付きの Err を返す。
pub trait PromptGenerator: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    fn generate(&self, req: &GenerateRequest) -> Result<String, Error>;

    fn refine(&self, req: &RefineRequest) -> Result<String, Error>;
}
