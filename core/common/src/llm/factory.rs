//! 生成クライアントファクトリー
//!
//! 設定された種類に基づいて適切な PromptGenerator を作成します。

use crate::error::Error;
use crate::llm::{EchoGenerator, EndpointGenerator, GeminiGenerator};
use crate::ports::outbound::PromptGenerator;

/// 生成クライアントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Gemini API を直接呼ぶ
    Gemini,
    /// `{type, payload}` 形式のエンドポイント
    Endpoint,
    /// ネットワークを使わない
    Echo,
}

impl GeneratorKind {
    /// 文字列から種類を解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "endpoint" | "api" => Some(Self::Endpoint),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Endpoint => "endpoint",
            Self::Echo => "echo",
        }
    }
}

/// 生成クライアントの作成に必要な設定
#[derive(Debug, Clone, Default)]
pub struct GeneratorSettings {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint_url: Option<String>,
}

/// 種類と設定から PromptGenerator を作成する
pub fn create_generator(
    kind: GeneratorKind,
    settings: GeneratorSettings,
) -> Result<Box<dyn PromptGenerator>, Error> {
    match kind {
        GeneratorKind::Gemini => Ok(Box::new(GeminiGenerator::new(
            settings.model,
            settings.api_key,
        )?)),
        GeneratorKind::Endpoint => {
            let url = settings.endpoint_url.ok_or_else(|| {
                Error::env("The endpoint generator needs an endpoint URL (config.json \"endpoint\")")
            })?;
            Ok(Box::new(EndpointGenerator::new(url)))
        }
        GeneratorKind::Echo => Ok(Box::new(EchoGenerator::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(GeneratorKind::from_str("Gemini"), Some(GeneratorKind::Gemini));
        assert_eq!(GeneratorKind::from_str("api"), Some(GeneratorKind::Endpoint));
        assert_eq!(GeneratorKind::from_str("echo"), Some(GeneratorKind::Echo));
        assert_eq!(GeneratorKind::from_str("gpt"), None);
    }

    #[test]
    fn test_create_echo() {
        let gen = create_generator(GeneratorKind::Echo, GeneratorSettings::default()).unwrap();
        assert_eq!(gen.name(), "echo");
    }

    #[test]
    fn test_create_endpoint_requires_url() {
        let err = create_generator(GeneratorKind::Endpoint, GeneratorSettings::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("endpoint URL"));
    }

    #[test]
    fn test_create_gemini_requires_key() {
        assert!(create_generator(GeneratorKind::Gemini, GeneratorSettings::default()).is_err());
    }
}
