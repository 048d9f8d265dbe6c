//! Echo 生成クライアント
//!
//! 実際の生成 API は呼ばず、リクエストから決定的なプロンプトを組み立てて返す。
//! オフラインでの動作確認やテストに使用する。

use crate::error::Error;
use crate::ports::outbound::{GenerateRequest, PromptGenerator, RefineRequest};

#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

impl EchoGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl PromptGenerator for EchoGenerator {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(&self, req: &GenerateRequest) -> Result<String, Error> {
        let mut out = String::from("Act as an expert assistant.\n\n");
        out.push_str(&format!("Task: {}\n", req.idea.trim()));
        if let Some(ctx) = req.file_context.as_deref() {
            out.push_str(&format!("\nReference material:\n\"\"\"\n{}\n\"\"\"\n", ctx));
        }
        out.push_str("\nOutput format: a clear, structured answer.");
        Ok(out)
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, Error> {
        Ok(format!(
            "{}\n\nRevision notes: {}",
            req.current_prompt.trim_end(),
            req.feedback.trim()
        ))
    }
}
