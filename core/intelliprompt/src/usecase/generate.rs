//! 生成フロー（generate / refine / 保存）
//!
//! 残り回数の確認と入力検証をしてから生成サービスを 1 回だけ呼ぶ。
//! 成功時のみ残り回数を 1 減らし、失敗時はメッセージをそのままエラー通知にする。

use crate::domain::SaveAs;
use common::domain::{Category, NewPrompt, NotificationKind, PromptId};
use common::error::Error;
use common::ports::outbound::{
    GenerateRequest, Log, LogLevel, LogRecord, PromptGenerator, RefineRequest,
};
use common::store::PromptStore;
use std::sync::Arc;

/// コンテキストとして添付されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub name: String,
    pub content: String,
}

pub struct GenerationDeps {
    pub generator: Arc<dyn PromptGenerator>,
    pub log: Arc<dyn Log>,
}

pub struct GenerationUseCase {
    deps: GenerationDeps,
}

impl GenerationUseCase {
    pub fn new(deps: GenerationDeps) -> Self {
        Self { deps }
    }

    pub fn generate(
        &self,
        store: &mut PromptStore,
        idea: &str,
        context: Option<&FileContext>,
    ) -> Result<String, Error> {
        ensure_credits(store)?;
        if idea.trim().is_empty() && context.is_none() {
            return Err(Error::invalid_argument(
                "Provide an idea or a context file to generate a prompt.",
            ));
        }
        let req = GenerateRequest {
            idea: idea.to_string(),
            file_context: context.map(|c| c.content.clone()),
        };
        self.call(store, "generate", |g| g.generate(&req))
    }

    pub fn refine(
        &self,
        store: &mut PromptStore,
        idea: &str,
        context: Option<&FileContext>,
        current_prompt: &str,
        feedback: &str,
    ) -> Result<String, Error> {
        ensure_credits(store)?;
        if current_prompt.trim().is_empty() {
            return Err(Error::invalid_argument("There is no generated prompt to refine."));
        }
        if feedback.trim().is_empty() {
            return Err(Error::invalid_argument("Refinement feedback is required."));
        }
        let req = RefineRequest {
            idea: idea.to_string(),
            file_context: context.map(|c| c.content.clone()),
            current_prompt: current_prompt.to_string(),
            feedback: feedback.to_string(),
        };
        self.call(store, "refine", |g| g.refine(&req))
    }

    /// 生成結果を個人ライブラリに保存する
    pub fn save(
        &self,
        store: &mut PromptStore,
        save: &SaveAs,
        idea: &str,
        context_name: Option<&str>,
        generated: &str,
    ) -> Result<PromptId, Error> {
        let category = check_save(save)?;
        if generated.trim().is_empty() {
            store.show_notification(
                "Please generate a valid prompt before saving.",
                NotificationKind::Error,
            );
            return Err(Error::validation("You must generate a valid prompt first."));
        }
        Ok(store.add_prompt(NewPrompt {
            title: save.title.trim().to_string(),
            description: saved_description(idea, context_name),
            content: generated.to_string(),
            category,
        }))
    }

    fn call<F>(&self, store: &mut PromptStore, op: &str, f: F) -> Result<String, Error>
    where
        F: FnOnce(&dyn PromptGenerator) -> Result<String, Error>,
    {
        let provider = self.deps.generator.name().to_string();
        let _ = self.deps.log.log(
            &LogRecord::new(LogLevel::Info, "generation started")
                .layer("usecase")
                .kind("generation")
                .field("op", op)
                .field("provider", provider.as_str()),
        );
        match f(self.deps.generator.as_ref()) {
            Ok(text) => {
                store.decrement_generations();
                let _ = self.deps.log.log(
                    &LogRecord::new(LogLevel::Info, "generation finished")
                        .layer("usecase")
                        .kind("generation")
                        .field("op", op)
                        .field("provider", provider.as_str())
                        .field("chars", text.chars().count())
                        .field("credits_left", store.credits()),
                );
                Ok(text)
            }
            Err(e) => {
                let _ = self.deps.log.log(
                    &LogRecord::new(LogLevel::Error, e.to_string())
                        .layer("usecase")
                        .kind("generation")
                        .field("op", op)
                        .field("provider", provider.as_str()),
                );
                store.show_notification(e.to_string(), NotificationKind::Error);
                Err(e)
            }
        }
    }
}

/// 保存先の title と category を確かめる。生成サービスを呼ぶ前にも使う
pub fn check_save(save: &SaveAs) -> Result<Category, Error> {
    if save.title.trim().is_empty() {
        return Err(Error::invalid_argument("The prompt title is required."));
    }
    save.category
        .ok_or_else(|| Error::invalid_argument("You must select a category."))
}

fn ensure_credits(store: &PromptStore) -> Result<(), Error> {
    if store.credits() == 0 {
        return Err(Error::usage_limit(
            "You have used all your free generations on this device.",
        ));
    }
    Ok(())
}

/// 保存時の説明文
pub fn saved_description(idea: &str, context_name: Option<&str>) -> String {
    let context = context_name
        .map(|n| format!("Context file: {}", n))
        .unwrap_or_default();
    format!("AI-generated prompt from the idea: \"{}\". {}", idea, context)
        .trim()
        .to_string()
}
