//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・ホスト環境の配色設定・API キーを環境変数から解決する。
//! usecase はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{HomeDir, Theme};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. INTELLIPROMPT_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/intelliprompt（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/intelliprompt
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// ホスト環境の light/dark 設定。判別できなければ None
    fn preferred_theme(&self) -> Option<Theme>;

    /// 生成サービスの API キー（GEMINI_API_KEY）
    fn api_key(&self) -> Option<String>;
}
