//! 設定ファイル `<home>/config.json` の読み込み（adapter 層）
//!
//! 例: `{"provider": "gemini", "model": "gemini-2.5-flash", "userLabel": "Ana"}`
//! ファイルが無ければ既定値。壊れていればエラーにする。

use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// gemini | endpoint | echo
    pub provider: Option<String>,
    pub model: Option<String>,
    /// endpoint プロバイダの URL
    pub endpoint: Option<String>,
    /// 公開時の作者ラベル
    pub user_label: Option<String>,
}

pub fn load_app_config(fs: &dyn FileSystem, home: &HomeDir) -> Result<AppConfig, Error> {
    let path = home.config_file();
    if !fs.is_file(&path) {
        return Ok(AppConfig::default());
    }
    let raw = fs.read_to_string(&path)?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::json(format!("Invalid config file {}: {}", path.display(), e)))
}
