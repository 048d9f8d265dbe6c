//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{HomeDir, Theme};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Ok(home) = env::var("INTELLIPROMPT_HOME") {
            if !home.is_empty() {
                return Ok(HomeDir::new(PathBuf::from(home)));
            }
        }

        let config_base = env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .filter(|s| !s.is_empty())
                    .map(|h| PathBuf::from(h).join(".config"))
            })
            .ok_or_else(|| Error::env("HOME is not set"))?;

        let mut path = config_base;
        path.push("intelliprompt");
        Ok(HomeDir::new(path))
    }

    fn preferred_theme(&self) -> Option<Theme> {
        // 明示指定 > 端末の COLORFGBG
        if let Some(t) = env::var("INTELLIPROMPT_COLOR_SCHEME")
            .ok()
            .and_then(|s| Theme::parse(&s.to_lowercase()))
        {
            return Some(t);
        }
        env::var("COLORFGBG")
            .ok()
            .and_then(|s| theme_from_colorfgbg(&s))
    }

    fn api_key(&self) -> Option<String> {
        env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty())
    }
}

/// COLORFGBG（"fg;bg" または "fg;default;bg"）の背景色番号から light/dark を推定する。
/// 背景が 0-6 または 8 なら dark。
pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}
