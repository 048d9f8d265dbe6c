//! 削除前の確認の実装（CLI 境界）
//!
//! stdin/stderr を用いた対話は adapter 層の責務。

use common::error::Error;
use common::ports::outbound::{Approval, Confirmation};
use std::io::{self, BufRead, Write};

/// stdin から y/yes を読んだときだけ承認する
pub struct CliConfirmation;

impl CliConfirmation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation for CliConfirmation {
    fn confirm(&self, message: &str) -> Result<Approval, Error> {
        eprint!("{} [y/N]: ", message);
        let _ = io::stderr().flush();
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(Error::io_msg("No input available for confirmation."));
        }
        Ok(parse_answer(&line))
    }
}

fn parse_answer(line: &str) -> Approval {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Approval::Approved,
        _ => Approval::Denied,
    }
}

/// --yes: 常に承認
pub struct AssumeYesConfirmation;

impl Confirmation for AssumeYesConfirmation {
    fn confirm(&self, _message: &str) -> Result<Approval, Error> {
        Ok(Approval::Approved)
    }
}

/// --no-interactive: 常に拒否（CI 等でプロンプトを出さない）
pub struct NonInteractiveConfirmation;

impl Confirmation for NonInteractiveConfirmation {
    fn confirm(&self, _message: &str) -> Result<Approval, Error> {
        Ok(Approval::Denied)
    }
}
