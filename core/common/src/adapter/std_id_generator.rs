//! PromptId を生成する IdGenerator の標準実装（Clock + シーケンス）
//!
//! 形式: base62(0-9,A-Z,a-z) 9文字（2020 年から約 1600 年分）。値 = (ms since 2020-01-01)<<8 | seq(0..255)。
//! 辞書順＝生成順になり、同一 ms 内でも単調増加する。

use crate::domain::PromptId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const EPOCH_MS: u64 = 1577836800000; // 2020-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 8;
const SEQ_MASK: u64 = (1 << SEQ_BITS) - 1; // 0..255
const BASE: u64 = 62;
const WIDTH: usize = 9;
const MAX_VAL: u64 = BASE.pow(WIDTH as u32) - 1;

/// 0-9, A-Z, a-z の順で辞書順＝数値順になるbase62
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + シーケンスで PromptId を生成する標準実装
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> PromptId {
        let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
        let base = (ms_rel << SEQ_BITS).min(MAX_VAL);

        loop {
            let prev = self.last.load(Ordering::SeqCst);
            // 同一 ms（または時計の巻き戻り）ではシーケンスを進める。seq 枯渇時は次の値へ繰り上げる
            let next = if (prev >> SEQ_BITS) < ms_rel {
                base
            } else {
                (prev + 1).min(MAX_VAL)
            };
            if self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return PromptId::new(to_base62(next));
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [0u8; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}
