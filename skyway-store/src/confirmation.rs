use rand::Rng;
use skyway_core::ConfirmationCodeGenerator;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_PREFIX: &str = "FL";
pub const CODE_BODY_LEN: usize = 8;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `FL` + 8 characters drawn uniformly from `[0-9A-Z]`.
///
/// 36^8 (about 2.8e12) codes per prefix; not meant to be unguessable.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    prefix: String,
}

impl RandomCodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl ConfirmationCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let mut code = String::with_capacity(self.prefix.len() + CODE_BODY_LEN);
        code.push_str(&self.prefix);
        for _ in 0..CODE_BODY_LEN {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            code.push(CODE_ALPHABET[idx] as char);
        }
        code
    }
}

/// Deterministic codes (`FL00000001`, `FL00000002`, ...) for tests and demos.
#[derive(Debug)]
pub struct SequenceCodeGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequenceCodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl ConfirmationCodeGenerator for SequenceCodeGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}{:0width$}", self.prefix, n, width = CODE_BODY_LEN)
    }
}
