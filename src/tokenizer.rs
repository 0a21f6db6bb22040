//! Shared BPE token counter.
//!
//! Counts are an estimate for cost and efficiency figures, not billing data,
//! so a failed encoding lookup degrades instead of failing the analysis.

use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;
use tracing::warn;

/// Model whose registered encoding is preferred for counting
pub const PREFERRED_MODEL: &str = "gpt-4";

/// Average characters per token used when no encoding can be loaded
const APPROX_CHARS_PER_TOKEN: usize = 4;

enum Encoding {
    Bpe { bpe: CoreBPE, name: &'static str },
    Approximate,
}

/// Token counter backed by a BPE vocabulary
pub struct TokenCounter {
    encoding: Encoding,
}

impl TokenCounter {
    /// Load the preferred encoding, falling back to `cl100k_base` and then to
    /// a character approximation.
    pub fn load() -> Self {
        match tiktoken_rs::get_bpe_from_model(PREFERRED_MODEL) {
            Ok(bpe) => {
                return Self {
                    encoding: Encoding::Bpe {
                        bpe,
                        name: PREFERRED_MODEL,
                    },
                }
            }
            Err(e) => warn!(
                "Encoding for {} unavailable: {}. Falling back to cl100k_base.",
                PREFERRED_MODEL, e
            ),
        }

        match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Self {
                encoding: Encoding::Bpe {
                    bpe,
                    name: "cl100k_base",
                },
            },
            Err(e) => {
                warn!(
                    "cl100k_base unavailable: {}. Using character approximation.",
                    e
                );
                Self::approximate()
            }
        }
    }

    /// Counter that estimates one token per four characters
    pub fn approximate() -> Self {
        Self {
            encoding: Encoding::Approximate,
        }
    }

    /// Number of tokens in `text`
    pub fn count(&self, text: &str) -> usize {
        match &self.encoding {
            Encoding::Bpe { bpe, .. } => bpe.encode_ordinary(text).len(),
            Encoding::Approximate => text.chars().count().div_ceil(APPROX_CHARS_PER_TOKEN),
        }
    }

    pub fn encoding_name(&self) -> &'static str {
        match &self.encoding {
            Encoding::Bpe { name, .. } => name,
            Encoding::Approximate => "approximate",
        }
    }
}

/// Process-wide counter, loaded on first use
pub fn shared() -> &'static TokenCounter {
    static COUNTER: OnceLock<TokenCounter> = OnceLock::new();
    COUNTER.get_or_init(TokenCounter::load)
}
