use ama_core::{Message, Result, TokenCounter};
use tiktoken_rs::{cl100k_base, CoreBPE};

/// gpt-3.5-turbo ChatML framing: every message costs 4 tokens of scaffolding
/// (`<im_start>{role}\n{content}<im_end>\n`) on top of its encoded role and
/// content, and every reply is primed with `<im_start>assistant` (2 tokens).
const PER_MESSAGE_OVERHEAD: usize = 4;
const REPLY_PRIMING: usize = 2;

pub struct ChatMlCounter {
    bpe: CoreBPE,
}

impl ChatMlCounter {
    pub fn new() -> Result<Self> {
        let bpe = cl100k_base()?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for ChatMlCounter {
    fn count(&self, messages: &[Message]) -> usize {
        let mut num_tokens = 0;
        for message in messages {
            num_tokens += PER_MESSAGE_OVERHEAD;
            num_tokens += self.bpe.encode_with_special_tokens(message.role.as_str()).len();
            num_tokens += self.bpe.encode_with_special_tokens(&message.content).len();
        }
        num_tokens + REPLY_PRIMING
    }
}
