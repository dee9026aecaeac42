use crate::vocabulary::{TokenId, PAD_ID};

/// Sequence length the models were trained with.
pub const DEFAULT_MAX_LENGTH: usize = 500;

/// Fixes `tokens` to exactly `max_length` ids: the tail past `max_length` is
/// dropped and shorter sequences are padded with `<PAD>` at the end.
pub fn shape(mut tokens: Vec<TokenId>, max_length: usize) -> Vec<TokenId> {
    tokens.truncate(max_length);
    tokens.resize(max_length, PAD_ID);
    tokens
}
