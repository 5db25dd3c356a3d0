use crate::error::{Error, Result};
use crate::models::HotToken;
use std::fmt;

const MIN_ADDRESS_LEN: usize = 32;
const MAX_ADDRESS_LEN: usize = 44;
const MAX_SYMBOL_LEN: usize = 20;

/// What the user asked about: a ticker symbol or a Solana mint address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenIdentifier {
    /// Stored upper-cased, without the leading `$`.
    Symbol(String),
    Address(String),
}

impl TokenIdentifier {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Some(symbol) = trimmed.strip_prefix('$') {
            return Self::symbol(symbol);
        }
        if is_base58_address(trimmed) {
            return Ok(TokenIdentifier::Address(trimmed.to_string()));
        }
        Self::symbol(trimmed)
    }

    fn symbol(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::InvalidInput(
                "I need a token symbol (e.g., $BONK) or Solana address to analyze.".to_string(),
            ));
        }
        if raw.len() > MAX_SYMBOL_LEN || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidInput(format!(
                "'{}' is neither a token symbol nor a Solana address",
                raw
            )));
        }
        Ok(TokenIdentifier::Symbol(raw.to_ascii_uppercase()))
    }

    /// The bare symbol or address.
    pub fn as_str(&self) -> &str {
        match self {
            TokenIdentifier::Symbol(value) | TokenIdentifier::Address(value) => value,
        }
    }

    pub fn matches(&self, token: &HotToken) -> bool {
        match self {
            TokenIdentifier::Symbol(symbol) => token.symbol.eq_ignore_ascii_case(symbol),
            TokenIdentifier::Address(address) => token.token_address == *address,
        }
    }
}

impl fmt::Display for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenIdentifier::Symbol(symbol) => write!(f, "${}", symbol),
            TokenIdentifier::Address(address) => f.write_str(address),
        }
    }
}

/// First token in `tokens` the identifier refers to.
pub fn find_token<'a>(tokens: &'a [HotToken], id: &TokenIdentifier) -> Option<&'a HotToken> {
    tokens.iter().find(|token| id.matches(token))
}

/// Like [`find_token`], but absence is an [`Error::TokenNotFound`].
pub fn require_token<'a>(tokens: &'a [HotToken], id: &TokenIdentifier) -> Result<&'a HotToken> {
    find_token(tokens, id).ok_or_else(|| Error::TokenNotFound(id.to_string()))
}

fn is_base58_address(candidate: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&candidate.len())
        && candidate.chars().all(is_base58_char)
}

fn is_base58_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}
