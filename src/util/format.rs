/// Display formatting for addresses and token ids

use crate::core::error::FormatError;
use crate::core::types::TokenId;

/// Shown wherever a token id cannot be formatted
pub const TOKEN_ID_PLACEHOLDER: &str = "0000";

const CARD_HEX_CHARS: usize = 16;

/// `0xa2e5ed...ff74` style shortening.
///
/// Addresses no longer than `leading + trailing` characters come back as-is.
pub fn truncate_address(address: &str, leading: usize, trailing: usize) -> String {
    let len = address.chars().count();
    if len <= leading + trailing {
        return address.to_string();
    }

    let head: String = address.chars().take(leading).collect();
    let tail: String = address.chars().skip(len - trailing).collect();
    format!("{}...{}", head, tail)
}

/// Short decimal id built from the last 16 bits of the token id.
///
/// Padded to at least four digits; values above 9999 keep all five.
pub fn derive_short_token_id(token_id: &TokenId) -> Result<String, FormatError> {
    let short_id = match token_id {
        TokenId::Bytes(bytes) => match bytes.as_slice() {
            [] => 0,
            [only] => u16::from(*only) * 256,
            [.., hi, lo] => u16::from(*hi) * 256 + u16::from(*lo),
        },
        TokenId::Hex(hex_str) => {
            let digits = strip_hex_prefix(hex_str);
            if digits.is_empty() {
                return Err(FormatError::EmptyHex);
            }
            if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(FormatError::InvalidHex(hex_str.clone()));
            }
            // all ASCII from here, byte slicing is safe
            let last = &digits[digits.len().saturating_sub(4)..];
            u16::from_str_radix(last, 16).map_err(|_| FormatError::InvalidHex(hex_str.clone()))?
        }
    };

    Ok(format!("{:04}", short_id))
}

/// Short id for display, falling back to the placeholder
pub fn display_token_id(token_id: Option<&TokenId>) -> String {
    token_id
        .and_then(|id| derive_short_token_id(id).ok())
        .unwrap_or_else(|| TOKEN_ID_PLACEHOLDER.to_string())
}

/// Leading hex characters of the token id, as shown on the passport card
pub fn token_id_hex_prefix(token_id: Option<&TokenId>) -> String {
    match token_id {
        Some(TokenId::Bytes(bytes)) => {
            let mut encoded = hex::encode(bytes);
            encoded.truncate(CARD_HEX_CHARS);
            encoded
        }
        Some(TokenId::Hex(hex_str)) => strip_hex_prefix(hex_str)
            .chars()
            .take(CARD_HEX_CHARS)
            .collect::<String>()
            .to_lowercase(),
        None => TOKEN_ID_PLACEHOLDER.to_string(),
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
