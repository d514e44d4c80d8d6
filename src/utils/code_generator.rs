//! Short code generation.
//!
//! Codes are 7 characters from the URL-safe base64 alphabet
//! (`A-Z a-z 0-9 - _`), drawn from the operating system CSPRNG. With 64^7
//! possible codes a single draw is collision-resistant, but callers still
//! retry on collision since uniqueness is enforced by the store.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 7;

/// Random bytes drawn per code. 6 bytes encode to 8 base64 characters, each
/// carrying 6 uniform bits, of which the first [`CODE_LENGTH`] are kept.
const CODE_RANDOM_BYTES: usize = 6;

/// Words used as API path segments. Never issued as codes: `/shorten` and
/// `/health` would shadow the redirect, and the others read as API paths.
pub const RESERVED_CODES: &[&str] = &["shorten", "analytics", "expire", "health"];

/// Source of candidate short codes.
///
/// Implementations are pure generators and never touch storage; the caller
/// checks uniqueness and invokes [`CodeGenerator::generate`] again on collision.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a new candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no code can be produced.
    fn generate(&self) -> Result<String, AppError>;
}

/// Default generator backed by [`generate_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        generate_code()
    }
}

/// Generates a random 7-character URL-safe short code.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_RANDOM_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(CODE_LENGTH);

    Ok(code)
}

/// Returns true if `code` collides with a routed path segment.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code().unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        for _ in 0..100 {
            let code = generate_code().unwrap();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_no_padding() {
        let code = generate_code().unwrap();
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code().unwrap()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_random_generator_delegates() {
        let code = RandomCodeGenerator.generate().unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(is_reserved_code(reserved), "{reserved} should be reserved");
        }
        assert!(!is_reserved_code("abc1234"));
        assert!(!is_reserved_code("Shorten"));
    }
}
