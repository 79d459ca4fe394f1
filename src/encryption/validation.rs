//! Input and output checks for encryption operations.
//!
//! Inputs are checked before the engine is invoked. Outputs are checked
//! before a ciphertext leaves the client; a malformed ciphertext is a
//! validation error even when the engine reported success.

use alloy::primitives::Address;

use crate::config::LimitsConfig;
use crate::encryption::types::{EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload, FheUintType};
use crate::error::{ClientError, ClientResult};

/// Length of a `0x`-prefixed 32-byte hash.
const CT_HASH_LEN: usize = 66;

/// Parse the account as a 20-byte hex address.
pub fn validate_account(account: &str) -> ClientResult<Address> {
    account
        .parse::<Address>()
        .map_err(|e| ClientError::Validation(format!("Invalid account address '{}': {}", account, e)))
}

/// Reject blank tags and tags longer than `max_len` bytes.
pub fn validate_tag(field: &str, value: &str, max_len: usize) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{} must not be blank", field)));
    }
    if value.len() > max_len {
        return Err(ClientError::Validation(format!(
            "{} exceeds {} bytes ({} bytes)",
            field,
            max_len,
            value.len()
        )));
    }
    Ok(())
}

/// Check one ciphertext. Returns the first violation as a plain message.
pub fn validate_encrypted_input(input: &EncryptedInput, limits: &LimitsConfig) -> Result<(), String> {
    if input.proof_data.len() > limits.max_proof_bytes {
        return Err(format!(
            "Proof data exceeds maximum size ({} > {} bytes)",
            input.proof_data.len(),
            limits.max_proof_bytes
        ));
    }
    if input.proof_data.is_empty() {
        return Err("Proof data is empty".to_string());
    }

    let hash = input.ct_hash.as_str();
    if hash.trim().is_empty() {
        return Err("Invalid ciphertext hash".to_string());
    }
    let well_formed = hash.len() == CT_HASH_LEN
        && hash.starts_with("0x")
        && hash[2..].bytes().all(|b| b.is_ascii_hexdigit());
    if !well_formed {
        return Err(format!("Malformed ciphertext hash '{}'", hash));
    }

    if FheUintType::try_from(input.utype).is_err() {
        return Err(format!("Unsupported uint type {}", input.utype));
    }

    Ok(())
}

pub fn validate_value_output(input: &EncryptedInput, limits: &LimitsConfig) -> ClientResult<()> {
    validate_encrypted_input(input, limits).map_err(ClientError::Validation)
}

pub fn validate_swap_payload(payload: &EncryptedSwapPayload, limits: &LimitsConfig) -> ClientResult<()> {
    validate_encrypted_input(&payload.encrypted_amount_in, limits)
        .map_err(|e| ClientError::Validation(format!("Amount: {}", e)))?;
    validate_encrypted_input(&payload.encrypted_fee, limits)
        .map_err(|e| ClientError::Validation(format!("Fee: {}", e)))
}

pub fn validate_transaction_payload(
    payload: &EncryptedTransactionPayload,
    limits: &LimitsConfig,
) -> ClientResult<()> {
    validate_encrypted_input(&payload.encrypted_amount, limits)
        .map_err(|e| ClientError::Validation(format!("Amount: {}", e)))?;
    validate_encrypted_input(&payload.encrypted_fee, limits)
        .map_err(|e| ClientError::Validation(format!("Fee: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EncryptedInput {
        EncryptedInput {
            ct_hash: format!("0x{}", "ab".repeat(32)),
            security_zone: 1,
            utype: 5,
            signature: String::new(),
            proof_data: vec![7; 64],
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_encrypted_input(&input(), &LimitsConfig::default()).is_ok());
    }

    #[test]
    fn test_oversized_proof() {
        let limits = LimitsConfig {
            max_proof_bytes: 16,
            ..Default::default()
        };
        let mut oversized = input();
        oversized.proof_data = vec![0; 17];

        let err = validate_encrypted_input(&oversized, &limits).unwrap_err();
        assert!(err.starts_with("Proof data exceeds maximum size"));

        oversized.proof_data.truncate(16);
        assert!(validate_encrypted_input(&oversized, &limits).is_ok());
    }

    #[test]
    fn test_hash_checks() {
        let limits = LimitsConfig::default();

        let mut blank = input();
        blank.ct_hash = "   ".into();
        assert_eq!(validate_encrypted_input(&blank, &limits).unwrap_err(), "Invalid ciphertext hash");

        for bad in [
            "ab".repeat(33),
            format!("0x{}", "ab".repeat(31)),
            format!("0x{}", "zz".repeat(32)),
            format!("  0x{}\n", "ab".repeat(32)),
            format!("0x{} ", "ab".repeat(32)),
        ] {
            let mut malformed = input();
            malformed.ct_hash = bad;
            let err = validate_encrypted_input(&malformed, &limits).unwrap_err();
            assert!(err.starts_with("Malformed ciphertext hash"), "{}", err);
        }
    }

    #[test]
    fn test_uint_type_range() {
        let mut unknown = input();
        unknown.utype = 9;
        let err = validate_encrypted_input(&unknown, &LimitsConfig::default()).unwrap_err();
        assert_eq!(err, "Unsupported uint type 9");
    }

    #[test]
    fn test_payload_errors_name_the_field() {
        let mut fee = input();
        fee.proof_data.clear();
        let payload = EncryptedSwapPayload {
            encrypted_amount_in: input(),
            encrypted_fee: fee,
            destination_asset: "ETH".into(),
            platform: "uniswap".into(),
            timestamp: 0,
        };

        let err = validate_swap_payload(&payload, &LimitsConfig::default()).unwrap_err();
        assert_eq!(err, ClientError::Validation("Fee: Proof data is empty".into()));
    }

    #[test]
    fn test_tags_and_accounts() {
        assert!(validate_tag("destination_asset", "ETH", 32).is_ok());
        assert!(validate_tag("platform", &"p".repeat(32), 32).is_ok());
        assert!(validate_tag("platform", &"p".repeat(33), 32).is_err());
        assert!(validate_tag("platform", "", 32).is_err());
        assert_eq!(
            validate_tag("destination_asset", "   ", 32),
            Err(ClientError::Validation("destination_asset must not be blank".into()))
        );

        assert!(validate_account("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").is_ok());
        assert!(matches!(validate_account("not-an-address"), Err(ClientError::Validation(_))));
    }
}
