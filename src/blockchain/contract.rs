//! Contract argument encoding for encrypted payloads.
//!
//! Ciphertexts are forwarded to the analytics contracts unchanged. Hashes
//! become `uint256`, classification tags become right-padded `bytes32`.

use alloy::primitives::{Bytes, B256, U256};
use alloy::sol;

use crate::encryption::types::{EncryptedInput, EncryptedSwapPayload, EncryptedTransactionPayload};
use crate::error::{ClientError, ClientResult};

sol! {
    /// Encrypted input as accepted by CoFHE-enabled contracts.
    #[derive(Debug, PartialEq, Eq)]
    struct EncryptedInputArgs {
        uint256 ctHash;
        uint8 securityZone;
        uint8 utype;
        bytes signature;
        bytes proof;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct SwapSubmission {
        EncryptedInputArgs encryptedAmountIn;
        EncryptedInputArgs encryptedFee;
        bytes32 destinationAsset;
        bytes32 platform;
        uint64 timestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct TransactionSubmission {
        EncryptedInputArgs encryptedAmount;
        EncryptedInputArgs encryptedFee;
        bytes32 transactionType;
        bytes32 poolType;
        bytes32 platform;
        uint64 timestamp;
    }
}

impl EncryptedInput {
    pub fn to_contract_input(&self) -> ClientResult<EncryptedInputArgs> {
        let hash: B256 = self
            .ct_hash
            .parse()
            .map_err(|e| ClientError::Validation(format!("Undecodable ciphertext hash: {}", e)))?;

        let security_zone = u8::try_from(self.security_zone)
            .map_err(|_| ClientError::Validation(format!("Security zone {} out of range", self.security_zone)))?;

        let signature = if self.signature.is_empty() {
            Bytes::new()
        } else {
            self.signature
                .parse::<Bytes>()
                .map_err(|e| ClientError::Validation(format!("Undecodable signature: {}", e)))?
        };

        Ok(EncryptedInputArgs {
            ctHash: U256::from_be_bytes(hash.0),
            securityZone: security_zone,
            utype: self.utype,
            signature,
            proof: Bytes::from(self.proof_data.clone()),
        })
    }
}

impl EncryptedSwapPayload {
    pub fn to_contract_input(&self) -> ClientResult<SwapSubmission> {
        Ok(SwapSubmission {
            encryptedAmountIn: self.encrypted_amount_in.to_contract_input()?,
            encryptedFee: self.encrypted_fee.to_contract_input()?,
            destinationAsset: tag_to_bytes32("destination_asset", &self.destination_asset)?,
            platform: tag_to_bytes32("platform", &self.platform)?,
            timestamp: self.timestamp,
        })
    }
}

impl EncryptedTransactionPayload {
    pub fn to_contract_input(&self) -> ClientResult<TransactionSubmission> {
        Ok(TransactionSubmission {
            encryptedAmount: self.encrypted_amount.to_contract_input()?,
            encryptedFee: self.encrypted_fee.to_contract_input()?,
            transactionType: tag_to_bytes32("transaction_type", self.transaction_type.as_str())?,
            poolType: tag_to_bytes32("pool_type", self.pool_type.as_str())?,
            platform: tag_to_bytes32("platform", &self.platform)?,
            timestamp: self.timestamp,
        })
    }
}

/// Right-pad a UTF-8 tag with zero bytes.
pub fn tag_to_bytes32(field: &str, tag: &str) -> ClientResult<B256> {
    let bytes = tag.as_bytes();
    if bytes.len() > 32 {
        return Err(ClientError::Validation(format!(
            "{} does not fit in bytes32 ({} bytes)",
            field,
            bytes.len()
        )));
    }

    let mut padded = [0u8; 32];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(B256::from(padded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::types::{PoolType, TransactionType};
    use alloy::sol_types::SolValue;

    fn input(hash_byte: &str) -> EncryptedInput {
        EncryptedInput {
            ct_hash: format!("0x{}", hash_byte.repeat(32)),
            security_zone: 2,
            utype: 5,
            signature: "0xdeadbeef".into(),
            proof_data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_input_conversion() {
        let args = input("01").to_contract_input().unwrap();
        assert_eq!(args.ctHash, U256::from_be_bytes([1u8; 32]));
        assert_eq!(args.securityZone, 2);
        assert_eq!(args.signature, Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(args.proof, Bytes::from(vec![1, 2, 3]));

        let decoded = EncryptedInputArgs::abi_decode(&args.abi_encode()).unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_unsigned_input_has_empty_signature() {
        let mut unsigned = input("ff");
        unsigned.signature.clear();
        assert!(unsigned.to_contract_input().unwrap().signature.is_empty());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut bad_hash = input("01");
        bad_hash.ct_hash = "0x1234".into();
        assert!(matches!(bad_hash.to_contract_input(), Err(ClientError::Validation(_))));

        let mut bad_zone = input("01");
        bad_zone.security_zone = 300;
        assert!(bad_zone.to_contract_input().is_err());
    }

    #[test]
    fn test_tags_are_right_padded() {
        let tag = tag_to_bytes32("platform", "zashi").unwrap();
        assert_eq!(&tag[..5], b"zashi");
        assert!(tag[5..].iter().all(|&b| b == 0));

        assert!(tag_to_bytes32("platform", &"x".repeat(33)).is_err());
    }

    #[test]
    fn test_transaction_submission() {
        let payload = EncryptedTransactionPayload {
            encrypted_amount: input("0a"),
            encrypted_fee: input("0b"),
            transaction_type: TransactionType::Deshield,
            pool_type: PoolType::Orchard,
            platform: "zashi".into(),
            timestamp: 1_700_000_000_000,
        };

        let submission = payload.to_contract_input().unwrap();
        assert_eq!(&submission.transactionType[..8], b"deshield");
        assert_eq!(&submission.poolType[..7], b"orchard");
        assert_eq!(submission.timestamp, 1_700_000_000_000);
        assert!(!submission.abi_encode().is_empty());
    }
}
