//! Ciphertext and payload types.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Policy domain a ciphertext is encrypted under.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityZone {
    #[default]
    Default = 0,
    SwapAnalytics = 1,
    TransactionAnalytics = 2,
    Sensitive = 3,
}

impl SecurityZone {
    pub fn value(self) -> u32 {
        self as u32
    }
}

/// Bit width tag carried by a ciphertext.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FheUintType {
    Uint8 = 2,
    Uint16 = 3,
    Uint32 = 4,
    Uint64 = 5,
    Uint128 = 6,
}

impl FheUintType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for FheUintType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(FheUintType::Uint8),
            3 => Ok(FheUintType::Uint16),
            4 => Ok(FheUintType::Uint32),
            5 => Ok(FheUintType::Uint64),
            6 => Ok(FheUintType::Uint128),
            other => Err(other),
        }
    }
}

/// Kind of shielded-pool transaction being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Send,
    Receive,
    Shield,
    Deshield,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Send => "send",
            TransactionType::Receive => "receive",
            TransactionType::Shield => "shield",
            TransactionType::Deshield => "deshield",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send" => Ok(TransactionType::Send),
            "receive" => Ok(TransactionType::Receive),
            "shield" => Ok(TransactionType::Shield),
            "deshield" => Ok(TransactionType::Deshield),
            other => Err(ClientError::Validation(format!(
                "unknown transaction type '{}' (expected send|receive|shield|deshield)",
                other
            ))),
        }
    }
}

/// Value pool a transaction touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    Transparent,
    Sapling,
    Orchard,
}

impl PoolType {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolType::Transparent => "transparent",
            PoolType::Sapling => "sapling",
            PoolType::Orchard => "orchard",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PoolType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transparent" => Ok(PoolType::Transparent),
            "sapling" => Ok(PoolType::Sapling),
            "orchard" => Ok(PoolType::Orchard),
            other => Err(ClientError::Validation(format!(
                "unknown pool type '{}' (expected transparent|sapling|orchard)",
                other
            ))),
        }
    }
}

/// One ciphertext produced by the engine, forwarded to the chain unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// `0x`-prefixed 32-byte hash identifying the ciphertext.
    pub ct_hash: String,
    pub security_zone: u32,
    /// Bit width tag, see [`FheUintType`].
    pub utype: u8,
    /// Verifier signature, hex. Empty until the verifier has signed.
    pub signature: String,
    pub proof_data: Vec<u8>,
}

impl EncryptedInput {
    pub fn uint_type(&self) -> Option<FheUintType> {
        FheUintType::try_from(self.utype).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSwapPayload {
    pub encrypted_amount_in: EncryptedInput,
    pub encrypted_fee: EncryptedInput,
    pub destination_asset: String,
    pub platform: String,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default = "now_millis")]
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedTransactionPayload {
    pub encrypted_amount: EncryptedInput,
    pub encrypted_fee: EncryptedInput,
    pub transaction_type: TransactionType,
    pub pool_type: PoolType,
    pub platform: String,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default = "now_millis")]
    pub timestamp: u64,
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
