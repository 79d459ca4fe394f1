//! Well-known CoFHE deployments.

use std::fmt;
use std::str::FromStr;

use crate::config::schema::NetworkConfig;

/// Predefined network environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEnvironment {
    /// Ethereum Sepolia.
    Testnet,
    /// Arbitrum Sepolia.
    ArbitrumSepolia,
    /// Ethereum mainnet.
    Mainnet,
}

impl NetworkEnvironment {
    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkEnvironment::Testnet => 11_155_111,
            NetworkEnvironment::ArbitrumSepolia => 421_614,
            NetworkEnvironment::Mainnet => 1,
        }
    }

    /// Build the network configuration for this environment.
    pub fn config(&self) -> NetworkConfig {
        let (cofhe, verifier, threshold) = match self {
            NetworkEnvironment::Testnet | NetworkEnvironment::ArbitrumSepolia => (
                "https://testnet-cofhe.fhenix.zone",
                "https://testnet-cofhe-vrf.fhenix.zone",
                "https://testnet-cofhe-tn.fhenix.zone",
            ),
            NetworkEnvironment::Mainnet => (
                "https://cofhe.fhenix.zone",
                "https://cofhe-vrf.fhenix.zone",
                "https://cofhe-tn.fhenix.zone",
            ),
        };

        NetworkConfig {
            chain_id: self.chain_id(),
            cofhe_url: cofhe.to_string(),
            verifier_url: verifier.to_string(),
            threshold_network_url: threshold.to_string(),
        }
    }
}

impl fmt::Display for NetworkEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkEnvironment::Testnet => "testnet",
            NetworkEnvironment::ArbitrumSepolia => "arbitrum-sepolia",
            NetworkEnvironment::Mainnet => "mainnet",
        };
        f.write_str(name)
    }
}

impl FromStr for NetworkEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testnet" | "sepolia" => Ok(NetworkEnvironment::Testnet),
            "arbitrum-sepolia" => Ok(NetworkEnvironment::ArbitrumSepolia),
            "mainnet" => Ok(NetworkEnvironment::Mainnet),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}
