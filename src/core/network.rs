//! Network identifiers reported by the provider.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "mina:mainnet")]
    Mainnet,
    #[serde(rename = "mina:devnet")]
    Devnet,
    #[serde(rename = "mina:berkeley")]
    Berkeley,
    #[serde(rename = "zeko:testnet")]
    ZekoTestnet,
}

impl Network {
    pub const ALL: &'static [Network] = &[
        Network::Mainnet,
        Network::Devnet,
        Network::Berkeley,
        Network::ZekoTestnet,
    ];

    /// The tag as the provider reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mina:mainnet",
            Network::Devnet => "mina:devnet",
            Network::Berkeley => "mina:berkeley",
            Network::ZekoTestnet => "zeko:testnet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Devnet => "Devnet",
            Network::Berkeley => "Berkeley",
            Network::ZekoTestnet => "Zeko Testnet",
        }
    }

    /// Membership check only. Unknown tags are `None`, not an error.
    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.as_str() == value.trim())
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_roundtrips_known_tags() {
        for network in Network::ALL {
            assert_eq!(Network::from_id(network.as_str()), Some(*network));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(Network::from_id("mina:testworld2"), None);
        assert_eq!(Network::from_id(""), None);
    }

    #[test]
    fn test_serde_uses_provider_tag() {
        let json = serde_json::to_string(&Network::Devnet).unwrap();
        assert_eq!(json, "\"mina:devnet\"");
    }
}
