use {
    crate::{hashed_eip712_message, DomainSeparator},
    anyhow::{Context as _, Result},
    primitive_types::{H160, H256},
    web3::{
        signing::{self, Key, SecretKeyRef},
        types::Recovery,
    },
};

/// An ECDSA signature split into the three fixed-width components the relay
/// submits on-chain.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct EcdsaSignature {
    pub r: H256,
    pub s: H256,
    pub v: u8,
}

impl EcdsaSignature {
    /// r + s + v
    pub fn to_bytes(self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(self.r.as_bytes());
        bytes[32..64].copy_from_slice(self.s.as_bytes());
        bytes[64] = self.v;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        Self {
            r: H256::from_slice(&bytes[..32]),
            s: H256::from_slice(&bytes[32..64]),
            v: bytes[64],
        }
    }

    /// Signs the EIP-712 message for the given struct hash.
    pub fn sign(domain: &DomainSeparator, struct_hash: &[u8; 32], key: SecretKeyRef) -> Self {
        let message = hashed_eip712_message(domain, struct_hash);
        // Unwrap because the only error is for invalid messages which we
        // don't create.
        let signature = key.sign(&message, None).unwrap();
        Self {
            r: signature.r,
            s: signature.s,
            v: signature.v as u8,
        }
    }

    /// Recovers the signer of the EIP-712 message for the given struct hash.
    pub fn recover(&self, domain: &DomainSeparator, struct_hash: &[u8; 32]) -> Result<H160> {
        let message = hashed_eip712_message(domain, struct_hash);
        let recovery = Recovery::new(message, self.v as u64, self.r, self.s);
        let (signature, recovery_id) = recovery
            .as_signature()
            .context("unexpectedly invalid signature")?;
        Ok(signing::recover(&message, &signature, recovery_id)?)
    }
}
