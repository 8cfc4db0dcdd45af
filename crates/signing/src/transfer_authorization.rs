use {
    crate::{DomainSeparator, EcdsaSignature},
    anyhow::Result,
    lazy_static::lazy_static,
    primitive_types::{H160, H256, U256},
    web3::signing::{self, SecretKeyRef},
};

/// The ERC-3009 `TransferWithAuthorization` struct.
///
/// The holder signs this off-chain; anyone may then submit the transfer
/// on-chain within the `[valid_after, valid_before]` window, paying the gas.
///
/// <https://eips.ethereum.org/EIPS/eip-3009>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransferAuthorization {
    pub from: H160,
    pub to: H160,
    pub value: U256,
    /// Unix seconds after which the authorization becomes valid.
    pub valid_after: u64,
    /// Unix seconds at which the authorization expires.
    pub valid_before: u64,
    /// Random 32 bytes; unordered, unlike account nonces.
    pub nonce: H256,
}

impl TransferAuthorization {
    /// Returns the value of hashStruct() over the authorization as defined
    /// by EIP-712.
    pub fn hash_struct(&self) -> [u8; 32] {
        lazy_static! {
            static ref TYPE_HASH: [u8; 32] = signing::keccak256(
                b"TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)",
            );
        }
        let mut hash_data = [0u8; 224];
        hash_data[0..32].copy_from_slice(&*TYPE_HASH);
        // Some slots are not assigned (stay 0) because all values are
        // extended to 256 bits.
        hash_data[44..64].copy_from_slice(self.from.as_fixed_bytes());
        hash_data[76..96].copy_from_slice(self.to.as_fixed_bytes());
        self.value.to_big_endian(&mut hash_data[96..128]);
        hash_data[152..160].copy_from_slice(&self.valid_after.to_be_bytes());
        hash_data[184..192].copy_from_slice(&self.valid_before.to_be_bytes());
        hash_data[192..224].copy_from_slice(self.nonce.as_fixed_bytes());
        signing::keccak256(&hash_data)
    }

    /// Signs the authorization over the token's domain.
    pub fn sign(&self, domain: &DomainSeparator, key: SecretKeyRef) -> EcdsaSignature {
        EcdsaSignature::sign(domain, &self.hash_struct(), key)
    }

    /// Recovers the account that signed the authorization. For a valid
    /// gasless transfer this must equal `self.from`.
    pub fn recover(&self, domain: &DomainSeparator, signature: &EcdsaSignature) -> Result<H160> {
        signature.recover(domain, &self.hash_struct())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, secp256k1::SecretKey, web3::signing::Key};

    fn domain() -> DomainSeparator {
        DomainSeparator::new("USD Coin", "2", 8453, H160::from_low_u64_be(0xc0ffee))
    }

    fn authorization() -> TransferAuthorization {
        TransferAuthorization {
            from: H160::from_low_u64_be(1),
            to: H160::from_low_u64_be(2),
            value: 2_500_000u64.into(),
            valid_after: 0,
            valid_before: 1_700_000_000,
            nonce: H256::from_low_u64_be(42),
        }
    }

    #[test]
    fn hash_struct_depends_on_every_field() {
        let base = authorization();
        let variants = [
            TransferAuthorization { from: H160::from_low_u64_be(9), ..base },
            TransferAuthorization { to: H160::from_low_u64_be(9), ..base },
            TransferAuthorization { value: 9u64.into(), ..base },
            TransferAuthorization { valid_after: 9, ..base },
            TransferAuthorization { valid_before: 9, ..base },
            TransferAuthorization { nonce: H256::from_low_u64_be(9), ..base },
        ];
        for variant in variants {
            assert_ne!(base.hash_struct(), variant.hash_struct());
        }
        assert_eq!(base.hash_struct(), authorization().hash_struct());
    }

    #[test]
    fn sign_and_recover_round_trips() {
        let key = SecretKey::from_slice(&[0x01; 32]).unwrap();
        let key = SecretKeyRef::new(&key);
        let authorization = TransferAuthorization {
            from: key.address(),
            ..authorization()
        };

        let signature = authorization.sign(&domain(), key);
        assert!(signature.v == 27 || signature.v == 28);

        let signer = authorization.recover(&domain(), &signature).unwrap();
        assert_eq!(signer, authorization.from);
    }

    #[test]
    fn recovery_detects_a_different_domain() {
        let key = SecretKey::from_slice(&[0x01; 32]).unwrap();
        let key = SecretKeyRef::new(&key);
        let authorization = TransferAuthorization {
            from: key.address(),
            ..authorization()
        };

        let signature = authorization.sign(&domain(), key);
        let other_domain =
            DomainSeparator::new("USD Coin", "2", 1, H160::from_low_u64_be(0xc0ffee));
        let signer = authorization.recover(&other_domain, &signature).unwrap();
        assert_ne!(signer, authorization.from);
    }
}
