//! EIP-712 typed-data signing for ERC-3009 gasless transfers.
//!
//! The wallet signs a `TransferWithAuthorization` struct over the token's
//! own EIP-712 domain; the relay then submits the transfer on-chain with
//! the signature split into its `r`/`s`/`v` components.

mod signature;
mod transfer_authorization;

pub use {signature::EcdsaSignature, transfer_authorization::TransferAuthorization};

use {
    lazy_static::lazy_static,
    primitive_types::H160,
    std::fmt,
    web3::{
        ethabi::{encode, Token},
        signing,
    },
};

/// An EIP-712 domain separator hash.
///
/// ERC-3009 domains are per-token: the domain's name and version are the
/// token contract's own `name()` and `version()` strings.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl DomainSeparator {
    pub fn new(name: &str, version: &str, chain_id: u64, verifying_contract: H160) -> Self {
        lazy_static! {
            /// The EIP-712 domain type used for computing the domain separator.
            static ref DOMAIN_TYPE_HASH: [u8; 32] = signing::keccak256(
                b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
            );
        }
        let abi_encoded = encode(&[
            Token::Uint((*DOMAIN_TYPE_HASH).into()),
            Token::Uint(signing::keccak256(name.as_bytes()).into()),
            Token::Uint(signing::keccak256(version.as_bytes()).into()),
            Token::Uint(chain_id.into()),
            Token::Address(verifying_contract),
        ]);
        Self(signing::keccak256(&abi_encoded))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut hex = [0u8; 64];
        // Unwrap because we know the length is correct.
        hex::encode_to_slice(self.0, &mut hex).unwrap();
        // Unwrap because we know it is valid utf8.
        f.write_str(std::str::from_utf8(&hex).unwrap())
    }
}

/// The message that actually gets signed for a given struct hash, as defined
/// by EIP-712: `keccak256("\x19\x01" || domainSeparator || hashStruct)`.
pub fn hashed_eip712_message(domain: &DomainSeparator, struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain.0);
    message[34..66].copy_from_slice(struct_hash);
    signing::keccak256(&message)
}
