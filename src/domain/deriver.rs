//! Deterministic forwarding-address derivation.
//!
//! Mirrors the factory's CREATE2 formula:
//!
//! ```text
//! owner_salt = keccak256(owner ++ salt)
//! address    = keccak256(0xff ++ factory ++ owner_salt ++ init_code_hash)[12..]
//! ```
//!
//! This must match the on-chain formula bit-for-bit; any divergence makes the
//! relayer reject legitimate deposits. The provisioner cross-checks it
//! against the factory before ever deploying (see
//! [`crate::domain::ForwarderProvisioner`]).

use alloy::primitives::{keccak256, Address, B256};

/// Compute the forwarding address for `(owner, salt)` under `factory`.
///
/// Pure and deterministic; whether a contract actually exists at the result
/// is a separate, mutable fact queried from the ledger.
pub fn derive_forwarder_address(
    owner: Address,
    salt: B256,
    factory: Address,
    init_code_hash: B256,
) -> Address {
    factory.create2(owner_salt(owner, salt), init_code_hash)
}

/// Per-owner CREATE2 salt: `keccak256(abi.encodePacked(owner, salt))`.
fn owner_salt(owner: Address, salt: B256) -> B256 {
    let mut packed = [0u8; 52];
    packed[..20].copy_from_slice(owner.as_slice());
    packed[20..].copy_from_slice(salt.as_slice());
    keccak256(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::forwarder_salt;

    fn factory() -> Address {
        "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            .parse()
            .unwrap()
    }

    fn owner() -> Address {
        "0x742d35Cc6634C0532925a3b844Bc454e4438f44e"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let init_code_hash = keccak256(b"forwarder-init-code");
        let a = derive_forwarder_address(owner(), forwarder_salt(), factory(), init_code_hash);
        let b = derive_forwarder_address(owner(), forwarder_salt(), factory(), init_code_hash);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_owners_get_different_addresses() {
        let init_code_hash = keccak256(b"forwarder-init-code");
        let other: Address = Address::repeat_byte(0x42);
        assert_ne!(
            derive_forwarder_address(owner(), forwarder_salt(), factory(), init_code_hash),
            derive_forwarder_address(other, forwarder_salt(), factory(), init_code_hash),
        );
    }

    #[test]
    fn test_salt_change_invalidates_addresses() {
        let init_code_hash = keccak256(b"forwarder-init-code");
        assert_ne!(
            derive_forwarder_address(owner(), forwarder_salt(), factory(), init_code_hash),
            derive_forwarder_address(owner(), keccak256(b"other"), factory(), init_code_hash),
        );
    }

    #[test]
    fn test_matches_manual_create2_expansion() {
        // Recompute keccak256(0xff ++ factory ++ owner_salt ++ init_code_hash)
        // by hand to pin the exact byte layout.
        let salt = forwarder_salt();
        let init_code_hash = keccak256(b"forwarder-init-code");

        let mut packed = [0u8; 52];
        packed[..20].copy_from_slice(owner().as_slice());
        packed[20..].copy_from_slice(salt.as_slice());
        let owner_salt = keccak256(packed);

        let mut preimage = Vec::with_capacity(85);
        preimage.push(0xff);
        preimage.extend_from_slice(factory().as_slice());
        preimage.extend_from_slice(owner_salt.as_slice());
        preimage.extend_from_slice(init_code_hash.as_slice());
        let expected = Address::from_slice(&keccak256(&preimage)[12..]);

        assert_eq!(
            derive_forwarder_address(owner(), salt, factory(), init_code_hash),
            expected
        );
    }
}
