//! Solidity interfaces of the on-chain collaborators.

use alloy::sol;

sol! {
    /// Fungible-token transfer event of the deposit asset.
    #[derive(Debug, PartialEq)]
    event Transfer(address indexed from, address indexed to, uint256 value);

    /// CREATE2 factory deploying one forwarder per owner.
    interface IForwarderFactory {
        function getForwarderAddress(address owner, bytes32 salt) external view returns (address forwarder);
        function deployForwarder(address owner, bytes32 salt) external;
    }

    /// Minimal per-user contract that pushes a received deposit into the
    /// custodial wallet factory.
    interface IDepositForwarder {
        function forwardDeposit(uint256 amount, address owner) external;
    }

    /// Custodial holding contract: balances, withdraw nonces and the gasless
    /// withdrawal entry point.
    interface IWalletFactory {
        function withdrawToOriginalAccountGasless(address user, uint256 amount, uint256 nonce, bytes signature) external;
        function getWithdrawNonce(address owner) external view returns (uint256 nonce);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::keccak256, sol_types::SolEvent};

    #[test]
    fn test_transfer_signature_matches_erc20() {
        assert_eq!(
            Transfer::SIGNATURE_HASH,
            keccak256(b"Transfer(address,address,uint256)")
        );
    }
}
