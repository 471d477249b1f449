//! Idempotent forwarder provisioning.
//!
//! The forwarding contract for an owner exists on-chain exactly once. Losing
//! a deployment race is fine as long as code ends up at the derived address;
//! the ledger makes a second deployment to an occupied address fail, and that
//! failure is treated as success-if-effect-achieved.

use std::sync::Arc;

use alloy::primitives::Address;
use log::{info, warn};

use super::{derive_forwarder_address, ContractSet};
use crate::{models::ProvisionError, services::LedgerClient};

pub struct ForwarderProvisioner<L> {
    ledger: Arc<L>,
    contracts: ContractSet,
}

impl<L: LedgerClient> ForwarderProvisioner<L> {
    pub fn new(ledger: Arc<L>, contracts: ContractSet) -> Self {
        Self { ledger, contracts }
    }

    /// Ensure the forwarder for `owner` is deployed, deploying it only if
    /// absent. Returns the forwarding address and whether this call submitted
    /// the deployment. Safe to call concurrently and repeatedly.
    pub async fn ensure_deployed(
        &self,
        owner: Address,
    ) -> Result<(Address, bool), ProvisionError> {
        let forwarder = derive_forwarder_address(
            owner,
            self.contracts.salt,
            self.contracts.forwarder_factory,
            self.contracts.forwarder_init_code_hash,
        );

        if !self.ledger.get_code(forwarder).await?.is_empty() {
            return Ok((forwarder, false));
        }

        // One-time cross-check against the factory's canonical formula before
        // deploying. Deploying to a divergent address would create a forwarder
        // whose deposits this relayer then refuses to credit.
        let canonical = self
            .ledger
            .get_forwarder_address(owner, self.contracts.salt)
            .await?;
        if canonical != forwarder {
            return Err(ProvisionError::DerivationMismatch {
                canonical,
                derived: forwarder,
            });
        }

        info!("deploying forwarder for {} at {}", owner, forwarder);
        match self
            .ledger
            .deploy_forwarder(owner, self.contracts.salt)
            .await
        {
            Ok(outcome) if outcome.succeeded => {
                info!("forwarder deployed: {}", outcome.tx_hash);
                Ok((forwarder, true))
            }
            Ok(outcome) => {
                self.confirm_lost_race(
                    forwarder,
                    format!("deployment {} reverted", outcome.tx_hash),
                )
                .await
            }
            Err(err) => self.confirm_lost_race(forwarder, err.to_string()).await,
        }
    }

    /// A deployment attempt failed. If code exists at the address anyway, a
    /// concurrent caller won the race and the effect is achieved.
    async fn confirm_lost_race(
        &self,
        forwarder: Address,
        reason: String,
    ) -> Result<(Address, bool), ProvisionError> {
        let code = self.ledger.get_code(forwarder).await?;
        if code.is_empty() {
            Err(ProvisionError::DeploymentFailed(reason))
        } else {
            warn!(
                "forwarder deployment at {} lost a race ({}); code is present, treating as success",
                forwarder, reason
            );
            Ok((forwarder, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::forwarder_salt,
        models::{ProviderError, TxOutcome},
        services::MockLedgerClient,
    };
    use alloy::primitives::{keccak256, Bytes, TxHash};
    use futures::FutureExt;
    use mockall::predicate::eq;

    fn contracts() -> ContractSet {
        ContractSet {
            deposit_token: Address::repeat_byte(0xcc),
            forwarder_factory: Address::repeat_byte(0xfa),
            forwarder_init_code_hash: keccak256(b"forwarder-init-code"),
            salt: forwarder_salt(),
        }
    }

    fn owner() -> Address {
        Address::repeat_byte(0xab)
    }

    fn derived(c: &ContractSet) -> Address {
        derive_forwarder_address(
            owner(),
            c.salt,
            c.forwarder_factory,
            c.forwarder_init_code_hash,
        )
    }

    fn deploy_outcome(succeeded: bool) -> TxOutcome {
        TxOutcome {
            tx_hash: TxHash::repeat_byte(0xdd),
            succeeded,
            logs: vec![],
        }
    }

    #[tokio::test]
    async fn test_existing_forwarder_is_a_noop() {
        let c = contracts();
        let mut ledger = MockLedgerClient::new();
        ledger
            .expect_get_code()
            .with(eq(derived(&c)))
            .times(1)
            .returning(|_| async { Ok(Bytes::from(vec![0x60, 0x80])) }.boxed());
        // no deploy_forwarder expectation: submitting would fail the test

        let provisioner = ForwarderProvisioner::new(Arc::new(ledger), c);
        let (addr, deployed) = provisioner.ensure_deployed(owner()).await.unwrap();
        assert_eq!(addr, derived(&contracts()));
        assert!(!deployed);
    }

    #[tokio::test]
    async fn test_absent_forwarder_is_deployed() {
        let c = contracts();
        let addr = derived(&c);
        let mut ledger = MockLedgerClient::new();
        ledger
            .expect_get_code()
            .with(eq(addr))
            .times(1)
            .returning(|_| async { Ok(Bytes::new()) }.boxed());
        ledger
            .expect_get_forwarder_address()
            .with(eq(owner()), eq(c.salt))
            .times(1)
            .returning(move |_, _| async move { Ok(addr) }.boxed());
        ledger
            .expect_deploy_forwarder()
            .with(eq(owner()), eq(c.salt))
            .times(1)
            .returning(|_, _| async { Ok(deploy_outcome(true)) }.boxed());

        let provisioner = ForwarderProvisioner::new(Arc::new(ledger), c);
        let (returned, deployed) = provisioner.ensure_deployed(owner()).await.unwrap();
        assert_eq!(returned, addr);
        assert!(deployed);
    }

    #[tokio::test]
    async fn test_derivation_mismatch_aborts_before_deploy() {
        let c = contracts();
        let mut ledger = MockLedgerClient::new();
        ledger
            .expect_get_code()
            .returning(|_| async { Ok(Bytes::new()) }.boxed());
        ledger
            .expect_get_forwarder_address()
            .returning(|_, _| async { Ok(Address::repeat_byte(0x77)) }.boxed());
        // no deploy_forwarder expectation

        let provisioner = ForwarderProvisioner::new(Arc::new(ledger), c);
        let err = provisioner.ensure_deployed(owner()).await.unwrap_err();
        assert!(matches!(err, ProvisionError::DerivationMismatch { .. }));
    }

    #[tokio::test]
    async fn test_lost_race_with_code_present_is_success() {
        let c = contracts();
        let addr = derived(&c);
        let mut ledger = MockLedgerClient::new();
        let mut code_calls = 0;
        ledger.expect_get_code().times(2).returning(move |_| {
            code_calls += 1;
            let code = if code_calls == 1 {
                Bytes::new()
            } else {
                Bytes::from(vec![0x60, 0x80])
            };
            async move { Ok(code) }.boxed()
        });
        ledger
            .expect_get_forwarder_address()
            .returning(move |_, _| async move { Ok(addr) }.boxed());
        ledger
            .expect_deploy_forwarder()
            .times(1)
            .returning(|_, _| {
                async { Err(ProviderError::Revert("create2 collision".into())) }.boxed()
            });

        let provisioner = ForwarderProvisioner::new(Arc::new(ledger), c);
        let (returned, deployed) = provisioner.ensure_deployed(owner()).await.unwrap();
        assert_eq!(returned, addr);
        assert!(!deployed);
    }

    #[tokio::test]
    async fn test_failed_deployment_without_code_is_an_error() {
        let c = contracts();
        let addr = derived(&c);
        let mut ledger = MockLedgerClient::new();
        ledger
            .expect_get_code()
            .times(2)
            .returning(|_| async { Ok(Bytes::new()) }.boxed());
        ledger
            .expect_get_forwarder_address()
            .returning(move |_, _| async move { Ok(addr) }.boxed());
        ledger
            .expect_deploy_forwarder()
            .times(1)
            .returning(|_, _| async { Ok(deploy_outcome(false)) }.boxed());

        let provisioner = ForwarderProvisioner::new(Arc::new(ledger), c);
        let err = provisioner.ensure_deployed(owner()).await.unwrap_err();
        assert!(matches!(err, ProvisionError::DeploymentFailed(_)));
    }
}
