//! Drop configuration.
//!
//! A deployment is described by a TOML file: collection identity, supply
//! cap, phase table, stakeholder shares, and signer key lists. Addresses
//! are written in their hex form (`mg_…`).

use crate::engine::Controller;
use crate::phase::{PhaseGate, PhaseId, SalePhase};
use crate::quota::QuotaLedger;
use crate::roles::{RoleId, RoleTable};
use crate::state::{Collection, ControllerState};
use crate::ControllerError;
use mintgate_crypto::blake2b_256_multi;
use mintgate_splitter::{Stakeholder, Treasury};
use mintgate_types::{Address, Amount, Timestamp};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Domain tag for deriving a collection identity from its name.
const COLLECTION_DOMAIN: &[u8] = b"mintgate.collection.v1";

#[derive(Clone, Debug, Deserialize)]
pub struct PhaseConfig {
    /// Unix seconds; omit to leave the phase unscheduled.
    pub start_time: Option<u64>,
    /// Atomic currency units per token.
    pub price_per_unit: u64,
    pub max_per_tx: u64,
    pub max_tx_per_participant: u32,
    pub gate: PhaseGate,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StakeholderConfig {
    pub address: String,
    pub shares: u64,
}

/// Deployment descriptor for one drop.
#[derive(Clone, Debug, Deserialize)]
pub struct DropConfig {
    pub name: String,
    pub max_supply: u64,
    #[serde(default)]
    pub base_uri: String,
    pub owner: String,
    #[serde(default)]
    pub delegated_airdrop: bool,
    #[serde(default)]
    pub phases: BTreeMap<String, PhaseConfig>,
    /// Defaults to the owner holding all shares when omitted.
    #[serde(default)]
    pub stakeholders: Vec<StakeholderConfig>,
    #[serde(default)]
    pub signers: Vec<String>,
    #[serde(default)]
    pub free_signers: Vec<String>,
    #[serde(default)]
    pub airdroppers: Vec<String>,
}

fn parse_address(field: &str, raw: &str) -> Result<Address, ControllerError> {
    Address::from_hex(raw)
        .ok_or_else(|| ControllerError::Config(format!("{field}: invalid address `{raw}`")))
}

impl DropConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ControllerError> {
        toml::from_str(input).map_err(|e| ControllerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ControllerError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ControllerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&input)
    }

    /// The deployment identity mixed into every assertion message.
    pub fn collection_id(&self) -> [u8; 32] {
        blake2b_256_multi(&[COLLECTION_DOMAIN, self.name.as_bytes()])
    }

    /// Construct a freshly-initialized controller from this descriptor.
    pub fn build(self) -> Result<Controller, ControllerError> {
        if self.max_supply == 0 {
            return Err(ControllerError::Config("max_supply must be non-zero".into()));
        }
        let owner = parse_address("owner", &self.owner)?;

        let mut phases = BTreeMap::new();
        for (name, phase) in &self.phases {
            phases.insert(
                PhaseId::new(name.clone()),
                SalePhase {
                    start_time: phase
                        .start_time
                        .map(Timestamp::new)
                        .unwrap_or(Timestamp::FAR_FUTURE),
                    price_per_unit: Amount::new(phase.price_per_unit as u128),
                    max_per_tx: phase.max_per_tx,
                    max_tx_per_participant: phase.max_tx_per_participant,
                    gate: phase.gate,
                },
            );
        }

        let stakeholders = if self.stakeholders.is_empty() {
            vec![Stakeholder { address: owner, shares: 1 }]
        } else {
            self.stakeholders
                .iter()
                .map(|s| {
                    Ok(Stakeholder {
                        address: parse_address("stakeholders.address", &s.address)?,
                        shares: s.shares,
                    })
                })
                .collect::<Result<Vec<_>, ControllerError>>()?
        };
        let treasury = Treasury::new(stakeholders)?;

        let mut roles = RoleTable::new(owner);
        for (role, list) in [
            (RoleId::Signer, &self.signers),
            (RoleId::FreeSigner, &self.free_signers),
            (RoleId::Airdrop, &self.airdroppers),
        ] {
            for raw in list {
                roles.grant(role, parse_address(role.name(), raw)?);
            }
        }

        let collection_id = self.collection_id();
        Ok(Controller::new(ControllerState {
            collection_id,
            collection: Collection::new(self.max_supply, self.base_uri),
            phases,
            quotas: QuotaLedger::new(),
            claim_nonces: BTreeMap::new(),
            roles,
            treasury,
            delegated_airdrop: self.delegated_airdrop,
        }))
    }
}
