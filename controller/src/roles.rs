//! Role-gated authority.
//!
//! Roles are additive, revocable address sets — not a hierarchy beyond the
//! owner's implicit `Admin` membership. Signer-role members' address bytes
//! double as their Ed25519 verification keys.

use crate::ControllerError;
use mintgate_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Every distinguished authority in the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    /// May perform admin-gated operations; the owner holds it implicitly.
    Admin,
    /// Authorizes priced-phase eligibility assertions.
    Signer,
    /// Authorizes free-claim assertions.
    FreeSigner,
    /// May perform airdrops when delegation is enabled for the drop.
    Airdrop,
}

impl RoleId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Signer => "signer",
            Self::FreeSigner => "free_signer",
            Self::Airdrop => "airdrop",
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner address plus per-role holder sets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleTable {
    owner: Address,
    roles: BTreeMap<RoleId, BTreeSet<Address>>,
}

impl RoleTable {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            roles: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.owner == *caller
    }

    /// Whether `address` holds `role`. The owner implicitly holds `Admin`.
    pub fn has_role(&self, role: RoleId, address: &Address) -> bool {
        if role == RoleId::Admin && self.is_owner(address) {
            return true;
        }
        self.roles
            .get(&role)
            .map(|set| set.contains(address))
            .unwrap_or(false)
    }

    /// The explicit holder set for a role (without the owner's implicit
    /// admin membership).
    pub fn members(&self, role: RoleId) -> &BTreeSet<Address> {
        static EMPTY: BTreeSet<Address> = BTreeSet::new();
        self.roles.get(&role).unwrap_or(&EMPTY)
    }

    pub fn require_owner(&self, caller: &Address) -> Result<(), ControllerError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(ControllerError::NotOwner)
        }
    }

    pub fn require_role(&self, role: RoleId, caller: &Address) -> Result<(), ControllerError> {
        if self.has_role(role, caller) {
            Ok(())
        } else {
            Err(ControllerError::MissingRole {
                role,
                address: *caller,
            })
        }
    }

    /// Owner or any explicit `Admin` holder.
    pub fn require_admin(&self, caller: &Address) -> Result<(), ControllerError> {
        self.require_role(RoleId::Admin, caller)
    }

    pub fn grant(&mut self, role: RoleId, address: Address) {
        self.roles.entry(role).or_default().insert(address);
    }

    pub fn revoke(&mut self, role: RoleId, address: &Address) {
        if let Some(set) = self.roles.get_mut(&role) {
            set.remove(address);
        }
    }

    /// Single atomic reassignment, effective immediately. The previous
    /// owner keeps only whatever explicit roles were granted separately.
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.owner = new_owner;
    }
}
