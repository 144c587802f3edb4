// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines port contracts and their tiers.
//!
//! A [`Contract`] is the fixed set of ports a component guarantees to expose.
//! Richer tiers of the same kind of cost model re-state every port of the
//! base tier and may add new ones, so that a richer component can replace a
//! base one without breaking existing connections.  Whether that holds is
//! checked structurally by [`Contract::ensure_implements`].

use std::fmt::Display;

use crate::port::{Port, PortType};
use crate::Error;

/// The tier of a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Base,
    Extended,
    Full,
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Base => write!(f, "Base"),
            Tier::Extended => write!(f, "Extended"),
            Tier::Full => write!(f, "Full"),
        }
    }
}

/// A named set of ports that a component of a given kind and tier exposes.
///
/// Contracts are meant to be declared as `static` items:
///
/// ```
/// use fused_plant_cost::{Contract, Port, PortType, Tier};
///
/// const PORTS: &[Port] = &[Port::output("capex", PortType::Float, "Plant CAPEX")];
/// static CAPEX: Contract = Contract::new("CAPEXModel", Tier::Base, PORTS);
///
/// assert_eq!(CAPEX.to_string(), "BaseCAPEXModel");
/// ```
#[derive(Debug, PartialEq)]
pub struct Contract {
    kind: &'static str,
    tier: Tier,
    ports: &'static [Port],
}

impl Contract {
    /// Declares a new contract.
    pub const fn new(kind: &'static str, tier: Tier, ports: &'static [Port]) -> Self {
        Self { kind, tier, ports }
    }

    /// Returns the kind of cost model the contract is for.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Returns the ports of the contract, in declaration order.
    pub fn ports(&self) -> &'static [Port] {
        self.ports
    }

    /// Returns the port with the given name, if it exists.
    pub fn port(&self, name: &str) -> Option<&'static Port> {
        self.ports.iter().find(|p| p.name() == name)
    }

    /// Checks that the contract is well-formed: port names are unique and
    /// variable tree schemas used by the ports have unique field names.
    pub fn validate(&self) -> Result<(), Error> {
        for (pos, port) in self.ports.iter().enumerate() {
            if self.ports[..pos].iter().any(|p| p.name() == port.name()) {
                return Err(Error::contract_violation(format!(
                    "{} declares port {} more than once.",
                    self,
                    port.name()
                )));
            }
            if let PortType::Tree(schema) = port.port_type() {
                schema.validate()?;
            }
        }
        Ok(())
    }

    /// Checks that every port of `base` is present in this contract, with the
    /// same name, direction and type.
    pub fn ensure_implements(&self, base: &Contract) -> Result<(), Error> {
        for expected in base.ports {
            let Some(port) = self.port(expected.name()) else {
                return Err(Error::contract_violation(format!(
                    "{} does not implement {}: missing port {}.",
                    self, base, expected
                )));
            };
            if !port.same_signature(expected) {
                return Err(Error::contract_violation(format!(
                    "{} does not implement {}: found port {}, expected {}.",
                    self, base, port, expected
                )));
            }
        }
        Ok(())
    }

    /// Returns true if a component with this contract can take the place of
    /// a component with the `base` contract.
    pub fn is_substitutable_for(&self, base: &Contract) -> bool {
        self.ensure_implements(base).is_ok()
    }
}

impl Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.tier, self.kind)
    }
}
