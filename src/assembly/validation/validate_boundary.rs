// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating that an [`Assembly`] satisfies its boundary
//! contract.

use crate::{Direction, Error, PortPath};

use super::AssemblyValidator;

impl AssemblyValidator<'_> {
    /// Validates that the boundary contract is well-formed and implements
    /// every base contract declared for it.
    pub(super) fn validate_contract(&self) -> Result<(), Error> {
        let contract = self.assembly.contract;
        contract.validate()?;
        for base in &self.assembly.implements {
            contract.ensure_implements(base)?;
        }
        Ok(())
    }

    /// Validates that every boundary port is connected to a child.
    ///
    /// Boundary inputs need to feed at least one child input, and boundary
    /// outputs need a child output as their source.
    pub(super) fn validate_boundary_connections(&self) -> Result<(), Error> {
        let unconnected = self
            .assembly
            .contract
            .ports()
            .iter()
            .filter(|port| {
                let path = PortPath::boundary(port.name());
                match port.direction() {
                    Direction::In => !self
                        .assembly
                        .destinations_of(&path)
                        .any(|d| d.component().is_some()),
                    Direction::Out => self
                        .assembly
                        .source_of(&path)
                        .map_or(true, |s| s.is_boundary()),
                }
            })
            .map(|port| port.name())
            .collect::<Vec<_>>();

        if !unconnected.is_empty() {
            return Err(Error::contract_violation(format!(
                "Boundary ports {:?} of {} assembly are not connected.",
                unconnected, self.assembly.contract
            )));
        }

        Ok(())
    }
}
