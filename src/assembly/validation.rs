// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating an [`Assembly`] before it is handed to a scheduler.

mod validate_boundary;
mod validate_workflow;

pub(crate) use validate_workflow::ensure_producers_first;

use crate::{AssemblyConfig, Error};

use super::Assembly;

pub(crate) struct AssemblyValidator<'a> {
    assembly: &'a Assembly,
    config: &'a AssemblyConfig,
}

pub(crate) fn validate(assembly: &Assembly, config: &AssemblyConfig) -> Result<(), Error> {
    let validator = AssemblyValidator { assembly, config };

    validator.validate_contract()?;
    validator.validate_boundary_connections()?;
    validator.validate_acyclicity()?;
    validator.validate_workflow()?;

    Ok(())
}
