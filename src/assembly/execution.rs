// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The execution plan an external scheduler follows to run an [`Assembly`],
//! and the [`Component`] implementation that lets assemblies nest.

use super::{Assembly, Child, Connection};
use crate::{Component, Contract, Value};

/// One step of the execution plan of an assembly: a child, and the
/// connections whose values must be delivered to it before it executes.
pub struct Step<'a> {
    child: &'a Child,
    inputs: Vec<&'a Connection>,
}

impl<'a> Step<'a> {
    /// Returns the child to execute.
    pub fn child(&self) -> &'a Child {
        self.child
    }

    /// Returns the connections feeding the inputs of the child.
    pub fn inputs(&self) -> &[&'a Connection] {
        &self.inputs
    }
}

impl Assembly {
    /// Returns the execution plan of the assembly, one step per child in the
    /// workflow, in workflow order.
    ///
    /// The sources of every step are either boundary inputs or outputs of
    /// children in earlier steps.
    pub fn steps(&self) -> Vec<Step<'_>> {
        self.workflow()
            .map(|child| Step {
                child,
                inputs: self
                    .connections
                    .iter()
                    .filter(|c| c.destination().component() == Some(child.name()))
                    .collect(),
            })
            .collect()
    }

    /// Returns the connections that drive the boundary outputs of the
    /// assembly, to be read after the last step has executed.
    pub fn boundary_outputs(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .iter()
            .filter(|c| c.destination().is_boundary())
    }
}

impl Component for Assembly {
    fn contract(&self) -> &'static Contract {
        self.contract
    }

    fn implements(&self) -> Vec<&'static Contract> {
        self.implements.clone()
    }

    /// Delegates to the output of the child connected to the boundary port.
    fn output(&self, port: &str) -> Option<Value> {
        let source = self
            .boundary_outputs()
            .find(|c| c.destination().port() == port)?
            .source();
        let child = self.child(source.component()?).ok()?;
        child.component().output(source.port())
    }
}
