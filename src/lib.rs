// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Fused Plant Cost

This is a library for composing wind plant cost models out of interchangeable
cost aggregators, and for producing a validated wiring plan that an external
scheduler can execute.

The library doesn't compute any costs itself.  It describes which ports a
cost model exposes, how the ports of the models inside a larger model are
connected, and in which order the models have to run.

## Contracts and tiers

Every [`Component`] exposes a [`Contract`]: a fixed set of named and typed
[`Port`]s.  Contracts of the same kind of cost model come in tiers
([`Tier::Base`], [`Tier::Extended`], [`Tier::Full`]).  A richer tier re-states
every port of the base tier, and can add more, so a richer component can
replace a base one without breaking any connections.  Components declare the
base contracts they implement through [`Component::implements`], and the
claims are checked structurally when the component is added to an assembly.

## Variable trees

Cost breakdowns are described by [`var_tree::TreeSchema`]s, and carried in
[`var_tree::VarTree`] instances.  The [`var_tree::BOS_VAR_TREE`] and
[`var_tree::FULL_BOS_VAR_TREE`] schemas are independent of each other: ports
carrying them have different types, and can't be connected to each other.

## Assemblies

An [`AssemblyBuilder`] accumulates the children of a cost model, the
connections between their ports and its own boundary ports, and the workflow
order of the children:

- [`add`][AssemblyBuilder::add] and [`replace`][AssemblyBuilder::replace]
  children,
- [`connect`][AssemblyBuilder::connect] ports, or broadcast one source to
  several destinations with [`connect_all`][AssemblyBuilder::connect_all],
- fix the execution order with
  [`set_workflow`][AssemblyBuilder::set_workflow].

Each of these calls fails immediately with an [`Error`] if it would make the
assembly invalid, and leaves the builder unchanged in that case.

[`build`][AssemblyBuilder::build] then checks the assembly as a whole,
including that:

- Every boundary port of the assembly's contract is connected to a child.
- The children don't depend on each other in a cycle.
- No child is scheduled before a child it receives values from.
- Every child is part of the workflow, if
  [`AssemblyConfig::reject_unscheduled_children`] is set.  Otherwise the
  workflow may cover a subset of the children.

If any of the validation steps fail, the method will return an [`Error`], and
an immutable [`Assembly`] otherwise.  Its [`steps`][Assembly::steps] are the
plan an external scheduler follows.  An [`Assembly`] is itself a
[`Component`], so finished cost models can be nested in larger ones.

## Plant cost models

The [`plant_cost`] module has the contracts, base components and configuration
functions for balance of station and CAPEX cost models:

- [`configure_base_bos`][plant_cost::bos::configure_base_bos]
- [`configure_extended_bos`][plant_cost::bos::configure_extended_bos]
- [`configure_full_bos`][plant_cost::bos::configure_full_bos]
- [`configure_capex`][plant_cost::capex::configure_capex]
*/

mod assembly;
pub use assembly::{iterators, Assembly, AssemblyBuilder, Child, Connection, Step};

mod component;
pub use component::Component;

mod config;
pub use config::AssemblyConfig;

mod contract;
pub use contract::{Contract, Tier};

mod error;
pub use error::{Error, ErrorKind};

mod port;
pub use port::{Direction, Port, PortPath, PortType};

mod value;
pub use value::Value;

pub mod plant_cost;
pub mod var_tree;
