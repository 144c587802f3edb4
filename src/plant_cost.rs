// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Contracts, base components and configuration functions for wind plant
//! cost models.
//!
//! Each richer tier of a cost model is configured by running the base
//! configuration first and then replacing the base aggregator with a richer
//! one, so that the wiring of the base tier is never duplicated.

pub mod bos;
pub mod capex;
pub mod turbine;
