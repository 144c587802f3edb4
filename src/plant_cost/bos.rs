// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Balance of station cost aggregators and cost models.
//!
//! The three tiers share the `bos_costs` output and the `turbine_number`
//! input.  The Extended and Full tiers add a `bos_breakdown` output, each
//! with its own variable tree schema, so neither of them can stand in for the
//! other.

use crate::var_tree::{VarTree, BOS_VAR_TREE, FULL_BOS_VAR_TREE};
use crate::{
    Assembly, AssemblyBuilder, AssemblyConfig, Component, Contract, Error, Port, PortType, Tier,
    Value,
};

const BOS_COSTS: Port = Port::output(
    "bos_costs",
    PortType::Float,
    "Overall wind plant balance of station/system costs up to point of comissioning",
);
const TURBINE_NUMBER: Port = Port::input(
    "turbine_number",
    PortType::Int,
    "Number of turbines at plant",
);
const BOS_BREAKDOWN: Port = Port::output(
    "bos_breakdown",
    PortType::Tree(&BOS_VAR_TREE),
    "BOS cost breakdown",
);
const FULL_BOS_BREAKDOWN: Port = Port::output(
    "bos_breakdown",
    PortType::Tree(&FULL_BOS_VAR_TREE),
    "BOS cost breakdown",
);

const BASE_PORTS: &[Port] = &[BOS_COSTS, TURBINE_NUMBER];
const EXTENDED_PORTS: &[Port] = &[BOS_BREAKDOWN, BOS_COSTS, TURBINE_NUMBER];
const FULL_PORTS: &[Port] = &[FULL_BOS_BREAKDOWN, BOS_COSTS, TURBINE_NUMBER];

/// Contract of an aggregator computing the overall balance of station costs.
pub static BASE_BOS_COST_AGGREGATOR: Contract =
    Contract::new("BOSCostAggregator", Tier::Base, BASE_PORTS);
/// Contract of an aggregator that also reports a [`BOS_VAR_TREE`] breakdown.
pub static EXTENDED_BOS_COST_AGGREGATOR: Contract =
    Contract::new("BOSCostAggregator", Tier::Extended, EXTENDED_PORTS);
/// Contract of an aggregator that also reports a [`FULL_BOS_VAR_TREE`]
/// breakdown.
pub static FULL_BOS_COST_AGGREGATOR: Contract =
    Contract::new("BOSCostAggregator", Tier::Full, FULL_PORTS);

/// Boundary contract of a balance of station cost model.
pub static BASE_BOS_COST_MODEL: Contract = Contract::new("BOSCostModel", Tier::Base, BASE_PORTS);
/// Boundary contract of a cost model exposing a [`BOS_VAR_TREE`] breakdown.
pub static EXTENDED_BOS_COST_MODEL: Contract =
    Contract::new("BOSCostModel", Tier::Extended, EXTENDED_PORTS);
/// Boundary contract of a cost model exposing a [`FULL_BOS_VAR_TREE`]
/// breakdown.
pub static FULL_BOS_COST_MODEL: Contract =
    Contract::new("BOSCostModel", Tier::Full, FULL_PORTS);

/// The default balance of station cost aggregator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaseBosCostAggregator {
    pub bos_costs: f64,
}

impl Component for BaseBosCostAggregator {
    fn contract(&self) -> &'static Contract {
        &BASE_BOS_COST_AGGREGATOR
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "bos_costs" => Some(Value::Float(self.bos_costs)),
            _ => None,
        }
    }
}

/// A balance of station cost aggregator with a [`BOS_VAR_TREE`] breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedBosCostAggregator {
    pub bos_costs: f64,
    pub bos_breakdown: VarTree,
}

impl Default for ExtendedBosCostAggregator {
    fn default() -> Self {
        Self {
            bos_costs: 0.0,
            bos_breakdown: VarTree::new(&BOS_VAR_TREE),
        }
    }
}

impl Component for ExtendedBosCostAggregator {
    fn contract(&self) -> &'static Contract {
        &EXTENDED_BOS_COST_AGGREGATOR
    }

    fn implements(&self) -> Vec<&'static Contract> {
        vec![&BASE_BOS_COST_AGGREGATOR]
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "bos_costs" => Some(Value::Float(self.bos_costs)),
            "bos_breakdown" => Some(Value::Tree(self.bos_breakdown.clone())),
            _ => None,
        }
    }
}

/// A balance of station cost aggregator with a [`FULL_BOS_VAR_TREE`]
/// breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct FullBosCostAggregator {
    pub bos_costs: f64,
    pub bos_breakdown: VarTree,
}

impl Default for FullBosCostAggregator {
    fn default() -> Self {
        Self {
            bos_costs: 0.0,
            bos_breakdown: VarTree::new(&FULL_BOS_VAR_TREE),
        }
    }
}

impl Component for FullBosCostAggregator {
    fn contract(&self) -> &'static Contract {
        &FULL_BOS_COST_AGGREGATOR
    }

    fn implements(&self) -> Vec<&'static Contract> {
        vec![&BASE_BOS_COST_AGGREGATOR]
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "bos_costs" => Some(Value::Float(self.bos_costs)),
            "bos_breakdown" => Some(Value::Tree(self.bos_breakdown.clone())),
            _ => None,
        }
    }
}

/// Adds a default balance of station cost aggregator named `bos` and wires
/// it to the boundary of the assembly.
pub fn configure_base_bos(assembly: &mut AssemblyBuilder) -> Result<(), Error> {
    assembly.add("bos", BaseBosCostAggregator::default())?;

    assembly.set_workflow(["bos"])?;

    assembly.connect("bos.bos_costs", "bos_costs")?;
    assembly.connect("turbine_number", "bos.turbine_number")?;

    Ok(())
}

/// Configures the base tier, then upgrades `bos` to an
/// [`ExtendedBosCostAggregator`] and exposes its breakdown.
pub fn configure_extended_bos(assembly: &mut AssemblyBuilder) -> Result<(), Error> {
    configure_base_bos(assembly)?;

    assembly.replace("bos", ExtendedBosCostAggregator::default())?;

    assembly.connect("bos.bos_breakdown", "bos_breakdown")?;

    Ok(())
}

/// Configures the base tier, then upgrades `bos` to a
/// [`FullBosCostAggregator`] and exposes its breakdown.
pub fn configure_full_bos(assembly: &mut AssemblyBuilder) -> Result<(), Error> {
    configure_base_bos(assembly)?;

    assembly.replace("bos", FullBosCostAggregator::default())?;

    assembly.connect("bos.bos_breakdown", "bos_breakdown")?;

    Ok(())
}

/// Builds a [`BASE_BOS_COST_MODEL`] assembly.
pub fn base_bos_cost_model() -> Result<Assembly, Error> {
    let mut assembly = AssemblyBuilder::new(&BASE_BOS_COST_MODEL, AssemblyConfig::default());
    configure_base_bos(&mut assembly)?;
    assembly.build()
}

/// Builds an [`EXTENDED_BOS_COST_MODEL`] assembly.
pub fn extended_bos_cost_model() -> Result<Assembly, Error> {
    let mut assembly = AssemblyBuilder::new(&EXTENDED_BOS_COST_MODEL, AssemblyConfig::default());
    assembly.declare_implements(&BASE_BOS_COST_MODEL)?;
    configure_extended_bos(&mut assembly)?;
    assembly.build()
}

/// Builds a [`FULL_BOS_COST_MODEL`] assembly.
pub fn full_bos_cost_model() -> Result<Assembly, Error> {
    let mut assembly = AssemblyBuilder::new(&FULL_BOS_COST_MODEL, AssemblyConfig::default());
    assembly.declare_implements(&BASE_BOS_COST_MODEL)?;
    configure_full_bos(&mut assembly)?;
    assembly.build()
}
