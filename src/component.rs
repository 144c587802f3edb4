// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the trait that needs to be implemented by every type
//! that can be added to an assembly.

use crate::{Contract, Error, Value};

/**
This trait needs to be implemented by cost aggregators and cost models.

The numeric compute step of a component is not part of this library.  A
component only declares the contract it exposes, the base contracts it claims
to substitute for, and, once an external compute step has run, the values of
its outputs.

<details>
<summary>Example implementation:</summary>

```
use fused_plant_cost::{Component, Contract, Port, PortType, Tier, Value};

const PORTS: &[Port] = &[
    Port::input("turbine_number", PortType::Int, "Number of turbines at plant"),
    Port::output("om_costs", PortType::Float, "Annual operation and maintenance costs"),
];
static BASE_OM_COST_AGGREGATOR: Contract = Contract::new("OMCostAggregator", Tier::Base, PORTS);

#[derive(Default)]
struct SimpleOMCostAggregator {
    om_costs: f64,
}

impl Component for SimpleOMCostAggregator {
    fn contract(&self) -> &'static Contract {
        &BASE_OM_COST_AGGREGATOR
    }

    fn output(&self, port: &str) -> Option<Value> {
        match port {
            "om_costs" => Some(Value::Float(self.om_costs)),
            _ => None,
        }
    }
}
```

</details>
*/
pub trait Component {
    /// Returns the contract exposed by the component.
    fn contract(&self) -> &'static Contract;

    /// Returns the base contracts the component claims to implement.
    ///
    /// The claims are checked when the component is added to an assembly.
    fn implements(&self) -> Vec<&'static Contract> {
        Vec::new()
    }

    /// Returns the current value of the given output port, if the component
    /// holds one.
    fn output(&self, _port: &str) -> Option<Value> {
        None
    }
}

/// Checks that the contract of the given component is well-formed and that
/// it implements every base contract it claims to implement.
pub(crate) fn ensure_valid(component: &dyn Component) -> Result<(), Error> {
    let contract = component.contract();
    contract.validate()?;
    for base in component.implements() {
        contract.ensure_implements(base)?;
    }
    Ok(())
}
