// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Variable trees: named records of scalar cost fields.
//!
//! A [`TreeSchema`] is a compile-time declaration of the fields of a cost
//! breakdown, and a [`VarTree`] holds one value per field of the schema it was
//! created for.  Schemas are independent of each other: two trees with
//! different schemas never convert into each other implicitly, even when they
//! share field names.

use crate::Error;

/// A macro for declaring a [`TreeSchema`] constant.
///
/// Every field is a cost in `USD`, described by the given string.
macro_rules! tree_schema {
    (
        $(#[$meta:meta])*
        $vis:vis const $ident:ident = $name:literal {
            $( $field:ident: $desc:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis const $ident: TreeSchema = {
            const FIELDS: &[Field] = &[
                $( Field::new(stringify!($field), "USD", $desc), )*
            ];
            TreeSchema::new($name, FIELDS)
        };
    };
}

/// A scalar field of a [`TreeSchema`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    name: &'static str,
    units: &'static str,
    desc: &'static str,
}

impl Field {
    /// Creates a new field declaration.
    pub const fn new(name: &'static str, units: &'static str, desc: &'static str) -> Self {
        Self { name, units, desc }
    }

    /// Returns the name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the units of the field.
    pub fn units(&self) -> &'static str {
        self.units
    }

    /// Returns the description of the field.
    pub fn desc(&self) -> &'static str {
        self.desc
    }
}

/// The fixed set of fields of a variable tree.
#[derive(Debug, PartialEq)]
pub struct TreeSchema {
    name: &'static str,
    fields: &'static [Field],
}

impl TreeSchema {
    /// Creates a new schema with the given name and fields.
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    /// Returns the name of the schema.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the fields of the schema.
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Returns the field with the given name, if it exists.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks that no field name is declared more than once.
    pub fn validate(&self) -> Result<(), Error> {
        for (pos, field) in self.fields.iter().enumerate() {
            if self.fields[..pos].iter().any(|f| f.name == field.name) {
                return Err(Error::contract_violation(format!(
                    "{} declares field {} more than once.",
                    self.name, field.name
                )));
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize, Error> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| {
                Error::unknown_field(format!("{} has no field named {}.", self.name, name))
            })
    }
}

impl std::fmt::Display for TreeSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An instance of a [`TreeSchema`], with all fields starting at `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct VarTree {
    schema: &'static TreeSchema,
    values: Vec<f64>,
}

impl VarTree {
    /// Creates a new tree for the given schema.
    pub fn new(schema: &'static TreeSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.fields.len()],
        }
    }

    /// Returns the schema the tree was created for.
    pub fn schema(&self) -> &'static TreeSchema {
        self.schema
    }

    /// Returns the value of the field with the given name.
    pub fn get(&self, name: &str) -> Result<f64, Error> {
        Ok(self.values[self.schema.position(name)?])
    }

    /// Sets the value of the field with the given name.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), Error> {
        let pos = self.schema.position(name)?;
        self.values[pos] = value;
        Ok(())
    }

    /// Returns an iterator over the fields of the tree and their values.
    pub fn fields(&self) -> impl Iterator<Item = (&'static Field, f64)> + '_ {
        self.schema.fields.iter().zip(self.values.iter().copied())
    }
}

tree_schema!(
    /// Balance of station cost breakdown based on the DOE/NREL system cost
    /// breakdown structure.
    pub const BOS_VAR_TREE = "BOSVarTree" {
        development_costs: "Overall wind plant balance of station/system costs up to point of comissioning",
        preparation_and_staging_costs: "Site preparation and staging",
        transportation_costs: "Any transportation costs to site / staging site",
        foundation_and_substructure_costs: "Foundation and substructure costs",
        electrical_costs: "Collection system, substation, transmission and interconnect costs",
        assembly_and_installation_costs: "Assembly and installation costs",
        soft_costs: "Contingencies, bonds, reserves, decommissioning, profits, and construction financing costs",
        other_costs: "Bucket for any other costs not captured above",
    }
);

tree_schema!(
    /// Full balance of station cost breakdown based on the DOE/NREL system
    /// cost breakdown structure.
    ///
    /// The electrical and soft costs of [`BOS_VAR_TREE`] are split into finer
    /// fields here, so this is not a superset of it.
    pub const FULL_BOS_VAR_TREE = "FullBOSVarTree" {
        management_costs: "Project management costs",
        development_costs: "Overall wind plant balance of station/system costs up to point of comissioning",
        preparation_and_staging_costs: "Site preparation and staging",
        transportation_costs: "Any transportation costs to site / staging site",
        foundation_and_substructure_costs: "Foundation and substructure costs",
        collection_and_substation_costs: "Collection system and onsite substation costs",
        transmission_and_interconnection_costs: "Transmission and grid interconnection costs",
        assembly_and_installation_costs: "Assembly and installation costs",
        contingencies_and_insurance_costs: "Contingencies, bonds, reserves for project",
        decommissioning_costs: "Costs associated with plant decommissioning at end of life",
        construction_financing_costs: "Construction financing costs",
        other_costs: "Bucket for any other costs not captured above",
        developer_profits: "Developer profits",
    }
);
