// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

/*!
Processes
=========

A manufacturing process (e.g. `Electric arc`, `Cement`) with its production figures, its
process (non combustion) emissions and the fuel demand of its consumption categories.

The grid carbon intensity of a process is pushed down as the emission factor of electricity
and distributed steam in every category, at construction and on every later change.
*/

use std::collections::BTreeMap;
use std::str;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    categories::ConsumptionCategory,
    error::{ensure_unique, EurError, Result},
    types::{CategoryValue, FuelMix, FuelType, UNIT_DEMAND, UNIT_EMISSION_INTENSITY},
    vecops::{nansum, round_to},
};

// -------------------- Production

/// Physical output and capacity of a process
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Production {
    /// Physical output
    pub physical_output: f64,
    /// Installed capacity
    pub installed_capacity: f64,
    /// Capacity investment
    pub capacity_investment: f64,
    /// Decommissioned capacity
    pub decommissioned_capacity: f64,
    /// Idle capacity
    pub idle_capacity: f64,
    /// Unit of output and capacities
    pub unit: String,
}

impl Production {
    /// Available capacity
    pub fn capacity(&self) -> f64 {
        self.installed_capacity + self.capacity_investment
            - self.decommissioned_capacity
            - self.idle_capacity
    }
}

// -------------------- Fuel mix

/// Fuel mix values per tonne of product or totals
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelMixMethod {
    /// Demand intensity [GJ/tonne]
    Relative,
    /// Total demand [GJ]
    Absolute,
}

impl Default for FuelMixMethod {
    fn default() -> Self {
        FuelMixMethod::Relative
    }
}

impl str::FromStr for FuelMixMethod {
    type Err = EurError;

    fn from_str(s: &str) -> std::result::Result<FuelMixMethod, Self::Err> {
        match s {
            "relative" => Ok(FuelMixMethod::Relative),
            "absolute" => Ok(FuelMixMethod::Absolute),
            _ => Err(EurError::ParseError(format!(
                "fuel mix method must be `relative` or `absolute`, got `{}`",
                s
            ))),
        }
    }
}

// -------------------- Summary

/// Key indicators of a process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSummary {
    /// Physical output
    #[serde(rename = "Physical output (tonnes)")]
    pub physical_output: f64,
    /// Total fuel demand
    #[serde(rename = "Total fuel demand (GJ)")]
    pub total_fuel_demand: f64,
    /// Electricity share of total fuel demand
    #[serde(rename = "Electricity share of total demand (%)")]
    pub electricity_share: f64,
    /// Total fuel demand per tonne
    #[serde(rename = "Total fuel demand intensity (GJ/tonne)")]
    pub total_fuel_demand_intensity: f64,
    /// Fuel and process emissions
    #[serde(rename = "Total emissions (kgCO2)")]
    pub total_emissions: f64,
    /// Fuel and process emissions per tonne
    #[serde(rename = "Total emission intensity (kgCO2/tonne)")]
    pub total_emission_intensity: f64,
    /// Demand per tonne by fuel
    #[serde(
        rename = "Fuel demand intensity (GJ/tonne)",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel_demand_intensity: Option<BTreeMap<String, f64>>,
    /// Total demand by fuel
    #[serde(rename = "Fuel demand (GJ)", skip_serializing_if = "Option::is_none")]
    pub fuel_demand: Option<BTreeMap<String, f64>>,
}

// -------------------- Process

/// Manufacturing process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Process {
    name: String,
    production: Production,
    /// Process emissions [kgCO2/tonne]
    process_emission_intensity: f64,
    categories: Vec<ConsumptionCategory>,
    /// Grid electricity carbon intensity [kgCO2/GJ]
    grid_carbon_intensity: Option<f64>,
}

impl Process {
    /// Constructor
    ///
    /// Fails when a category name appears more than once. When a grid carbon intensity is
    /// given it is applied right away to electricity and steam in all categories.
    pub fn new<T: Into<String>>(
        name: T,
        production: Production,
        process_emission_intensity: f64,
        categories: Vec<ConsumptionCategory>,
        grid_carbon_intensity: Option<f64>,
    ) -> Result<Self> {
        let name = name.into();
        ensure_unique("category", &name, categories.iter().map(|c| c.name()))?;
        let mut process = Self {
            name,
            production,
            process_emission_intensity,
            categories,
            grid_carbon_intensity,
        };
        if grid_carbon_intensity.is_some() {
            process.apply_grid_carbon_intensity();
        }
        Ok(process)
    }

    /// Process name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Production data
    pub fn production(&self) -> &Production {
        &self.production
    }

    /// Process emissions per tonne [kgCO2/tonne]
    pub fn process_emission_intensity(&self) -> f64 {
        self.process_emission_intensity
    }

    /// Consumption categories
    pub fn categories(&self) -> &[ConsumptionCategory] {
        &self.categories
    }

    /// Names of the consumption categories
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(ConsumptionCategory::name).collect()
    }

    /// Grid electricity carbon intensity [kgCO2/GJ]
    pub fn grid_carbon_intensity(&self) -> Option<f64> {
        self.grid_carbon_intensity
    }

    /// Set the grid carbon intensity [kgCO2/GJ] and apply it to electricity and steam
    pub fn set_grid_carbon_intensity(&mut self, value: f64) {
        self.grid_carbon_intensity = Some(value);
        self.apply_grid_carbon_intensity();
    }

    fn apply_grid_carbon_intensity(&mut self) {
        let value = match self.grid_carbon_intensity {
            Some(value) => value,
            None => return,
        };
        let values: BTreeMap<FuelType, f64> =
            FuelType::GRID_FUELS.iter().map(|&f| (f, value)).collect();
        for category in &mut self.categories {
            category.set_emission_intensities(&values);
        }
    }

    /// Category with the given name, or `None` if not found
    pub fn get_category(&self, name: &str) -> Option<&ConsumptionCategory> {
        let category = self.categories.iter().find(|c| c.name() == name);
        if category.is_none() {
            warn!(
                "No category found matching category=`{}` for process=`{}`",
                name, self.name
            );
        }
        category
    }

    /// Override fuel emission factors [kgCO2/GJ] by category and fuel
    ///
    /// Unknown categories are reported and skipped.
    pub fn set_fuel_emission_intensities(
        &mut self,
        values: &BTreeMap<String, BTreeMap<FuelType, f64>>,
    ) {
        for (name, fuel_values) in values {
            match self.categories.iter_mut().find(|c| c.name() == name) {
                Some(category) => category.set_emission_intensities(fuel_values),
                None => warn!(
                    "No category found matching category=`{}` for process=`{}`",
                    name, self.name
                ),
            }
        }
    }

    /// Fuel emissions per tonne of all categories [kgCO2/tonne]
    pub fn total_fuel_emission_intensity(&self) -> f64 {
        let values: Vec<f64> = self
            .categories
            .iter()
            .map(ConsumptionCategory::total_emission_intensity)
            .collect();
        nansum(&values)
    }

    /// Fuel and process emissions per tonne [kgCO2/tonne]
    pub fn total_emission_intensity(&self) -> f64 {
        self.total_fuel_emission_intensity() + self.process_emission_intensity
    }

    /// Fuel emissions of all categories for the physical output [kgCO2]
    pub fn total_fuel_emissions(&self) -> f64 {
        let output = self.production.physical_output;
        let values: Vec<f64> = self
            .categories
            .iter()
            .map(|c| c.total_emissions(output))
            .collect();
        nansum(&values)
    }

    /// Process emissions for the physical output [kgCO2]
    pub fn total_process_emissions(&self) -> f64 {
        self.process_emission_intensity * self.production.physical_output
    }

    /// Fuel and process emissions [kgCO2]
    pub fn total_emissions(&self) -> f64 {
        self.total_fuel_emissions() + self.total_process_emissions()
    }

    /// Fuel demand per tonne of all categories [GJ/tonne]
    pub fn total_fuel_demand_intensity(&self) -> Result<f64> {
        let values = self
            .categories
            .iter()
            .map(ConsumptionCategory::total_demand_intensity)
            .collect::<Result<Vec<f64>>>()?;
        Ok(nansum(&values))
    }

    /// Fuel demand for the physical output [GJ]
    pub fn total_fuel_demand(&self) -> Result<f64> {
        Ok(self.total_fuel_demand_intensity()? * self.production.physical_output)
    }

    /// Emissions per tonne by category plus process emissions [kgCO2/tonne]
    pub fn emission_intensity_details(&self) -> Vec<CategoryValue> {
        self.categories
            .iter()
            .map(|c| CategoryValue {
                category: c.name().to_string(),
                value: c.total_emission_intensity(),
                unit: UNIT_EMISSION_INTENSITY.to_string(),
            })
            .chain(std::iter::once(CategoryValue {
                category: "Process emissions".to_string(),
                value: self.process_emission_intensity,
                unit: UNIT_EMISSION_INTENSITY.to_string(),
            }))
            .collect()
    }

    /// Fuel demand by fuel for one category (or all categories when `None`)
    ///
    /// `Relative` gives demand per tonne; `Absolute` multiplies it by the physical output.
    pub fn get_fuel_mix(&self, category: Option<&str>, method: FuelMixMethod) -> Vec<FuelMix> {
        let demand = self
            .categories
            .iter()
            .filter(|c| category.map(|name| c.name() == name).unwrap_or(true))
            .flat_map(ConsumptionCategory::demand_details)
            .map(FuelMix::from);
        let mix = FuelMix::aggregate(demand);
        match method {
            FuelMixMethod::Relative => mix,
            FuelMixMethod::Absolute => {
                let output = self.production.physical_output;
                mix.into_iter()
                    .map(|m| FuelMix::new(m.fuel, m.value * output, UNIT_DEMAND))
                    .collect()
            }
        }
    }

    /// Share of electricity in the fuel demand [-]
    ///
    /// Zero when the process uses no electricity, NaN when it has no fuel demand.
    pub fn electricity_share_of_demand(&self) -> Result<f64> {
        let electricity: f64 = self
            .get_fuel_mix(None, FuelMixMethod::Relative)
            .iter()
            .filter(|m| m.fuel == FuelType::Electricity)
            .map(|m| m.value)
            .sum();
        let total = self.total_fuel_demand_intensity()?;
        if total == 0.0 {
            return Ok(std::f64::NAN);
        }
        Ok(electricity / total)
    }

    /// Key indicators rounded to `rounding` decimals, with optional fuel breakdown
    pub fn get_summary(&self, rounding: u32, add_fuels: bool) -> Result<ProcessSummary> {
        let output = self.production.physical_output;
        let (fuel_demand_intensity, fuel_demand) = if add_fuels {
            let relative = self.get_fuel_mix(None, FuelMixMethod::Relative);
            let intensity = relative
                .iter()
                .map(|m| (m.fuel.to_string(), round_to(m.value, rounding)))
                .collect();
            let absolute = relative
                .iter()
                .map(|m| (m.fuel.to_string(), round_to(m.value * output, rounding)))
                .collect();
            (Some(intensity), Some(absolute))
        } else {
            (None, None)
        };
        Ok(ProcessSummary {
            physical_output: round_to(output, rounding),
            total_fuel_demand: round_to(self.total_fuel_demand()?, rounding),
            electricity_share: round_to(self.electricity_share_of_demand()? * 100.0, rounding),
            total_fuel_demand_intensity: round_to(self.total_fuel_demand_intensity()?, rounding),
            total_emissions: round_to(self.total_emissions(), rounding),
            total_emission_intensity: round_to(self.total_emission_intensity(), rounding),
            fuel_demand_intensity,
            fuel_demand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuels::{FuelConsumption, FuelEmissionFactors};
    use pretty_assertions::assert_eq;

    fn production(physical_output: f64) -> Production {
        Production {
            physical_output,
            unit: "tonne".into(),
            ..Default::default()
        }
    }

    fn category(name: &str, fuels: &[(&str, f64)]) -> ConsumptionCategory {
        let factors = FuelEmissionFactors::default();
        let fuels = fuels
            .iter()
            .map(|(f, v)| FuelConsumption::new(f, *v, "GJ/tonne", None, &factors).unwrap())
            .collect();
        ConsumptionCategory::new(name, fuels).unwrap()
    }

    #[test]
    fn production_capacity() {
        let p = Production {
            physical_output: 80.0,
            installed_capacity: 100.0,
            capacity_investment: 10.0,
            decommissioned_capacity: 5.0,
            idle_capacity: 20.0,
            unit: "kt".into(),
        };
        assert_eq!(p.capacity(), 85.0);
    }

    #[test]
    fn process_end_to_end() {
        let process = Process::new(
            "Electric arc",
            production(100.0),
            5.0,
            vec![category("Combustion", &[("Electricity", 2.0)])],
            Some(50.0),
        )
        .unwrap();
        assert_eq!(process.total_fuel_demand_intensity().unwrap(), 2.0);
        assert_eq!(process.total_fuel_demand().unwrap(), 200.0);
        assert_eq!(process.total_emission_intensity(), 2.0 * 50.0 + 5.0);
        assert_eq!(process.total_emissions(), 10_500.0);
        assert_eq!(process.electricity_share_of_demand().unwrap(), 1.0);
    }

    #[test]
    fn process_duplicated_categories() {
        let res = Process::new(
            "Cement",
            production(1.0),
            0.0,
            vec![
                category("Kilns", &[("Coke", 1.0)]),
                category("Kilns", &[("Solids", 1.0)]),
            ],
            None,
        );
        assert!(res.unwrap_err().is_validation());
    }

    #[test]
    fn process_grid_override_cascades() {
        let mut process = Process::new(
            "Paper production",
            production(10.0),
            0.0,
            vec![
                category("Drying", &[("Electricity", 1.0), ("Steam distributed", 2.0)]),
                category("Motors", &[("Electricity", 0.5), ("Natural gas", 0.1)]),
            ],
            None,
        )
        .unwrap();
        assert_eq!(process.grid_carbon_intensity(), None);
        process.set_grid_carbon_intensity(75.0);
        for cat in process.categories() {
            for fuel in cat.fuels() {
                if fuel.fuel().follows_grid() {
                    assert_eq!(fuel.emission_intensity(), Some(75.0));
                } else {
                    assert_ne!(fuel.emission_intensity(), Some(75.0));
                }
            }
        }
        let first = process.total_emissions();
        process.set_grid_carbon_intensity(75.0);
        assert_eq!(process.total_emissions(), first);
        process.set_grid_carbon_intensity(0.0);
        assert!(process.total_emissions() < first);
    }

    #[test]
    fn process_fuel_mix() {
        let process = Process::new(
            "Integrated steelworks",
            production(10.0),
            0.0,
            vec![
                category("Blast furnace", &[("Coke", 10.0), ("Electricity", 1.0)]),
                category("Rolling", &[("Electricity", 0.5), ("Natural gas", 1.5)]),
            ],
            Some(100.0),
        )
        .unwrap();
        let relative = process.get_fuel_mix(None, FuelMixMethod::Relative);
        assert_eq!(
            relative,
            vec![
                FuelMix::new(FuelType::Electricity, 1.5, "GJ/tonne"),
                FuelMix::new(FuelType::NaturalGas, 1.5, "GJ/tonne"),
                FuelMix::new(FuelType::Coke, 10.0, "GJ/tonne"),
            ]
        );
        let absolute = process.get_fuel_mix(Some("Rolling"), FuelMixMethod::Absolute);
        assert_eq!(
            absolute,
            vec![
                FuelMix::new(FuelType::Electricity, 5.0, "GJ"),
                FuelMix::new(FuelType::NaturalGas, 15.0, "GJ"),
            ]
        );
        assert!(process.get_fuel_mix(Some("Unknown"), FuelMixMethod::Relative).is_empty());
        assert_eq!(process.electricity_share_of_demand().unwrap(), 1.5 / 13.0);
    }

    #[test]
    fn process_electricity_share_edge_cases() {
        let no_demand = Process::new("Empty", production(1.0), 0.0, vec![], None).unwrap();
        assert!(no_demand.electricity_share_of_demand().unwrap().is_nan());
        let no_elec = Process::new(
            "Kiln",
            production(1.0),
            0.0,
            vec![category("Kilns", &[("Coke", 1.0)])],
            None,
        )
        .unwrap();
        assert_eq!(no_elec.electricity_share_of_demand().unwrap(), 0.0);
    }

    #[test]
    fn process_lookup_and_details() {
        let mut process = Process::new(
            "Cement",
            production(2.0),
            500.0,
            vec![category("Kilns", &[("Solids", 1.0)])],
            None,
        )
        .unwrap();
        assert!(process.get_category("Kilns").is_some());
        assert!(process.get_category("Grinding").is_none());
        let mut values = BTreeMap::new();
        let mut fuels = BTreeMap::new();
        fuels.insert(FuelType::Solids, 90.0);
        values.insert("Kilns".to_string(), fuels);
        values.insert("Grinding".to_string(), BTreeMap::new());
        process.set_fuel_emission_intensities(&values);
        let details = process.emission_intensity_details();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].value, 90.0);
        assert_eq!(details[1].category, "Process emissions");
        assert_eq!(details[1].value, 500.0);
        assert_eq!(process.total_process_emissions(), 1000.0);
        assert_eq!(process.total_fuel_emissions(), 180.0);
    }

    #[test]
    fn process_summary() {
        let process = Process::new(
            "Electric arc",
            production(3.0),
            0.0,
            vec![category("Furnace", &[("Electricity", 1.0), ("Natural gas", 2.0)])],
            Some(10.0),
        )
        .unwrap();
        let summary = process.get_summary(2, true).unwrap();
        assert_eq!(summary.physical_output, 3.0);
        assert_eq!(summary.total_fuel_demand, 9.0);
        assert_eq!(summary.electricity_share, 33.33);
        let fuels = summary.fuel_demand.unwrap();
        assert_eq!(fuels.get("Natural gas"), Some(&6.0));
        let summary = process.get_summary(2, false).unwrap();
        assert!(summary.fuel_demand_intensity.is_none());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["Total fuel demand intensity (GJ/tonne)"], 3.0);
        assert_eq!(json["Total fuel demand (GJ)"], 9.0);
        assert!(json.get("Fuel demand (GJ)").is_none());
        assert!(json.get("Total fuel demand intensity (GJ)").is_none());
        let json = serde_json::to_value(&process.get_summary(2, true).unwrap()).unwrap();
        assert_eq!(json["Fuel demand (GJ)"]["Natural gas"], 6.0);
        assert_eq!(json["Fuel demand intensity (GJ/tonne)"]["Natural gas"], 2.0);
    }

    #[test]
    fn fuel_mix_method_parse() {
        assert_eq!("absolute".parse::<FuelMixMethod>().unwrap(), FuelMixMethod::Absolute);
        assert!("total".parse::<FuelMixMethod>().is_err());
    }
}
