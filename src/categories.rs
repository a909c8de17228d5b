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
Consumption categories
======================

A consumption category groups the fuel demand of one use inside a process (e.g. `Blast furnace`,
`Product finishing`), with a single entry per fuel.
*/

use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;
use serde::Serialize;

use crate::{
    error::{ensure_unique, EurError, Result},
    fuels::FuelConsumption,
    types::{FuelDemand, FuelType},
    vecops::nansum,
};

/// Fuel demand of a consumption category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionCategory {
    name: String,
    fuels: Vec<FuelConsumption>,
}

impl ConsumptionCategory {
    /// Constructor
    ///
    /// Fails when a fuel type appears more than once.
    pub fn new<T: Into<String>>(name: T, fuels: Vec<FuelConsumption>) -> Result<Self> {
        let name = name.into();
        ensure_unique("fuel", &name, fuels.iter().map(|f| f.fuel()))?;
        Ok(Self { name, fuels })
    }

    /// Category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fuels in the category
    pub fn fuels(&self) -> &[FuelConsumption] {
        &self.fuels
    }

    /// Fuel types in the category
    pub fn fuel_types(&self) -> Vec<FuelType> {
        self.fuels.iter().map(FuelConsumption::fuel).collect()
    }

    /// Fuel of the given type, or `None` when the category doesn't use it
    pub fn get_fuel(&self, fuel_type: FuelType) -> Option<&FuelConsumption> {
        let fuel = self.fuels.iter().find(|f| f.fuel() == fuel_type);
        if fuel.is_none() {
            warn!(
                "No fuel found matching fuel_type=`{}` for category=`{}`",
                fuel_type, self.name
            );
        }
        fuel
    }

    /// Override emission factors [kgCO2/GJ] of the fuels in the map
    ///
    /// Fuels in the map but not in the category are skipped.
    pub fn set_emission_intensities(&mut self, values: &BTreeMap<FuelType, f64>) {
        for fuel in &mut self.fuels {
            if let Some(value) = values.get(&fuel.fuel()) {
                fuel.set_emission_intensity(*value);
            }
        }
    }

    /// Emissions per tonne of product of all fuels [kgCO2/tonne]
    ///
    /// Fuels without emission factor don't contribute.
    pub fn total_emission_intensity(&self) -> f64 {
        let values: Vec<f64> = self
            .fuels
            .iter()
            .map(FuelConsumption::emission_intensity_per_tonne)
            .collect();
        nansum(&values)
    }

    /// Total emissions of all fuels for a production [kgCO2]
    pub fn total_emissions(&self, production: f64) -> f64 {
        let values: Vec<f64> = self
            .fuels
            .iter()
            .map(|f| f.total_emissions(production))
            .collect();
        nansum(&values)
    }

    /// Total fuel demand per tonne of product [GJ/tonne]
    ///
    /// Fails when fuels are expressed in different units. An empty category has no demand.
    pub fn total_demand_intensity(&self) -> Result<f64> {
        let units: Vec<&str> = self.fuels.iter().map(FuelConsumption::unit).unique().collect();
        if units.len() > 1 {
            return Err(EurError::MixedUnits(self.name.clone()));
        }
        let values: Vec<f64> = self.fuels.iter().map(FuelConsumption::value).collect();
        Ok(nansum(&values))
    }

    /// Demand by fuel
    pub fn demand_details(&self) -> Vec<FuelDemand> {
        self.fuels
            .iter()
            .map(|f| FuelDemand {
                category: self.name.clone(),
                fuel: f.fuel(),
                value: f.value(),
                unit: f.unit().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuels::FuelEmissionFactors;
    use pretty_assertions::assert_eq;

    fn fuel(name: &str, value: f64, ei: Option<f64>) -> FuelConsumption {
        FuelConsumption::new(name, value, "GJ/tonne", ei, &FuelEmissionFactors::empty()).unwrap()
    }

    #[test]
    fn category_duplicated_fuels() {
        let res = ConsumptionCategory::new(
            "Kilns",
            vec![
                fuel("Coke", 1.0, Some(100.0)),
                fuel("Coke", 2.0, Some(100.0)),
            ],
        );
        match res {
            Err(EurError::Duplicated { kind, owner, key }) => {
                assert_eq!(kind, "fuel");
                assert_eq!(owner, "Kilns");
                assert_eq!(key, "Coke");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn category_totals() {
        let cat = ConsumptionCategory::new(
            "Kilns",
            vec![
                fuel("Coke", 2.0, Some(100.0)),
                fuel("Natural gas", 1.0, Some(56.0)),
                fuel("Biomass", 4.0, None),
            ],
        )
        .unwrap();
        assert_eq!(cat.total_emission_intensity(), 2.0 * 100.0 + 1.0 * 56.0);
        assert_eq!(cat.total_emissions(10.0), 20.0 * 100.0 + 10.0 * 56.0);
        assert_eq!(cat.total_demand_intensity().unwrap(), 7.0);
        assert_eq!(cat.demand_details().len(), 3);
        assert_eq!(cat.demand_details()[2].fuel, FuelType::Biomass);
        assert_eq!(cat.demand_details()[2].category, "Kilns");
    }

    #[test]
    fn category_empty_and_single() {
        let empty = ConsumptionCategory::new("Empty", vec![]).unwrap();
        assert_eq!(empty.total_emission_intensity(), 0.0);
        assert_eq!(empty.total_demand_intensity().unwrap(), 0.0);
        let single = ConsumptionCategory::new("One", vec![fuel("Solids", 3.0, Some(90.0))]).unwrap();
        assert_eq!(single.total_emission_intensity(), 270.0);
    }

    #[test]
    fn category_lookup() {
        let cat = ConsumptionCategory::new("Kilns", vec![fuel("Coke", 2.0, None)]).unwrap();
        assert_eq!(cat.get_fuel(FuelType::Coke).map(|f| f.value()), Some(2.0));
        assert!(cat.get_fuel(FuelType::Electricity).is_none());
        assert_eq!(cat.fuel_types(), vec![FuelType::Coke]);
    }

    #[test]
    fn category_set_emission_intensities() {
        let mut cat = ConsumptionCategory::new(
            "Motors",
            vec![fuel("Electricity", 1.0, None), fuel("Natural gas", 1.0, Some(56.0))],
        )
        .unwrap();
        let mut values = BTreeMap::new();
        values.insert(FuelType::Electricity, 80.0);
        values.insert(FuelType::SteamDistributed, 80.0);
        cat.set_emission_intensities(&values);
        assert_eq!(
            cat.get_fuel(FuelType::Electricity).unwrap().emission_intensity(),
            Some(80.0)
        );
        assert_eq!(
            cat.get_fuel(FuelType::NaturalGas).unwrap().emission_intensity(),
            Some(56.0)
        );
        assert_eq!(cat.fuels().len(), 2);
    }
}
