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
Scenario comparison
===================

Differences between two snapshots of the same country (`side 2 - side 1`), usually the composed
country and a copy under another grid carbon intensity.
*/

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{
    countries::Country,
    types::{FuelCategory, FuelMix, FuelType, Metric, SubSectorValue},
};

/// Comparison of two snapshots of a country
#[derive(Debug, Clone, Serialize)]
pub struct DeltaCountry<'a> {
    country1: Cow<'a, Country>,
    country2: Cow<'a, Country>,
}

impl<'a> DeltaCountry<'a> {
    /// Compare two existing snapshots
    pub fn new(country1: &'a Country, country2: &'a Country) -> Self {
        Self {
            country1: Cow::Borrowed(country1),
            country2: Cow::Borrowed(country2),
        }
    }

    /// Compare a country with a copy of itself using another grid carbon intensity [kgCO2/GJ]
    pub fn with_grid_carbon_intensity(country: &'a Country, value: f64) -> Self {
        let mut scenario = country.clone();
        scenario.set_grid_carbon_intensity(value);
        Self {
            country1: Cow::Borrowed(country),
            country2: Cow::Owned(scenario),
        }
    }

    /// Reference snapshot
    pub fn country1(&self) -> &Country {
        &self.country1
    }

    /// Alternative snapshot
    pub fn country2(&self) -> &Country {
        &self.country2
    }

    /// Difference of total emissions [kgCO2]
    pub fn delta_emissions(&self) -> f64 {
        self.country2.total_emissions() - self.country1.total_emissions()
    }

    /// Difference of emissions by sub-sector [kgCO2]
    ///
    /// Only sub-sectors present in both snapshots with the same unit are reported.
    pub fn delta_emissions_by_sub_sector(&self) -> Vec<SubSectorValue> {
        let side1 = by_sub_sector(self.country1.get_total_emissions(None, None));
        let side2 = by_sub_sector(self.country2.get_total_emissions(None, None));
        let lookup: HashMap<(&str, &str), f64> = side1
            .iter()
            .map(|v| ((v.sub_sector.as_str(), v.unit.as_str()), v.value))
            .collect();
        side2
            .iter()
            .filter_map(|v| {
                lookup
                    .get(&(v.sub_sector.as_str(), v.unit.as_str()))
                    .map(|v1| SubSectorValue::new(v.sub_sector.as_str(), v.value - v1, v.unit.as_str()))
            })
            .collect()
    }

    /// Difference of emission intensity by sub-sector [kgCO2/tonne]
    pub fn delta_emission_intensity_by_sub_sector(&self) -> BTreeMap<String, f64> {
        let side1 = self.country1.emission_intensity_by_sub_sector();
        self.country2
            .emission_intensity_by_sub_sector()
            .into_iter()
            .filter_map(|(name, v2)| side1.get(&name).map(|v1| (name, v2 - v1)))
            .collect()
    }

    /// Difference of total fuel demand by fuel [GJ]
    ///
    /// Fuels are matched on fuel class, fuel and unit.
    pub fn delta_fuel_demand_by_sub_sector(&self) -> Vec<FuelMix> {
        let side1: HashMap<(FuelCategory, FuelType, String), f64> = self
            .country1
            .get_total_fuel_demand(None)
            .into_iter()
            .map(|d| ((d.fuel_class, d.fuel, d.unit), d.value))
            .collect();
        self.country2
            .get_total_fuel_demand(None)
            .into_iter()
            .filter_map(|d| {
                side1
                    .get(&(d.fuel_class, d.fuel, d.unit.clone()))
                    .map(|v1| FuelMix {
                        value: d.value - v1,
                        ..d
                    })
            })
            .collect()
    }
}

fn by_sub_sector(metric: Option<Metric>) -> Vec<SubSectorValue> {
    match metric {
        Some(Metric::BySubSector(values)) => values,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ConsumptionCategory;
    use crate::fuels::{FuelConsumption, FuelEmissionFactors};
    use crate::processes::{Process, Production};
    use crate::sectors::SubSector;
    use pretty_assertions::assert_eq;

    fn country() -> Country {
        let factors = FuelEmissionFactors::default();
        let fuels = vec![
            FuelConsumption::new("Electricity", 2.0, "GJ/tonne", None, &factors).unwrap(),
            FuelConsumption::new("Natural gas", 1.0, "GJ/tonne", Some(50.0), &factors).unwrap(),
        ];
        let category = ConsumptionCategory::new("Process heat", fuels).unwrap();
        let production = Production {
            physical_output: 100.0,
            ..Default::default()
        };
        let process = Process::new("Electric arc", production, 5.0, vec![category], Some(50.0)).unwrap();
        let sub_sector = SubSector::new("Iron and steel", vec![process]).unwrap();
        Country::with_sub_sectors("DE", vec![sub_sector]).unwrap()
    }

    #[test]
    fn delta_same_country_is_zero() {
        let c = country();
        let delta = DeltaCountry::new(&c, &c);
        assert_eq!(delta.delta_emissions(), 0.0);
        assert_eq!(
            delta.delta_emissions_by_sub_sector(),
            vec![SubSectorValue::new("Iron and steel", 0.0, "kgCO2")]
        );
    }

    #[test]
    fn delta_grid_scenario_is_not_collapsed() {
        let c = country();
        let delta = DeltaCountry::with_grid_carbon_intensity(&c, 0.0);
        // the reference snapshot is untouched
        assert_eq!(delta.country1().grid_carbon_intensity(), 50.0);
        assert_eq!(delta.country2().grid_carbon_intensity(), 0.0);
        // 2 GJ/t * 50 kgCO2/GJ * 100 t
        assert_eq!(delta.delta_emissions(), -10000.0);
        assert_eq!(
            delta.delta_emissions_by_sub_sector(),
            vec![SubSectorValue::new("Iron and steel", -10000.0, "kgCO2")]
        );
        assert_eq!(delta.delta_emission_intensity_by_sub_sector()["Iron and steel"], -100.0);
        // the grid does not change demand
        let demand = delta.delta_fuel_demand_by_sub_sector();
        assert_eq!(demand.len(), 2);
        assert!(demand.iter().all(|d| d.value == 0.0));
    }

    #[test]
    fn delta_inner_join() {
        let c1 = country();
        let c2 = Country::new("DE");
        let delta = DeltaCountry::new(&c1, &c2);
        assert!(delta.delta_emissions_by_sub_sector().is_empty());
        assert!(delta.delta_emission_intensity_by_sub_sector().is_empty());
        assert!(delta.delta_fuel_demand_by_sub_sector().is_empty());
        assert_eq!(delta.delta_emissions(), -c1.total_emissions());
    }
}
