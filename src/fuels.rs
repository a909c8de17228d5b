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
Fuel consumption
================

Fuel demand of a product (per tonne of physical output) and the emission factors used to turn
that demand into CO2 emissions.

Emission factors are expressed in kgCO2/GJ of fuel. Default values are derived from the
IPCC 2006 default carbon contents (kgC/GJ) using the CO2/C molecular weight ratio (44/12).
*/

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::{
    error::{EurError, Result},
    types::{FuelType, UNIT_DEMAND_INTENSITY},
};

/// Ratio of molecular weights of CO2 and C
pub const CARBON_TO_CO2: f64 = 44.0 / 12.0;

/// Default carbon content of fuels [kgC/GJ]
///
/// Electricity and distributed steam are left out: their factor comes from the grid carbon
/// intensity. Biomass and solar heat are accounted as carbon neutral and have no entry.
pub const DEFAULT_CARBON_CONTENT: [(FuelType, f64); 12] = [
    (FuelType::DieselOil, 20.2),
    (FuelType::Lpg, 17.2),
    (FuelType::Naphtha, 20.0),
    (FuelType::NaturalGas, 15.3),
    (FuelType::OtherLiquids, 20.0),
    (FuelType::RefineryGas, 15.7),
    (FuelType::ResidualFuelOil, 21.1),
    (FuelType::Solids, 25.8),
    (FuelType::DieselOilInclBiofuels, 20.2),
    (FuelType::NaturalGasInclBiogas, 15.3),
    (FuelType::DerivedGases, 12.1),
    (FuelType::Coke, 29.2),
];

// -------------------- Emission factors

/// Default emission factors of fuels [kgCO2/GJ]
///
/// Built once and passed explicitly to every fuel consumption constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelEmissionFactors {
    factors: BTreeMap<FuelType, f64>,
}

impl Default for FuelEmissionFactors {
    fn default() -> Self {
        Self::from_carbon_values(DEFAULT_CARBON_CONTENT.iter().cloned())
    }
}

impl FuelEmissionFactors {
    /// Table without any factor
    pub fn empty() -> Self {
        Self {
            factors: BTreeMap::new(),
        }
    }

    fn from_carbon_values<I: IntoIterator<Item = (FuelType, f64)>>(values: I) -> Self {
        let factors = values
            .into_iter()
            .map(|(fuel, carbon)| (fuel, carbon * CARBON_TO_CO2))
            .collect();
        Self { factors }
    }

    /// Read factors from a carbon content table [kgC/GJ]
    ///
    /// One `fuel, carbon_content` pair per line. Empty lines, comments (`#`) and the header
    /// line (starting with `fuel,`) are skipped.
    pub fn from_carbon_content(s: &str) -> Result<Self> {
        let s_nobom = s.trim_start_matches('\u{feff}');
        let values = s_nobom
            .lines()
            .map(str::trim)
            .filter(|l| !(l.is_empty() || l.starts_with('#') || l.starts_with("fuel,")))
            .map(|l| {
                let items: Vec<&str> = l.rsplitn(2, ',').map(str::trim).collect();
                if items.len() != 2 {
                    return Err(EurError::ParseError(l.into()));
                }
                let carbon: f64 = items[0].parse()?;
                let fuel: FuelType = items[1].parse()?;
                Ok((fuel, carbon))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_carbon_values(values))
    }

    /// Emission factor of a fuel [kgCO2/GJ]
    pub fn get(&self, fuel: FuelType) -> Option<f64> {
        self.factors.get(&fuel).cloned()
    }

    /// Set the emission factor of a fuel [kgCO2/GJ]
    pub fn set(&mut self, fuel: FuelType, value: f64) {
        self.factors.insert(fuel, value);
    }
}

// -------------------- Fuel consumption

/// Demand of a fuel per tonne of product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelConsumption {
    fuel: FuelType,
    /// Demand [GJ/tonne]
    value: f64,
    unit: String,
    /// Fuel emission factor [kgCO2/GJ]
    emission_intensity: Option<f64>,
}

impl FuelConsumption {
    /// Constructor
    ///
    /// The fuel name must be one of the known fuels and the unit must be `GJ/tonne`.
    /// Without an explicit emission factor the default for the fuel is taken from `factors`.
    pub fn new(
        fuel: &str,
        value: f64,
        unit: &str,
        emission_intensity: Option<f64>,
        factors: &FuelEmissionFactors,
    ) -> Result<Self> {
        if unit != UNIT_DEMAND_INTENSITY {
            return Err(EurError::UnitUnsupported {
                unit: unit.into(),
                expected: UNIT_DEMAND_INTENSITY,
            });
        }
        let fuel: FuelType = fuel.parse()?;
        let emission_intensity = emission_intensity.or_else(|| factors.get(fuel));
        if emission_intensity.is_none() {
            debug!("No default emission factor for fuel `{}`", fuel);
        }
        Ok(Self {
            fuel,
            value,
            unit: unit.into(),
            emission_intensity,
        })
    }

    /// Fuel type
    pub fn fuel(&self) -> FuelType {
        self.fuel
    }

    /// Demand per tonne of product [GJ/tonne]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Demand unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Fuel emission factor [kgCO2/GJ]
    pub fn emission_intensity(&self) -> Option<f64> {
        self.emission_intensity
    }

    /// Override the fuel emission factor [kgCO2/GJ]
    pub fn set_emission_intensity(&mut self, value: f64) {
        self.emission_intensity = Some(value);
    }

    /// Emissions per tonne of product [kgCO2/tonne]
    ///
    /// NaN when the fuel has no emission factor.
    pub fn emission_intensity_per_tonne(&self) -> f64 {
        self.value * self.emission_intensity.unwrap_or(std::f64::NAN)
    }

    /// Total fuel demand for a production [GJ]
    pub fn total_consumption(&self, production: f64) -> f64 {
        self.value * production
    }

    /// Total emissions for a production [kgCO2]
    pub fn total_emissions(&self, production: f64) -> f64 {
        self.total_consumption(production) * self.emission_intensity.unwrap_or(std::f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fuel_consumption_totals() {
        let factors = FuelEmissionFactors::default();
        let fuel = FuelConsumption::new("Natural gas", 2.5, "GJ/tonne", Some(56.0), &factors).unwrap();
        assert_eq!(fuel.total_consumption(10.0), 25.0);
        assert_eq!(fuel.emission_intensity_per_tonne(), 2.5 * 56.0);
        for &p in &[0.0, 1.0, 10.0, 1234.5] {
            assert_eq!(fuel.total_emissions(p), 2.5 * p * 56.0);
        }
    }

    #[test]
    fn fuel_consumption_default_factor() {
        let factors = FuelEmissionFactors::default();
        let gas = FuelConsumption::new("Natural gas", 1.0, "GJ/tonne", None, &factors).unwrap();
        assert_eq!(gas.emission_intensity(), Some(15.3 * CARBON_TO_CO2));
        let elec = FuelConsumption::new("Electricity", 1.0, "GJ/tonne", None, &factors).unwrap();
        assert_eq!(elec.emission_intensity(), None);
        assert!(elec.emission_intensity_per_tonne().is_nan());
    }

    #[test]
    fn fuel_consumption_override() {
        let factors = FuelEmissionFactors::empty();
        let mut elec = FuelConsumption::new("Electricity", 2.0, "GJ/tonne", None, &factors).unwrap();
        elec.set_emission_intensity(50.0);
        assert_eq!(elec.emission_intensity(), Some(50.0));
        assert_eq!(elec.total_emissions(100.0), 10_000.0);
    }

    #[test]
    fn fuel_consumption_validation() {
        let factors = FuelEmissionFactors::default();
        let err = FuelConsumption::new("Natural gas", 1.0, "GJ", None, &factors).unwrap_err();
        assert!(err.is_validation());
        match FuelConsumption::new("Plutonium", 1.0, "GJ/tonne", None, &factors) {
            Err(EurError::FuelUnknown(name)) => assert_eq!(name, "Plutonium"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn emission_factors_from_carbon_content() {
        let table = "fuel, carbon_content
# IPCC 2006
Natural gas, 15.3
Coke, 29.2
";
        let factors = FuelEmissionFactors::from_carbon_content(table).unwrap();
        assert_eq!(factors.get(FuelType::NaturalGas), Some(15.3 * CARBON_TO_CO2));
        assert_eq!(factors.get(FuelType::Coke), Some(29.2 * CARBON_TO_CO2));
        assert_eq!(factors.get(FuelType::Solids), None);
        assert!(FuelEmissionFactors::from_carbon_content("Uranium, 1.0").is_err());
        assert!(FuelEmissionFactors::from_carbon_content("Coke; 1.0").is_err());
    }
}
