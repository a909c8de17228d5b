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
Result records
==============

Plain records returned by the query API. All of them serialize to flat JSON objects.
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FuelCategory, FuelType};
use crate::vecops::nansum;

// ==================== Units

/// Fuel demand per tonne of product
pub const UNIT_DEMAND_INTENSITY: &str = "GJ/tonne";
/// Absolute fuel demand
pub const UNIT_DEMAND: &str = "GJ";
/// Absolute emissions
pub const UNIT_EMISSIONS: &str = "kgCO2";
/// Emissions per tonne of product
pub const UNIT_EMISSION_INTENSITY: &str = "kgCO2/tonne";
/// Emissions per unit of fuel energy
pub const UNIT_FUEL_EMISSION_FACTOR: &str = "kgCO2/GJ";

// ==================== Records

/// Demand of a fuel within a consumption category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelDemand {
    /// Consumption category name
    pub category: String,
    /// Fuel
    pub fuel: FuelType,
    /// Demand value
    pub value: f64,
    /// Demand unit
    pub unit: String,
}

/// Demand of a fuel aggregated over categories, processes or sub-sectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelMix {
    /// Fuel category
    pub fuel_class: FuelCategory,
    /// Fuel
    pub fuel: FuelType,
    /// Demand value
    pub value: f64,
    /// Demand unit
    pub unit: String,
}

impl FuelMix {
    /// Constructor (fuel class derived from the fuel)
    pub fn new<T: Into<String>>(fuel: FuelType, value: f64, unit: T) -> Self {
        Self {
            fuel_class: fuel.category(),
            fuel,
            value,
            unit: unit.into(),
        }
    }

    /// Group records by fuel class, fuel and unit, adding up values (NaN values are skipped)
    ///
    /// Output is sorted by fuel class, fuel and unit.
    pub fn aggregate<I>(items: I) -> Vec<FuelMix>
    where
        I: IntoIterator<Item = FuelMix>,
    {
        let mut groups: BTreeMap<(FuelCategory, FuelType, String), Vec<f64>> = BTreeMap::new();
        for item in items {
            groups
                .entry((item.fuel_class, item.fuel, item.unit))
                .or_insert_with(Vec::new)
                .push(item.value);
        }
        groups
            .into_iter()
            .map(|((fuel_class, fuel, unit), values)| FuelMix {
                fuel_class,
                fuel,
                value: nansum(&values),
                unit,
            })
            .collect()
    }
}

impl From<FuelDemand> for FuelMix {
    fn from(demand: FuelDemand) -> Self {
        FuelMix::new(demand.fuel, demand.value, demand.unit)
    }
}

/// Value of an indicator for a consumption category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    /// Consumption category name
    pub category: String,
    /// Value
    pub value: f64,
    /// Unit
    pub unit: String,
}

/// Value of an indicator for a sub-sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSectorValue {
    /// Sub-sector name
    pub sub_sector: String,
    /// Value
    pub value: f64,
    /// Unit
    pub unit: String,
}

impl SubSectorValue {
    /// Constructor
    pub fn new<T: Into<String>, U: Into<String>>(sub_sector: T, value: f64, unit: U) -> Self {
        Self {
            sub_sector: sub_sector.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Result of a country query
///
/// A query without sub-sector gives a breakdown by sub-sector, a query for a sub-sector or one
/// of its processes gives a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    /// Single value
    Value(f64),
    /// Values by sub-sector
    BySubSector(Vec<SubSectorValue>),
}

impl Metric {
    /// Single value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::BySubSector(_) => None,
        }
    }

    /// Breakdown by sub-sector, if any
    pub fn by_sub_sector(&self) -> Option<&[SubSectorValue]> {
        match self {
            Metric::Value(_) => None,
            Metric::BySubSector(values) => Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fuel_mix_aggregate() {
        let items = vec![
            FuelMix::new(FuelType::NaturalGas, 2.0, "GJ"),
            FuelMix::new(FuelType::Electricity, 1.0, "GJ"),
            FuelMix::new(FuelType::NaturalGas, 3.0, "GJ"),
            FuelMix::new(FuelType::Electricity, std::f64::NAN, "GJ"),
        ];
        let res = FuelMix::aggregate(items);
        assert_eq!(
            res,
            vec![
                FuelMix::new(FuelType::Electricity, 1.0, "GJ"),
                FuelMix::new(FuelType::NaturalGas, 5.0, "GJ"),
            ]
        );
    }

    #[test]
    fn fuel_mix_keeps_units_apart() {
        let items = vec![
            FuelMix::new(FuelType::Coke, 2.0, "GJ"),
            FuelMix::new(FuelType::Coke, 3.0, "GJ/tonne"),
        ];
        assert_eq!(FuelMix::aggregate(items).len(), 2);
    }

    #[test]
    fn metric_json() {
        let value = Metric::Value(1.5);
        assert_eq!(serde_json::to_string(&value).unwrap(), "1.5");
        let list = Metric::BySubSector(vec![SubSectorValue::new("Iron and steel", 2.0, "kgCO2")]);
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"[{"sub_sector":"Iron and steel","value":2.0,"unit":"kgCO2"}]"#
        );
        assert_eq!(list.value(), None);
        assert_eq!(list.by_sub_sector().map(|v| v.len()), Some(1));
    }
}
