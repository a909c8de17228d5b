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
Plain text output
=================

Compact text report of a country model and of a scenario comparison.
*/

use std::fmt::Display;

use crate::{countries::Country, delta::DeltaCountry, types::FuelMix};

/// Show in plain text format
pub trait AsPlain {
    /// Get in plain format
    fn to_plain(&self) -> String;
}

/// Show a value with 2 decimals, or a dash when it is not defined (NaN)
fn value_or_dash(v: f64) -> String {
    if v.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}", v)
    }
}

fn to_key_value_list<K: Display, I: IntoIterator<Item = (K, f64)>>(items: I) -> String {
    let entries = items
        .into_iter()
        .map(|(k, v)| format!("- {}: {}", k, value_or_dash(v)))
        .collect::<Vec<String>>();
    if entries.is_empty() {
        "-".to_string()
    } else {
        entries.join("\n")
    }
}

fn fuel_list(items: &[FuelMix]) -> String {
    to_key_value_list(items.iter().map(|d| {
        let class = d.fuel_class.as_ref();
        let label = if class.is_empty() {
            d.fuel.to_string()
        } else {
            format!("{} ({})", d.fuel, class)
        };
        (label, d.value)
    }))
}

fn country_label(country: &Country) -> String {
    match country.country_name() {
        Some(name) => format!("{} ({})", name, country.iso2()),
        None => country.iso2().to_string(),
    }
}

impl AsPlain for Country {
    fn to_plain(&self) -> String {
        let label = country_label(self);
        let grid = value_or_dash(self.grid_carbon_intensity());
        let emissions = value_or_dash(self.total_emissions());
        let demand = value_or_dash(self.total_fuel_demand());

        let emissions_by_sub = to_key_value_list(
            self.sub_sectors()
                .iter()
                .map(|s| (s.name(), s.total_emissions())),
        );
        let intensity_by_sub = to_key_value_list(self.emission_intensity_by_sub_sector());
        let demand_by_sub = to_key_value_list(
            self.get_total_fuel_demand_all_sub_sectors()
                .into_iter()
                .map(|v| (v.sub_sector, v.value)),
        );
        let demand_by_fuel = fuel_list(&self.get_total_fuel_demand(None));

        format!(
            "** Country: {label}

Grid carbon intensity [kgCO2/GJ]: {grid}
Total emissions [kgCO2]: {emissions}
Total fuel demand [GJ]: {demand}

** Emissions by sub-sector [kgCO2]:
{emissions_by_sub}

** Emission intensity by sub-sector [kgCO2/tonne]:
{intensity_by_sub}

** Fuel demand by sub-sector [GJ]:
{demand_by_sub}

** Fuel demand by fuel [GJ]:
{demand_by_fuel}
"
        )
    }
}

impl<'a> AsPlain for DeltaCountry<'a> {
    fn to_plain(&self) -> String {
        let label = country_label(self.country1());
        let grid1 = value_or_dash(self.country1().grid_carbon_intensity());
        let grid2 = value_or_dash(self.country2().grid_carbon_intensity());
        let delta = value_or_dash(self.delta_emissions());

        let emissions_by_sub = to_key_value_list(
            self.delta_emissions_by_sub_sector()
                .into_iter()
                .map(|v| (v.sub_sector, v.value)),
        );
        let intensity_by_sub = to_key_value_list(self.delta_emission_intensity_by_sub_sector());
        let demand_by_fuel = fuel_list(&self.delta_fuel_demand_by_sub_sector());

        format!(
            "** Scenario comparison: {label}

Grid carbon intensity [kgCO2/GJ]: {grid1} -> {grid2}
Delta emissions [kgCO2]: {delta}

** Delta emissions by sub-sector [kgCO2]:
{emissions_by_sub}

** Delta emission intensity by sub-sector [kgCO2/tonne]:
{intensity_by_sub}

** Delta fuel demand by fuel [GJ]:
{demand_by_fuel}
"
        )
    }
}
