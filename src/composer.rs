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
Composer
========

Builds a country model from the normalized demand, activity and emission tables and the grid
carbon intensity table.

For every sub-sector and process found in the demand table for a country and year:

- production data comes from the activity rows of the process
- the process emission intensity comes from the emission table (0 when missing)
- each demand category becomes a consumption category with one fuel per row
- the grid carbon intensity of the country and year is applied to electricity and steam
*/

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    categories::ConsumptionCategory,
    countries::{Country, CountryCollection},
    error::{EurError, Result},
    fuels::{FuelConsumption, FuelEmissionFactors},
    processes::{Process, Production},
    sectors::SubSector,
    tables::{GridIntensityTable, TableRow},
    types::SubSectorType,
};

/// Demand table variable with the fuel demand per tonne of product
pub const DEMAND_VARIABLE: &str = "final energy consumption intensity";
/// Emission table category of process emissions
pub const PROCESS_EMISSIONS_CATEGORY: &str = "Process emissions";
/// Emission table variable of process emissions per tonne of product
pub const PROCESS_EMISSIONS_VARIABLE: &str = "CO2 emissions intensity";

// Activity table variables
const PHYSICAL_OUTPUT: &str = "Physical output";
const INSTALLED_CAPACITY: &str = "Installed capacity";
const CAPACITY_INVESTMENT: &str = "Capacity investment";
const DECOMMISSIONED_CAPACITY: &str = "Decommissioned capacity";
const IDLE_CAPACITY: &str = "Idle capacity";

// Demand rows of a process grouped by category
type CategoryRows<'r> = BTreeMap<&'r str, Vec<&'r TableRow>>;

/// Country model builder over a set of input tables
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    demand: &'a [TableRow],
    activity: &'a [TableRow],
    emission: &'a [TableRow],
    grid: &'a GridIntensityTable,
    factors: &'a FuelEmissionFactors,
}

impl<'a> Composer<'a> {
    /// Constructor
    pub fn new(
        demand: &'a [TableRow],
        activity: &'a [TableRow],
        emission: &'a [TableRow],
        grid: &'a GridIntensityTable,
        factors: &'a FuelEmissionFactors,
    ) -> Self {
        Self {
            demand,
            activity,
            emission,
            grid,
            factors,
        }
    }

    /// Build the model of a country for a year
    ///
    /// Sub-sectors, processes and categories are sorted by name. Fails when there's no grid
    /// carbon intensity for the country and year, when a process has no physical output or
    /// when the demand data is not valid.
    pub fn compose_country(&self, iso2: &str, year: u32) -> Result<Country> {
        let mut country = Country::new(iso2);
        let grid_carbon_intensity = country
            .iso3()
            .and_then(|iso3| self.grid.lookup(iso3, year))
            .ok_or_else(|| EurError::GridIntensityMissing {
                iso2: iso2.into(),
                year,
            })?;

        let mut groups: BTreeMap<&str, BTreeMap<&str, CategoryRows>> = BTreeMap::new();
        for row in self
            .demand
            .iter()
            .filter(|r| r.matches(iso2, year) && r.variable == DEMAND_VARIABLE)
        {
            groups
                .entry(row.sub_sector.as_str())
                .or_default()
                .entry(row.process.as_str())
                .or_default()
                .entry(row.category.as_str())
                .or_default()
                .push(row);
        }
        if groups.is_empty() {
            warn!("No demand data found for iso2=`{}` and year={}", iso2, year);
        }

        let mut sub_sectors = Vec::with_capacity(groups.len());
        for (sub_sector, processes) in groups {
            let kind: SubSectorType = sub_sector.parse()?;
            let processes = processes
                .into_iter()
                .map(|(process, categories)| {
                    if !kind.has_process(process) {
                        warn!(
                            "Process `{}` is not a known process of sub-sector `{}`",
                            process, sub_sector
                        );
                    }
                    self.compose_process(
                        iso2,
                        year,
                        sub_sector,
                        process,
                        categories,
                        grid_carbon_intensity,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            sub_sectors.push(SubSector::with_type(kind, processes)?);
        }
        country.set_sub_sectors(sub_sectors)?;
        debug!(
            "Composed country `{}` for year {} with {} sub-sectors (grid carbon intensity {:.2} kgCO2/GJ)",
            iso2,
            year,
            country.sub_sectors().len(),
            grid_carbon_intensity
        );
        Ok(country)
    }

    /// Build the models of several countries for a year
    pub fn compose_countries(&self, iso2s: &[&str], year: u32) -> Result<CountryCollection> {
        let countries = iso2s
            .iter()
            .map(|iso2| self.compose_country(iso2, year))
            .collect::<Result<Vec<_>>>()?;
        CountryCollection::new(countries)
    }

    fn compose_process(
        &self,
        iso2: &str,
        year: u32,
        sub_sector: &str,
        process: &str,
        categories: CategoryRows,
        grid_carbon_intensity: f64,
    ) -> Result<Process> {
        let production = self.production(iso2, year, sub_sector, process)?;
        let process_emission_intensity =
            self.process_emission_intensity(iso2, year, sub_sector, process);
        let categories = categories
            .into_iter()
            .map(|(name, rows)| {
                let fuels = rows
                    .iter()
                    .map(|r| FuelConsumption::new(&r.fuel, r.value, &r.unit, None, self.factors))
                    .collect::<Result<Vec<_>>>()?;
                ConsumptionCategory::new(name, fuels)
            })
            .collect::<Result<Vec<_>>>()?;
        Process::new(
            process,
            production,
            process_emission_intensity,
            categories,
            Some(grid_carbon_intensity),
        )
    }

    fn production(&self, iso2: &str, year: u32, sub_sector: &str, process: &str) -> Result<Production> {
        let rows = select_rows(self.activity, iso2, year, sub_sector, process);
        let output = find_variable(&rows, PHYSICAL_OUTPUT).ok_or_else(|| {
            EurError::ActivityMissing {
                sub_sector: sub_sector.into(),
                process: process.into(),
                variable: PHYSICAL_OUTPUT,
            }
        })?;
        let value_of = |variable| find_variable(&rows, variable).map_or(0.0, |r| r.value);
        Ok(Production {
            physical_output: output.value,
            installed_capacity: value_of(INSTALLED_CAPACITY),
            capacity_investment: value_of(CAPACITY_INVESTMENT),
            decommissioned_capacity: value_of(DECOMMISSIONED_CAPACITY),
            idle_capacity: value_of(IDLE_CAPACITY),
            unit: output.unit.clone(),
        })
    }

    fn process_emission_intensity(&self, iso2: &str, year: u32, sub_sector: &str, process: &str) -> f64 {
        let rows: Vec<&TableRow> = select_rows(self.emission, iso2, year, sub_sector, process)
            .into_iter()
            .filter(|r| {
                r.category == PROCESS_EMISSIONS_CATEGORY && r.variable == PROCESS_EMISSIONS_VARIABLE
            })
            .collect();
        match rows.as_slice() {
            [] => 0.0,
            [row] => row.value,
            _ => {
                warn!(
                    "Found {} process emission rows for process `{}` of sub-sector `{}`, using 0",
                    rows.len(),
                    process,
                    sub_sector
                );
                0.0
            }
        }
    }
}

fn select_rows<'r>(
    rows: &'r [TableRow],
    iso2: &str,
    year: u32,
    sub_sector: &str,
    process: &str,
) -> Vec<&'r TableRow> {
    rows.iter()
        .filter(|r| r.matches(iso2, year) && r.sub_sector == sub_sector && r.process == process)
        .collect()
}

fn find_variable<'r>(rows: &[&'r TableRow], variable: &str) -> Option<&'r TableRow> {
    rows.iter().find(|r| r.variable == variable).copied()
}
