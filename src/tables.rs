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
Input tables
============

Row types of the normalized input tables and CSV readers for them.

Demand, activity and emission tables share the `TableRow` layout:

```text
iso2,year,sub_sector,process,category,fuel,variable,value,unit,source
DE,2015,Iron and steel,Electric arc,Electric arc,Electricity,final energy consumption intensity,2.0,GJ/tonne,JRC-IDEES
```

Grid carbon intensity rows are keyed by the iso3 code of the country (or a synthetic code for
aggregates):

```text
country_code,year,value,unit
DEU,2015,0.36,kgCO2/kWh
```
*/

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    error::{EurError, Result},
    types::UNIT_FUEL_EMISSION_FACTOR,
};

/// Grid carbon intensity unit of power statistics
pub const UNIT_GRID_KWH: &str = "kgCO2/kWh";

/// Energy of one kWh [GJ]
pub const GJ_PER_KWH: f64 = 0.0036;

/// Row of a demand, activity or emission table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Country code
    pub iso2: String,
    /// Year
    pub year: u32,
    /// Sub-sector name
    pub sub_sector: String,
    /// Process name
    pub process: String,
    /// Consumption category (empty for activity rows)
    #[serde(default)]
    pub category: String,
    /// Fuel name (empty for activity and emission rows)
    #[serde(default)]
    pub fuel: String,
    /// Variable name
    pub variable: String,
    /// Value
    pub value: f64,
    /// Unit
    pub unit: String,
    /// Data source
    #[serde(default)]
    pub source: String,
}

impl TableRow {
    /// Does the row belong to the given country and year?
    pub fn matches(&self, iso2: &str, year: u32) -> bool {
        self.iso2 == iso2 && self.year == year
    }
}

/// Row of the grid carbon intensity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridIntensityRow {
    /// ISO alpha-3 code of the country or aggregate code
    pub country_code: String,
    /// Year
    pub year: u32,
    /// Value
    pub value: f64,
    /// Unit, kgCO2/GJ (default when the column is missing) or kgCO2/kWh
    #[serde(default = "default_grid_unit")]
    pub unit: String,
}

fn default_grid_unit() -> String {
    UNIT_FUEL_EMISSION_FACTOR.to_string()
}

/// Grid carbon intensities by country and year, in kgCO2/GJ
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GridIntensityTable {
    rows: Vec<GridIntensityRow>,
}

impl GridIntensityTable {
    /// Build the table, converting kgCO2/kWh values to kgCO2/GJ
    ///
    /// Fails on any other unit.
    pub fn new(rows: Vec<GridIntensityRow>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| {
                if row.unit == UNIT_FUEL_EMISSION_FACTOR {
                    Ok(row)
                } else if row.unit == UNIT_GRID_KWH {
                    Ok(GridIntensityRow {
                        value: row.value / GJ_PER_KWH,
                        unit: UNIT_FUEL_EMISSION_FACTOR.to_string(),
                        ..row
                    })
                } else {
                    Err(EurError::UnitUnsupported {
                        unit: row.unit,
                        expected: UNIT_FUEL_EMISSION_FACTOR,
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// Rows, in kgCO2/GJ
    pub fn rows(&self) -> &[GridIntensityRow] {
        &self.rows
    }

    /// Grid carbon intensity [kgCO2/GJ] of a country (by iso3 code) and year
    ///
    /// The first matching row is used when there are more than one.
    pub fn lookup(&self, iso3: &str, year: u32) -> Option<f64> {
        let mut found = self
            .rows
            .iter()
            .filter(|r| r.country_code == iso3 && r.year == year);
        let row = found.next()?;
        if found.next().is_some() {
            warn!(
                "More than one grid carbon intensity for country_code=`{}` and year={}",
                iso3, year
            );
        }
        Some(row.value)
    }
}

// -------------------- CSV readers

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::All).comment(Some(b'#'));
    builder
}

fn deserialize_all<T: DeserializeOwned, R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<T>> {
    reader
        .deserialize()
        .map(|row| row.map_err(EurError::from))
        .collect()
}

/// Read a CSV table with headers from a file
pub fn read_table<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let reader = reader_builder().from_path(path)?;
    deserialize_all(reader)
}

/// Read a CSV table with headers from a string
pub fn parse_table<T: DeserializeOwned>(data: &str) -> Result<Vec<T>> {
    let reader = reader_builder().from_reader(data.as_bytes());
    deserialize_all(reader)
}
