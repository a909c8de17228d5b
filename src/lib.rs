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
EurEnergy
=========

This crate provides a library and binary that **model the energy demand and CO2 emissions of the
European energy intensive industries**, built from the JRC-IDEES (Integrated Database of the
European Energy System) demand, activity and emission tables.

A country is modeled as a tree:

- industry sub-sectors (iron and steel, chemicals, non-metallic minerals...)
- manufacturing processes of each sub-sector, with their physical output
- consumption categories of each process (process heat, electric arc, grinding...)
- fuel demand of each category per tonne of product, with its emission factor

Emissions are computed bottom-up from fuel demand intensities [GJ/tonne], fuel emission factors
[kgCO2/GJ], process emission intensities [kgCO2/tonne] and physical output [tonne].

Electricity and distributed steam take the carbon intensity of the national power grid, which can
be overridden to explore alternative scenarios and compare them with the reference.

It also holds the following assumptions:

- fuel demand is always expressed per tonne of product (GJ/tonne)
- distributed steam has the same carbon intensity as grid electricity
- biomass and solar and geothermal energy have no default emission factor
- missing process emission data means no process emissions

# Example

```rust
use eurenergy::*;

let demand: Vec<TableRow> = read_table("test_data/demand.csv").unwrap();
let activity: Vec<TableRow> = read_table("test_data/activity.csv").unwrap();
let emission: Vec<TableRow> = read_table("test_data/emission.csv").unwrap();
let grid = GridIntensityTable::new(read_table("test_data/grid.csv").unwrap()).unwrap();
let factors = FuelEmissionFactors::default();

// Country model for a year
let composer = Composer::new(&demand, &activity, &emission, &grid, &factors);
let country = composer.compose_country("DE", 2015).unwrap();
println!("{}", country.to_plain());

// Scenario with a carbon free power grid
let delta = DeltaCountry::with_grid_carbon_intensity(&country, 0.0);
assert!(delta.delta_emissions() < 0.0);
println!("{}", delta.to_plain());
```

*/

#![deny(missing_docs)]

mod asplain;
mod categories;
mod composer;
mod countries;
mod delta;
mod fuels;
mod processes;
mod sectors;
mod tables;
mod vecops;

pub mod error;
pub mod types;

pub use asplain::*;
pub use categories::*;
pub use composer::*;
pub use countries::*;
pub use delta::*;
pub use fuels::*;
pub use processes::*;
pub use sectors::*;
pub use tables::*;

/// Library version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
