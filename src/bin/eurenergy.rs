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

#[macro_use]
extern crate clap;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;

use clap::{App, AppSettings, Arg};
use failure::Error;
use failure::ResultExt;
use log::{info, LevelFilter};
use serde::Serialize;

use eurenergy::error::EurError;
use eurenergy::types::{FuelMix, SubSectorValue};
use eurenergy::*;

// Helpers ------------------------------------------------------------------------------------

fn readfile(path: &Path) -> Result<String, Error> {
    let mut f = File::open(path).context(format!("File {} not found", path.display()))?;
    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .context("Error reading file")?;
    Ok(contents)
}

fn writefile(path: &Path, content: &[u8]) -> Result<(), Error> {
    let mut file =
        File::create(&path).context(format!("Could not create file {}", path.display()))?;
    file.write_all(content)
        .context(format!("Could not write to {}", path.display()))?;
    Ok(())
}

/// Read a demand, activity or emission table or exit
fn get_table(matches: &clap::ArgMatches<'_>, name: &str, descr: &str) -> Vec<TableRow> {
    // required args
    let path = Path::new(matches.value_of(name).unwrap_or_default());
    read_table(path).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Could not read {} table \"{}\" -> {}",
            descr,
            path.display(),
            error
        );
        exit(exitcode::IOERR);
    })
}

/// Read the grid carbon intensity table or exit
fn get_grid(matches: &clap::ArgMatches<'_>) -> GridIntensityTable {
    let path = Path::new(matches.value_of("grid").unwrap_or_default());
    let rows = read_table(path).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Could not read grid carbon intensity table \"{}\" -> {}",
            path.display(),
            error
        );
        exit(exitcode::IOERR);
    });
    GridIntensityTable::new(rows).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Wrong grid carbon intensity table \"{}\" -> {}",
            path.display(),
            error
        );
        exit(exitcode::DATAERR);
    })
}

/// Load fuel emission factors from a carbon content file or use the default values
fn get_factors(archivo: Option<&str>) -> FuelEmissionFactors {
    let archivo = match archivo {
        Some(archivo) => archivo,
        None => {
            info!("Using default fuel emission factors");
            return FuelEmissionFactors::default();
        }
    };
    let path = Path::new(archivo);
    let contents = readfile(path).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Could not read fuel carbon content file \"{}\" -> {}",
            path.display(),
            error
        );
        exit(exitcode::IOERR);
    });
    println!("Fuel carbon content (file): \"{}\"", path.display());
    FuelEmissionFactors::from_carbon_content(&contents).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Wrong format of fuel carbon content file \"{}\" -> {}",
            path.display(),
            error
        );
        exit(exitcode::DATAERR);
    })
}

fn init_logger(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

// JSON report --------------------------------------------------------------------------------

#[derive(Serialize)]
struct DeltaReport {
    grid_carbon_intensity: f64,
    delta_emissions: f64,
    delta_emissions_by_sub_sector: Vec<SubSectorValue>,
    delta_emission_intensity_by_sub_sector: BTreeMap<String, f64>,
    delta_fuel_demand: Vec<FuelMix>,
}

#[derive(Serialize)]
struct Report {
    iso2: String,
    country: Option<String>,
    year: u32,
    grid_carbon_intensity: f64,
    total_emissions: f64,
    total_fuel_demand: f64,
    emissions_by_sub_sector: Option<types::Metric>,
    emission_intensity_by_sub_sector: BTreeMap<String, f64>,
    fuel_demand_by_sub_sector: Vec<SubSectorValue>,
    fuel_demand: Vec<FuelMix>,
    processes: BTreeMap<String, BTreeMap<String, ProcessSummary>>,
    scenario: Option<DeltaReport>,
}

fn build_report(
    country: &Country,
    year: u32,
    delta: Option<&DeltaCountry<'_>>,
) -> Result<Report, EurError> {
    let processes = country
        .sub_sectors()
        .iter()
        .map(|s| -> Result<_, EurError> { Ok((s.name().to_string(), s.get_summary(2, true)?)) })
        .collect::<Result<BTreeMap<_, _>, EurError>>()?;
    let scenario = delta.map(|d| DeltaReport {
        grid_carbon_intensity: d.country2().grid_carbon_intensity(),
        delta_emissions: d.delta_emissions(),
        delta_emissions_by_sub_sector: d.delta_emissions_by_sub_sector(),
        delta_emission_intensity_by_sub_sector: d.delta_emission_intensity_by_sub_sector(),
        delta_fuel_demand: d.delta_fuel_demand_by_sub_sector(),
    });
    Ok(Report {
        iso2: country.iso2().to_string(),
        country: country.country_name().map(str::to_string),
        year,
        grid_carbon_intensity: country.grid_carbon_intensity(),
        total_emissions: country.total_emissions(),
        total_fuel_demand: country.total_fuel_demand(),
        emissions_by_sub_sector: country.get_total_emissions(None, None),
        emission_intensity_by_sub_sector: country.emission_intensity_by_sub_sector(),
        fuel_demand_by_sub_sector: country.get_total_fuel_demand_all_sub_sectors(),
        fuel_demand: country.get_total_fuel_demand(None),
        processes,
        scenario,
    })
}

// Main ---------------------------------------------------------------------------------------

fn main() {
    let matches = App::new("EurEnergy")
        .bin_name("eurenergy")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018-2022 Ministerio de Fomento,
                        Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Authors: Rafael Villar Burke <pachi@ietcc.csic.es>,
         Daniel Jiménez González <danielj@ietcc.csic.es>
         Marta Sorribes Gil <msorribes@ietcc.csic.es>

License: Published under the MIT license.

")
        .about("EurEnergy - Energy demand and CO2 emissions of the European industry.")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("demand")
            .long("demand")
            .value_name("DEMAND_FILE")
            .help("Fuel demand table (CSV)")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(1))
        .arg(Arg::with_name("activity")
            .long("activity")
            .value_name("ACTIVITY_FILE")
            .help("Activity table with physical output and capacities (CSV)")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(2))
        .arg(Arg::with_name("emission")
            .long("emission")
            .value_name("EMISSION_FILE")
            .help("Emission table with process emission intensities (CSV)")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(3))
        .arg(Arg::with_name("grid")
            .long("grid")
            .value_name("GRID_FILE")
            .help("Grid carbon intensity table by iso3 code and year (CSV)")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(4))
        .arg(Arg::with_name("factors")
            .long("factors")
            .value_name("FACTORS_FILE")
            .help("Fuel carbon content table [kgC/GJ] replacing the default values")
            .takes_value(true)
            .display_order(5))
        .arg(Arg::with_name("iso2")
            .short("i")
            .long("iso2")
            .value_name("ISO2")
            .help("Country code (e.g. DE, FR, EL, EU28)")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(6))
        .arg(Arg::with_name("year")
            .short("y")
            .long("year")
            .value_name("YEAR")
            .help("Year of the data")
            .takes_value(true)
            .required_unless("showlicense")
            .display_order(7))
        .arg(Arg::with_name("scenario_grid")
            .short("g")
            .long("scenario-grid")
            .value_name("GRID_CARBON_INTENSITY")
            .help("Alternative grid carbon intensity [kgCO2/GJ] to compare with the reference")
            .takes_value(true)
            .display_order(8))
        .arg(Arg::with_name("json_output")
            .long("json")
            .value_name("JSON_OUTPUT_FILE")
            .help("Output file with detailed results in JSON format")
            .takes_value(true))
        .arg(Arg::with_name("showlicense")
            .short("L")
            .long("license")
            .help("Show the license of the program (MIT)"))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    if matches.is_present("showlicense") {
        println!(
            "
Copyright (c) 2018-2022 Ministerio de Fomento
                        Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the 'Software'), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>
            Daniel Jiménez González <danielj@ietcc.csic.es>
            Marta Sorribes Gil <msorribes@ietcc.csic.es>"
        );
        exit(exitcode::OK);
    }

    // Prologue -----------------------------------------------------------------------------------

    let verbosity = matches.occurrences_of("v");
    init_logger(verbosity);

    if verbosity > 2 {
        println!("Options: ----------");
        println!("{:#?}", matches);
        println!("------------------");
    }

    let year = value_t!(matches, "year", u32).unwrap_or_else(|error| {
        eprintln!("ERROR: The year is not a valid number");
        if verbosity > 2 {
            println!("{}", error)
        };
        exit(exitcode::USAGE);
    });
    let scenario_grid = if matches.is_present("scenario_grid") {
        let value = value_t!(matches, "scenario_grid", f64).unwrap_or_else(|error| {
            eprintln!("ERROR: The scenario grid carbon intensity is not a valid number");
            if verbosity > 2 {
                println!("{}", error)
            };
            exit(exitcode::USAGE);
        });
        if value < 0.0 {
            eprintln!(
                "ERROR: The scenario grid carbon intensity must be positive or zero and is {:.2}",
                value
            );
            exit(exitcode::DATAERR);
        }
        Some(value)
    } else {
        None
    };
    let iso2 = matches.value_of("iso2").unwrap_or_default();

    // Input tables -------------------------------------------------------------------------------

    let demand = get_table(&matches, "demand", "demand");
    let activity = get_table(&matches, "activity", "activity");
    let emission = get_table(&matches, "emission", "emission");
    let grid = get_grid(&matches);
    let factors = get_factors(matches.value_of("factors"));

    if verbosity > 0 {
        println!(
            "Input rows: demand={}, activity={}, emission={}, grid={}",
            demand.len(),
            activity.len(),
            emission.len(),
            grid.rows().len()
        );
    }

    // Country model ------------------------------------------------------------------------------

    let composer = Composer::new(&demand, &activity, &emission, &grid, &factors);
    let country = composer.compose_country(iso2, year).unwrap_or_else(|error| {
        eprintln!(
            "ERROR: Could not build the model of country {} for year {} -> {}",
            iso2, year, error
        );
        exit(exitcode::DATAERR);
    });

    println!("{}", country.to_plain());

    // Scenario -----------------------------------------------------------------------------------

    let delta = scenario_grid.map(|value| DeltaCountry::with_grid_carbon_intensity(&country, value));
    if let Some(delta) = &delta {
        println!("{}", delta.to_plain());
    }

    // Results output -----------------------------------------------------------------------------

    if let Some(archivo_salida) = matches.value_of("json_output") {
        let path = Path::new(archivo_salida);
        if verbosity > 0 {
            println!("Results in JSON format: {:?}", path.display());
        }
        let json = build_report(&country, year, delta.as_ref())
            .map_err(Error::from)
            .and_then(|report| serde_json::to_string_pretty(&report).map_err(Error::from))
            .unwrap_or_else(|error| {
                eprintln!("ERROR: Could not convert results to JSON -> {}", error);
                exit(exitcode::DATAERR);
            });
        if let Err(error) = writefile(&path, json.as_bytes()) {
            eprintln!("ERROR: {}", error);
            exit(exitcode::IOERR);
        }
    }
}
