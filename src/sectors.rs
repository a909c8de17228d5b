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
Sub-sectors
===========

Industry branch of a country, made of its manufacturing processes.
*/

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::{
    error::{ensure_unique, Result},
    processes::{FuelMixMethod, Process, ProcessSummary},
    types::{FuelMix, SubSectorType},
    vecops::{nanmean, nansum, weighted_average},
};

/// Industry sub-sector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubSector {
    kind: SubSectorType,
    processes: Vec<Process>,
}

impl SubSector {
    /// Constructor
    ///
    /// Fails when `kind` is not a known sub-sector name or a process name is repeated.
    pub fn new(kind: &str, processes: Vec<Process>) -> Result<Self> {
        let kind: SubSectorType = kind.parse()?;
        Self::with_type(kind, processes)
    }

    /// Constructor from an already parsed sub-sector type
    pub fn with_type(kind: SubSectorType, processes: Vec<Process>) -> Result<Self> {
        ensure_unique("process", kind.as_ref(), processes.iter().map(Process::name))?;
        Ok(Self { kind, processes })
    }

    /// Sub-sector type
    pub fn kind(&self) -> SubSectorType {
        self.kind
    }

    /// Sub-sector name
    pub fn name(&self) -> &'static str {
        self.kind.into()
    }

    /// Processes
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Process names
    pub fn process_names(&self) -> Vec<&str> {
        self.processes.iter().map(Process::name).collect()
    }

    /// Process with the given name, or `None` if not found
    pub fn get_process(&self, name: &str) -> Option<&Process> {
        let process = self.processes.iter().find(|p| p.name() == name);
        if process.is_none() {
            warn!(
                "No process found matching process=`{}` for sub-sector=`{}`",
                name, self.kind
            );
        }
        process
    }

    /// Average grid carbon intensity of the processes [kgCO2/GJ]
    ///
    /// Processes without grid carbon intensity are left out; NaN if none has one.
    pub fn grid_carbon_intensity(&self) -> f64 {
        let values: Vec<f64> = self
            .processes
            .iter()
            .map(|p| p.grid_carbon_intensity().unwrap_or(std::f64::NAN))
            .collect();
        nanmean(&values)
    }

    /// Set the same grid carbon intensity [kgCO2/GJ] on all processes
    pub fn set_grid_carbon_intensity(&mut self, value: f64) {
        for process in &mut self.processes {
            process.set_grid_carbon_intensity(value);
        }
    }

    /// Emission intensity weighted by physical output [kgCO2/tonne]
    ///
    /// Processes with NaN intensity are ignored. NaN when no output remains to weight.
    pub fn total_emission_intensity(&self) -> f64 {
        let pairs: Vec<(f64, f64)> = self
            .processes
            .iter()
            .map(|p| (p.total_emission_intensity(), p.production().physical_output))
            .collect();
        weighted_average(&pairs)
    }

    /// Emissions of all processes [kgCO2]
    pub fn total_emissions(&self) -> f64 {
        let values: Vec<f64> = self.processes.iter().map(Process::total_emissions).collect();
        nansum(&values)
    }

    /// Physical output of all processes
    pub fn total_production(&self) -> f64 {
        let values: Vec<f64> = self
            .processes
            .iter()
            .map(|p| p.production().physical_output)
            .collect();
        nansum(&values)
    }

    /// Total fuel demand by fuel [GJ] of one process (or all processes when `None`)
    pub fn get_fuel_mix(&self, process: Option<&str>) -> Vec<FuelMix> {
        let mix = self
            .processes
            .iter()
            .filter(|p| process.map(|name| p.name() == name).unwrap_or(true))
            .flat_map(|p| p.get_fuel_mix(None, FuelMixMethod::Absolute));
        FuelMix::aggregate(mix)
    }

    /// Key indicators of every process, by process name
    pub fn get_summary(&self, rounding: u32, add_fuels: bool) -> Result<BTreeMap<String, ProcessSummary>> {
        self.processes
            .iter()
            .map(|p| Ok((p.name().to_string(), p.get_summary(rounding, add_fuels)?)))
            .collect()
    }
}
