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
Errors
======

Error type shared by the model, the composer and the table readers.
*/

use std::fmt;

/// Errors raised while building or aggregating the energy model
///
/// Validation variants are raised at construction time and never produce partial objects.
/// Lookups by name are not errors: they return `None`.
#[derive(Debug)]
pub enum EurError {
    /// Generic parsing error
    ParseError(String),
    /// Fuel name not in the closed list of fuels
    FuelUnknown(String),
    /// Sub-sector name not in the list of industry branches
    SubSectorUnknown(String),
    /// Unit not supported by a fuel demand record
    UnitUnsupported {
        /// unit found
        unit: String,
        /// unit expected
        expected: &'static str,
    },
    /// Aggregation over values expressed in more than one unit
    MixedUnits(String),
    /// Key found more than once in a collection that must be unique
    Duplicated {
        /// kind of element (fuel, category, process...)
        kind: &'static str,
        /// owner of the collection
        owner: String,
        /// repeated key
        key: String,
    },
    /// No grid carbon intensity for the country and year
    GridIntensityMissing {
        /// iso2 code of the country
        iso2: String,
        /// year
        year: u32,
    },
    /// Required activity data not found for a process
    ActivityMissing {
        /// sub-sector name
        sub_sector: String,
        /// process name
        process: String,
        /// missing variable
        variable: &'static str,
    },
    /// CSV reading error
    Csv(String),
    /// I/O error
    Io(String),
}

impl EurError {
    /// Is this a construction time validation error?
    pub fn is_validation(&self) -> bool {
        match self {
            EurError::FuelUnknown(_)
            | EurError::SubSectorUnknown(_)
            | EurError::UnitUnsupported { .. }
            | EurError::MixedUnits(_)
            | EurError::Duplicated { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for EurError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EurError::*;
        match self {
            ParseError(v) => write!(f, "Could not parse input data: {}", v),
            FuelUnknown(v) => write!(f, "Unknown fuel type: \"{}\"", v),
            SubSectorUnknown(v) => write!(f, "Unknown sub-sector: \"{}\"", v),
            UnitUnsupported { unit, expected } => write!(
                f,
                "Only '{}' currently handled, got unit=`{}` instead",
                expected, unit
            ),
            MixedUnits(owner) => write!(f, "Multiple units found for fuel demand of `{}`", owner),
            Duplicated { kind, owner, key } => {
                write!(f, "Duplicated {} `{}` found for `{}`", kind, key, owner)
            }
            GridIntensityMissing { iso2, year } => write!(
                f,
                "No grid carbon intensity available for country `{}` and year {}",
                iso2, year
            ),
            ActivityMissing {
                sub_sector,
                process,
                variable,
            } => write!(
                f,
                "Missing activity variable `{}` for process `{}` of sub-sector `{}`",
                variable, process, sub_sector
            ),
            Csv(v) => write!(f, "CSV error: {}", v),
            Io(v) => write!(f, "I/O error: {}", v),
        }
    }
}

impl std::error::Error for EurError {}

/// Result type for the crate
pub type Result<T> = std::result::Result<T, EurError>;

impl From<std::num::ParseFloatError> for EurError {
    fn from(err: std::num::ParseFloatError) -> Self {
        EurError::ParseError(err.to_string())
    }
}

impl From<csv::Error> for EurError {
    fn from(err: csv::Error) -> Self {
        EurError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for EurError {
    fn from(err: std::io::Error) -> Self {
        EurError::Io(err.to_string())
    }
}

/// Check that all keys in a collection are unique
///
/// Fails with `EurError::Duplicated` reporting the first repeated key.
pub(crate) fn ensure_unique<I, K>(kind: &'static str, owner: &str, keys: I) -> Result<()>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    for key in keys {
        let key = key.as_ref().to_string();
        if !seen.insert(key.clone()) {
            return Err(EurError::Duplicated {
                kind,
                owner: owner.into(),
                key,
            });
        }
    }
    Ok(())
}
