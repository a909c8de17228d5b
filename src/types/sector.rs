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

//! Industry sub-sectors

use std::convert::TryFrom;
use std::str;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, IntoStaticStr};

use crate::error::EurError;

/// Industry branch (sub-sector) covered by the JRC-IDEES industry tables
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(try_from = "String", into = "String")]
pub enum SubSectorType {
    /// Chemicals
    #[strum(serialize = "Chemicals Industry")]
    Chemicals,
    /// Iron and steel
    #[strum(serialize = "Iron and steel")]
    IronAndSteel,
    /// Non ferrous metals
    #[strum(serialize = "Non Ferrous Metals")]
    NonFerrousMetals,
    /// Non-metallic minerals
    #[strum(serialize = "Non-metallic mineral products")]
    NonMetallicMinerals,
    /// Pulp, paper and printing
    #[strum(serialize = "Pulp, paper and printing")]
    PulpAndPaper,
}

impl SubSectorType {
    /// Known processes of the sub-sector
    pub fn processes(self) -> &'static [&'static str] {
        use SubSectorType::*;
        match self {
            Chemicals => &[
                "Basic chemicals",
                "Other chemicals",
                "Pharmaceutical products etc.",
            ],
            IronAndSteel => &["Integrated steelworks", "Electric arc"],
            NonFerrousMetals => &[
                "Alumina production",
                "Aluminium - primary production",
                "Aluminium - secondary production",
                "Other non-ferrous metals",
            ],
            NonMetallicMinerals => &["Cement", "Ceramics & other NMM", "Glass production"],
            PulpAndPaper => &[
                "Pulp production",
                "Paper production",
                "Printing and media reproduction",
            ],
        }
    }

    /// Is this process one of the known processes of the sub-sector?
    pub fn has_process(self, process: &str) -> bool {
        self.processes().contains(&process)
    }
}

impl str::FromStr for SubSectorType {
    type Err = EurError;

    fn from_str(s: &str) -> Result<SubSectorType, Self::Err> {
        let s = s.trim();
        SubSectorType::iter()
            .find(|sub| sub.as_ref() == s)
            .ok_or_else(|| EurError::SubSectorUnknown(s.into()))
    }
}

impl TryFrom<String> for SubSectorType {
    type Error = EurError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SubSectorType> for String {
    fn from(sub: SubSectorType) -> Self {
        sub.as_ref().to_string()
    }
}
