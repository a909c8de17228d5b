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

//! Fuels and fuel categories

use std::convert::TryFrom;
use std::str;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::error::EurError;

/// Fuel type (closed list of fuels found in the JRC-IDEES industry tables)
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
)]
#[serde(try_from = "String", into = "String")]
pub enum FuelType {
    /// Electricity
    #[strum(serialize = "Electricity")]
    Electricity,
    /// Diesel oil
    #[strum(serialize = "Diesel oil")]
    DieselOil,
    /// Naphtha
    #[strum(serialize = "Naphtha")]
    Naphtha,
    /// LPG - Liquefied petroleum gas
    #[strum(serialize = "LPG")]
    Lpg,
    /// Natural gas
    #[strum(serialize = "Natural gas")]
    NaturalGas,
    /// Other liquid fuels
    #[strum(serialize = "Other liquids")]
    OtherLiquids,
    /// Refinery gas
    #[strum(serialize = "Refinery gas")]
    RefineryGas,
    /// Residual fuel oil
    #[strum(serialize = "Residual fuel oil")]
    ResidualFuelOil,
    /// Solid fossil fuels
    #[strum(serialize = "Solids")]
    Solids,
    /// Diesel oil blended with biofuels
    #[strum(serialize = "Diesel oil (incl. biofuels)")]
    DieselOilInclBiofuels,
    /// Natural gas blended with biogas
    #[strum(serialize = "Natural gas (incl. biogas)")]
    NaturalGasInclBiogas,
    /// Biomass
    #[strum(serialize = "Biomass")]
    Biomass,
    /// Derived gases (coke oven gas, blast furnace gas...)
    #[strum(serialize = "Derived gases")]
    DerivedGases,
    /// Distributed steam
    #[strum(serialize = "Steam distributed")]
    SteamDistributed,
    /// Solar and geothermal heat
    #[strum(serialize = "Solar and geothermal")]
    SolarAndGeothermal,
    /// Coke
    #[strum(serialize = "Coke")]
    Coke,
}

impl FuelType {
    /// Fuels whose emission factor follows the grid carbon intensity
    ///
    /// Distributed steam is assumed equivalent to grid electricity.
    pub const GRID_FUELS: [FuelType; 2] = [FuelType::Electricity, FuelType::SteamDistributed];

    /// Category of the fuel
    pub fn category(self) -> FuelCategory {
        use FuelType::*;
        match self {
            Electricity => FuelCategory::Electricity,
            DieselOil | Lpg | Naphtha | NaturalGas | OtherLiquids | ResidualFuelOil | Solids
            | Coke => FuelCategory::FossilFuel,
            RefineryGas => FuelCategory::Other,
            DieselOilInclBiofuels | NaturalGasInclBiogas | Biomass | DerivedGases
            | SteamDistributed | SolarAndGeothermal => FuelCategory::Unclassified,
        }
    }

    /// Is the emission factor of this fuel set from the grid carbon intensity?
    pub fn follows_grid(self) -> bool {
        FuelType::GRID_FUELS.contains(&self)
    }
}

impl str::FromStr for FuelType {
    type Err = EurError;

    fn from_str(s: &str) -> Result<FuelType, Self::Err> {
        let s = s.trim();
        FuelType::iter()
            .find(|fuel| fuel.as_ref() == s)
            .ok_or_else(|| EurError::FuelUnknown(s.into()))
    }
}

impl TryFrom<String> for FuelType {
    type Error = EurError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FuelType> for String {
    fn from(fuel: FuelType) -> Self {
        fuel.as_ref().to_string()
    }
}

/// Fuel category
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter,
)]
#[serde(try_from = "String", into = "String")]
pub enum FuelCategory {
    /// Electricity
    #[strum(serialize = "Electricity")]
    Electricity,
    /// Fossil fuels
    #[strum(serialize = "Fossil fuel")]
    FossilFuel,
    /// Other fuels
    #[strum(serialize = "Other")]
    Other,
    /// Fuels without a category (blends, renewables, steam)
    #[strum(serialize = "")]
    Unclassified,
}

impl str::FromStr for FuelCategory {
    type Err = EurError;

    fn from_str(s: &str) -> Result<FuelCategory, Self::Err> {
        let s = s.trim();
        FuelCategory::iter()
            .find(|cat| cat.as_ref() == s)
            .ok_or_else(|| EurError::ParseError(format!("unknown fuel category \"{}\"", s)))
    }
}

impl TryFrom<String> for FuelCategory {
    type Error = EurError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FuelCategory> for String {
    fn from(cat: FuelCategory) -> Self {
        cat.as_ref().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fuel_parse() {
        assert_eq!("Natural gas".parse::<FuelType>().unwrap(), FuelType::NaturalGas);
        assert_eq!(
            " Diesel oil (incl. biofuels) ".parse::<FuelType>().unwrap(),
            FuelType::DieselOilInclBiofuels
        );
        assert!("Hydrogen".parse::<FuelType>().is_err());
        assert!("natural gas".parse::<FuelType>().is_err());
    }

    #[test]
    fn fuel_roundtrip_names() {
        for fuel in FuelType::iter() {
            assert_eq!(fuel.to_string().parse::<FuelType>().unwrap(), fuel);
        }
    }

    #[test]
    fn fuel_categories() {
        assert_eq!(FuelType::Electricity.category(), FuelCategory::Electricity);
        assert_eq!(FuelType::Coke.category(), FuelCategory::FossilFuel);
        assert_eq!(FuelType::RefineryGas.category(), FuelCategory::Other);
        assert_eq!(FuelType::Biomass.category(), FuelCategory::Unclassified);
        assert_eq!(FuelCategory::Unclassified.to_string(), "");
        assert_eq!("Fossil fuel".parse::<FuelCategory>().unwrap(), FuelCategory::FossilFuel);
    }

    #[test]
    fn fuel_serde() {
        let json = serde_json::to_string(&FuelType::SteamDistributed).unwrap();
        assert_eq!(json, "\"Steam distributed\"");
        let fuel: FuelType = serde_json::from_str("\"Solar and geothermal\"").unwrap();
        assert_eq!(fuel, FuelType::SolarAndGeothermal);
        assert!(serde_json::from_str::<FuelType>("\"Uranium\"").is_err());
    }
}
