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
Country reference data
======================

ISO 3166 codes and names of the countries found in the energy and electricity tables, plus the
synthetic entry used for the EU27 + UK aggregate.
*/

use serde::{Deserialize, Serialize};

/// Identifiers of a country or group of countries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// ISO 3166-1 alpha-2 code
    pub alpha_2: String,
    /// ISO 3166-1 alpha-3 code (synthetic code for aggregates)
    pub alpha_3: String,
    /// Common name
    pub name: String,
    /// Is this a group of countries without a real ISO code?
    pub aggregate: bool,
}

impl CountryInfo {
    /// Constructor
    pub fn new<T: Into<String>>(alpha_2: T, alpha_3: T, name: T, aggregate: bool) -> Self {
        Self {
            alpha_2: alpha_2.into(),
            alpha_3: alpha_3.into(),
            name: name.into(),
            aggregate,
        }
    }
}

/// Code used for the EU27 + UK aggregate in all tables
pub const EU27_UK: &str = "EU27+UK";

/// Codes resolving to the EU27 + UK aggregate
pub const EU_AGGREGATE_CODES: [&str; 2] = [EU27_UK, "EU28"];

/// Non ISO alpha-2 codes used by Eurostat and their ISO equivalent
pub const ISO2_FALLBACK: [(&str, &str); 2] = [("EL", "GR"), ("UK", "GB")];

/// Reference list of countries: (alpha-2, alpha-3, name)
pub const COUNTRIES: [(&str, &str, &str); 53] = [
    ("AL", "ALB", "Albania"),
    ("AT", "AUT", "Austria"),
    ("AU", "AUS", "Australia"),
    ("BA", "BIH", "Bosnia and Herzegovina"),
    ("BE", "BEL", "Belgium"),
    ("BG", "BGR", "Bulgaria"),
    ("BR", "BRA", "Brazil"),
    ("BY", "BLR", "Belarus"),
    ("CA", "CAN", "Canada"),
    ("CH", "CHE", "Switzerland"),
    ("CN", "CHN", "China"),
    ("CY", "CYP", "Cyprus"),
    ("CZ", "CZE", "Czechia"),
    ("DE", "DEU", "Germany"),
    ("DK", "DNK", "Denmark"),
    ("EE", "EST", "Estonia"),
    ("ES", "ESP", "Spain"),
    ("FI", "FIN", "Finland"),
    ("FR", "FRA", "France"),
    ("GB", "GBR", "United Kingdom"),
    ("GE", "GEO", "Georgia"),
    ("GR", "GRC", "Greece"),
    ("HR", "HRV", "Croatia"),
    ("HU", "HUN", "Hungary"),
    ("IE", "IRL", "Ireland"),
    ("IN", "IND", "India"),
    ("IS", "ISL", "Iceland"),
    ("IT", "ITA", "Italy"),
    ("JP", "JPN", "Japan"),
    ("KR", "KOR", "Korea, Republic of"),
    ("LI", "LIE", "Liechtenstein"),
    ("LT", "LTU", "Lithuania"),
    ("LU", "LUX", "Luxembourg"),
    ("LV", "LVA", "Latvia"),
    ("MD", "MDA", "Moldova, Republic of"),
    ("ME", "MNE", "Montenegro"),
    ("MK", "MKD", "North Macedonia"),
    ("MT", "MLT", "Malta"),
    ("MX", "MEX", "Mexico"),
    ("NL", "NLD", "Netherlands"),
    ("NO", "NOR", "Norway"),
    ("PL", "POL", "Poland"),
    ("PT", "PRT", "Portugal"),
    ("RO", "ROU", "Romania"),
    ("RS", "SRB", "Serbia"),
    ("RU", "RUS", "Russian Federation"),
    ("SE", "SWE", "Sweden"),
    ("SI", "SVN", "Slovenia"),
    ("SK", "SVK", "Slovakia"),
    ("TR", "TUR", "Türkiye"),
    ("UA", "UKR", "Ukraine"),
    ("US", "USA", "United States"),
    ("ZA", "ZAF", "South Africa"),
];

/// Resolve country identifiers from an alpha-2 code
///
/// Eurostat codes `EL` and `UK` are mapped to `GR` and `GB`, and `EU27+UK` / `EU28` resolve to
/// the synthetic aggregate entry. Unknown codes give `None`.
pub fn country_from_iso2(iso2: &str) -> Option<CountryInfo> {
    let iso2 = iso2.trim();
    if EU_AGGREGATE_CODES.contains(&iso2) {
        return Some(CountryInfo::new(EU27_UK, EU27_UK, "EU27 + UK", true));
    }
    let code = ISO2_FALLBACK
        .iter()
        .find(|(from, _)| *from == iso2)
        .map(|(_, to)| *to)
        .unwrap_or(iso2);
    COUNTRIES
        .iter()
        .find(|(alpha_2, _, _)| *alpha_2 == code)
        .map(|(alpha_2, alpha_3, name)| CountryInfo::new(*alpha_2, *alpha_3, *name, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn geo_lookup() {
        let de = country_from_iso2("DE").unwrap();
        assert_eq!(de.alpha_3, "DEU");
        assert_eq!(de.name, "Germany");
        assert!(!de.aggregate);
        assert!(country_from_iso2("XX").is_none());
    }

    #[test]
    fn geo_fallback_codes() {
        assert_eq!(country_from_iso2("EL").unwrap().alpha_3, "GRC");
        let uk = country_from_iso2("UK").unwrap();
        assert_eq!(uk.alpha_2, "GB");
        assert_eq!(uk.name, "United Kingdom");
    }

    #[test]
    fn geo_eu_aggregate() {
        for code in &EU_AGGREGATE_CODES {
            let eu = country_from_iso2(code).unwrap();
            assert!(eu.aggregate);
            assert_eq!(eu.alpha_3, EU27_UK);
            assert_eq!(eu.name, "EU27 + UK");
        }
    }
}
