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
Countries
=========

A country (or group of countries) and its industry sub-sectors, with the query interface used
by reports and the grid carbon intensity override used for scenarios.
*/

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::Serialize;

use crate::{
    error::{ensure_unique, Result},
    processes::Process,
    sectors::SubSector,
    types::{
        country_from_iso2, CountryInfo, FuelMix, Metric, SubSectorValue, UNIT_DEMAND,
        UNIT_EMISSIONS, UNIT_EMISSION_INTENSITY,
    },
    vecops::{nanmean, nansum},
};

/// Country and its industry sub-sectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    iso2: String,
    info: Option<CountryInfo>,
    sub_sectors: Vec<SubSector>,
}

impl Country {
    /// Constructor without sub-sectors
    ///
    /// Unknown codes are accepted: the country then has no name nor iso3 code.
    pub fn new<T: Into<String>>(iso2: T) -> Self {
        let iso2 = iso2.into();
        let info = country_from_iso2(&iso2);
        if info.is_none() {
            warn!("No country found matching iso2=`{}`", iso2);
        }
        Self {
            iso2,
            info,
            sub_sectors: Vec::new(),
        }
    }

    /// Constructor with sub-sectors
    pub fn with_sub_sectors<T: Into<String>>(iso2: T, sub_sectors: Vec<SubSector>) -> Result<Self> {
        let mut country = Self::new(iso2);
        country.set_sub_sectors(sub_sectors)?;
        Ok(country)
    }

    /// Code used to build the country
    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    /// Country identifiers, if the code is known
    pub fn info(&self) -> Option<&CountryInfo> {
        self.info.as_ref()
    }

    /// Country name
    pub fn country_name(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.name.as_str())
    }

    /// ISO alpha-3 code (synthetic code for aggregates)
    pub fn iso3(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.alpha_3.as_str())
    }

    /// Sub-sectors
    pub fn sub_sectors(&self) -> &[SubSector] {
        &self.sub_sectors
    }

    /// Replace the sub-sectors
    ///
    /// Fails, leaving the country unchanged, when a sub-sector appears more than once.
    pub fn set_sub_sectors(&mut self, sub_sectors: Vec<SubSector>) -> Result<()> {
        let owner = self.country_name().unwrap_or(&self.iso2).to_string();
        ensure_unique("sub-sector", &owner, sub_sectors.iter().map(SubSector::name))?;
        self.sub_sectors = sub_sectors;
        Ok(())
    }

    /// Sub-sector names
    pub fn sub_sector_names(&self) -> Vec<&'static str> {
        self.sub_sectors.iter().map(SubSector::name).collect()
    }

    /// Average grid carbon intensity of the sub-sectors [kgCO2/GJ]
    pub fn grid_carbon_intensity(&self) -> f64 {
        let values: Vec<f64> = self
            .sub_sectors
            .iter()
            .map(SubSector::grid_carbon_intensity)
            .collect();
        nanmean(&values)
    }

    /// Set the same grid carbon intensity [kgCO2/GJ] on every sub-sector and process
    pub fn set_grid_carbon_intensity(&mut self, value: f64) {
        for sub_sector in &mut self.sub_sectors {
            sub_sector.set_grid_carbon_intensity(value);
        }
    }

    /// Emissions of all sub-sectors [kgCO2]
    pub fn total_emissions(&self) -> f64 {
        let values: Vec<f64> = self
            .sub_sectors
            .iter()
            .map(SubSector::total_emissions)
            .collect();
        nansum(&values)
    }

    /// Sub-sector with the given name, or `None` if not found
    pub fn get_sub_sector(&self, name: &str) -> Option<&SubSector> {
        let sub_sector = self.sub_sectors.iter().find(|s| s.name() == name);
        if sub_sector.is_none() {
            warn!(
                "No match found for sub-sector=`{}` in country=`{}`",
                name, self.iso2
            );
        }
        sub_sector
    }

    // Shared implementation of the sub-sector / process queries
    fn query<S, P>(
        &self,
        sub_sector: Option<&str>,
        process: Option<&str>,
        unit: &str,
        by_sub_sector: S,
        by_process: P,
    ) -> Option<Metric>
    where
        S: Fn(&SubSector) -> f64,
        P: Fn(&Process) -> f64,
    {
        match (sub_sector, process) {
            (None, _) => Some(Metric::BySubSector(
                self.sub_sectors
                    .iter()
                    .map(|s| SubSectorValue::new(s.name(), by_sub_sector(s), unit))
                    .collect(),
            )),
            (Some(name), None) => self
                .get_sub_sector(name)
                .map(|s| Metric::Value(by_sub_sector(s))),
            (Some(name), Some(process)) => self
                .get_sub_sector(name)
                .and_then(|s| s.get_process(process))
                .map(|p| Metric::Value(by_process(p))),
        }
    }

    /// Emissions [kgCO2]
    ///
    /// - no sub-sector: list of values for every sub-sector
    /// - sub-sector: value for the sub-sector
    /// - sub-sector and process: value for the process
    ///
    /// `None` when the sub-sector or process is not found.
    pub fn get_total_emissions(&self, sub_sector: Option<&str>, process: Option<&str>) -> Option<Metric> {
        self.query(
            sub_sector,
            process,
            UNIT_EMISSIONS,
            SubSector::total_emissions,
            Process::total_emissions,
        )
    }

    /// Emission intensity [kgCO2/tonne], with the same query modes as `get_total_emissions`
    pub fn get_total_emission_intensity(
        &self,
        sub_sector: Option<&str>,
        process: Option<&str>,
    ) -> Option<Metric> {
        self.query(
            sub_sector,
            process,
            UNIT_EMISSION_INTENSITY,
            SubSector::total_emission_intensity,
            Process::total_emission_intensity,
        )
    }

    /// Emission intensity by sub-sector name [kgCO2/tonne]
    pub fn emission_intensity_by_sub_sector(&self) -> BTreeMap<String, f64> {
        self.sub_sectors
            .iter()
            .map(|s| (s.name().to_string(), s.total_emission_intensity()))
            .collect()
    }

    /// Total fuel demand by fuel [GJ] of one sub-sector (or all sub-sectors when `None`)
    pub fn get_total_fuel_demand(&self, sub_sector: Option<&str>) -> Vec<FuelMix> {
        let mix = self
            .sub_sectors
            .iter()
            .filter(|s| sub_sector.map(|name| s.name() == name).unwrap_or(true))
            .flat_map(|s| s.get_fuel_mix(None));
        FuelMix::aggregate(mix)
    }

    /// Total fuel demand [GJ] of every sub-sector
    pub fn get_total_fuel_demand_all_sub_sectors(&self) -> Vec<SubSectorValue> {
        self.sub_sectors
            .iter()
            .map(|s| {
                let demand = self.get_total_fuel_demand(Some(s.name()));
                let values: Vec<f64> = demand.iter().map(|d| d.value).collect();
                let unit = demand
                    .first()
                    .map(|d| d.unit.clone())
                    .unwrap_or_else(|| UNIT_DEMAND.to_string());
                SubSectorValue::new(s.name(), nansum(&values), unit)
            })
            .collect()
    }

    /// Fuel demand of all sub-sectors [GJ]
    pub fn total_fuel_demand(&self) -> f64 {
        let values: Vec<f64> = self
            .get_total_fuel_demand(None)
            .iter()
            .map(|d| d.value)
            .collect();
        nansum(&values)
    }
}

// -------------------- Collection of countries

/// Emission intensities by sub-sector of a country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryIntensity {
    /// Country code
    pub iso2: String,
    /// Country name
    pub country: Option<String>,
    /// Emission intensity by sub-sector [kgCO2/tonne]
    pub values: BTreeMap<String, f64>,
}

/// List of countries with unique codes
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CountryCollection {
    countries: Vec<Country>,
}

impl CountryCollection {
    /// Constructor
    ///
    /// Fails when a country code appears more than once.
    pub fn new(countries: Vec<Country>) -> Result<Self> {
        ensure_unique("country", "collection", countries.iter().map(Country::iso2))?;
        Ok(Self { countries })
    }

    /// Countries
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Country with the given code
    pub fn get_country(&self, iso2: &str) -> Option<&Country> {
        let country = self.countries.iter().find(|c| c.iso2() == iso2);
        if country.is_none() {
            warn!("No country found matching iso2=`{}` in collection", iso2);
        }
        country
    }

    /// Country codes
    pub fn iso2s(&self) -> Vec<&str> {
        self.countries.iter().map(Country::iso2).collect()
    }

    /// Country names (`None` for unknown codes)
    pub fn country_names(&self) -> Vec<Option<&str>> {
        self.countries.iter().map(Country::country_name).collect()
    }

    /// Sub-sector names found in any country, sorted
    pub fn sub_sector_names(&self) -> Vec<&'static str> {
        self.countries
            .iter()
            .flat_map(Country::sub_sector_names)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Process names by sub-sector, taken from the first country
    pub fn process_names(&self) -> BTreeMap<&'static str, Vec<&str>> {
        self.countries
            .first()
            .map(|c| {
                c.sub_sectors()
                    .iter()
                    .map(|s| (s.name(), s.process_names()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Emission intensities by sub-sector of every country
    pub fn emission_intensity_details(&self) -> Vec<CountryIntensity> {
        self.countries
            .iter()
            .map(|c| CountryIntensity {
                iso2: c.iso2().to_string(),
                country: c.country_name().map(str::to_string),
                values: c.emission_intensity_by_sub_sector(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::ConsumptionCategory;
    use crate::fuels::{FuelConsumption, FuelEmissionFactors};
    use crate::processes::Production;
    use crate::types::FuelType;
    use pretty_assertions::assert_eq;

    fn process(name: &str, fuel: &str, demand: f64, output: f64) -> Process {
        let factors = FuelEmissionFactors::default();
        let fuel = FuelConsumption::new(fuel, demand, "GJ/tonne", None, &factors).unwrap();
        let category = ConsumptionCategory::new("Process heat", vec![fuel]).unwrap();
        let production = Production {
            physical_output: output,
            ..Default::default()
        };
        Process::new(name, production, 10.0, vec![category], Some(100.0)).unwrap()
    }

    fn germany() -> Country {
        let steel = SubSector::new(
            "Iron and steel",
            vec![
                process("Electric arc", "Electricity", 2.0, 10.0),
                process("Integrated steelworks", "Coke", 10.0, 20.0),
            ],
        )
        .unwrap();
        let cement = SubSector::new(
            "Non-metallic mineral products",
            vec![process("Cement", "Electricity", 0.5, 4.0)],
        )
        .unwrap();
        Country::with_sub_sectors("DE", vec![steel, cement]).unwrap()
    }

    #[test]
    fn country_identifiers() {
        let de = Country::new("DE");
        assert_eq!(de.country_name(), Some("Germany"));
        assert_eq!(de.iso3(), Some("DEU"));
        let gr = Country::new("EL");
        assert_eq!(gr.iso3(), Some("GRC"));
        assert_eq!(gr.iso2(), "EL");
        let eu = Country::new("EU28");
        assert_eq!(eu.country_name(), Some("EU27 + UK"));
        assert!(eu.info().unwrap().aggregate);
        let unknown = Country::new("ZZ");
        assert_eq!(unknown.country_name(), None);
        assert_eq!(unknown.iso3(), None);
        assert_eq!(unknown.total_emissions(), 0.0);
        assert!(unknown.get_sub_sector("Iron and steel").is_none());
    }

    #[test]
    fn country_duplicated_sub_sectors() {
        let mut country = germany();
        let dup = vec![
            SubSector::new("Iron and steel", vec![]).unwrap(),
            SubSector::new("Iron and steel", vec![]).unwrap(),
        ];
        assert!(country.set_sub_sectors(dup).unwrap_err().is_validation());
        // unchanged
        assert_eq!(country.sub_sectors().len(), 2);
    }

    #[test]
    fn country_emission_queries() {
        let country = germany();
        let all = country.get_total_emissions(None, None).unwrap();
        let all = all.by_sub_sector().unwrap();
        assert_eq!(all.len(), 2);
        for entry in all {
            let sub = country.get_sub_sector(&entry.sub_sector).unwrap();
            assert_eq!(entry.value, sub.total_emissions());
            assert_eq!(entry.unit, "kgCO2");
        }
        let sum: f64 = all.iter().map(|e| e.value).sum();
        assert!((sum - country.total_emissions()).abs() < 1e-9);

        let steel = country.get_total_emissions(Some("Iron and steel"), None).unwrap();
        assert_eq!(
            steel.value(),
            Some(country.get_sub_sector("Iron and steel").unwrap().total_emissions())
        );
        // 2 GJ/t * 100 kgCO2/GJ + 10 kgCO2/t, 10 t
        let eaf = country
            .get_total_emissions(Some("Iron and steel"), Some("Electric arc"))
            .unwrap();
        assert_eq!(eaf.value(), Some(2100.0));
        assert!(country.get_total_emissions(Some("Chemicals Industry"), None).is_none());
        assert!(country
            .get_total_emissions(Some("Iron and steel"), Some("Cement"))
            .is_none());
    }

    #[test]
    fn country_intensity_queries() {
        let country = germany();
        let cement = country
            .get_total_emission_intensity(Some("Non-metallic mineral products"), Some("Cement"))
            .unwrap();
        assert_eq!(cement.value(), Some(0.5 * 100.0 + 10.0));
        let all = country.get_total_emission_intensity(None, None).unwrap();
        assert_eq!(all.by_sub_sector().unwrap()[0].unit, "kgCO2/tonne");
        let by_sub = country.emission_intensity_by_sub_sector();
        assert_eq!(by_sub["Non-metallic mineral products"], 60.0);
    }

    #[test]
    fn country_fuel_demand() {
        let country = germany();
        let demand = country.get_total_fuel_demand(None);
        assert_eq!(
            demand,
            vec![
                FuelMix::new(FuelType::Electricity, 2.0 * 10.0 + 0.5 * 4.0, "GJ"),
                FuelMix::new(FuelType::Coke, 200.0, "GJ"),
            ]
        );
        assert_eq!(country.total_fuel_demand(), 222.0);
        let cement = country.get_total_fuel_demand(Some("Non-metallic mineral products"));
        assert_eq!(cement, vec![FuelMix::new(FuelType::Electricity, 2.0, "GJ")]);
        assert!(country.get_total_fuel_demand(Some("Chemicals Industry")).is_empty());
        let by_sub = country.get_total_fuel_demand_all_sub_sectors();
        assert_eq!(
            by_sub,
            vec![
                SubSectorValue::new("Iron and steel", 220.0, "GJ"),
                SubSectorValue::new("Non-metallic mineral products", 2.0, "GJ"),
            ]
        );
    }

    #[test]
    fn country_grid_cascade() {
        let mut country = germany();
        assert_eq!(country.grid_carbon_intensity(), 100.0);
        let before = country.total_emissions();
        country.set_grid_carbon_intensity(0.0);
        assert_eq!(country.grid_carbon_intensity(), 0.0);
        // electricity: 20 GJ + 2 GJ at 100 kgCO2/GJ
        assert_eq!(before - country.total_emissions(), 2200.0);
    }

    #[test]
    fn country_collection() {
        let fr = Country::new("FR");
        let collection = CountryCollection::new(vec![germany(), fr]).unwrap();
        assert_eq!(collection.iso2s(), vec!["DE", "FR"]);
        assert_eq!(collection.country_names(), vec![Some("Germany"), Some("France")]);
        assert_eq!(
            collection.sub_sector_names(),
            vec!["Iron and steel", "Non-metallic mineral products"]
        );
        assert_eq!(
            collection.process_names()["Iron and steel"],
            vec!["Electric arc", "Integrated steelworks"]
        );
        let details = collection.emission_intensity_details();
        assert_eq!(details[0].country.as_deref(), Some("Germany"));
        assert!(details[1].values.is_empty());
        assert!(collection.get_country("FR").is_some());
        assert!(collection.get_country("ES").is_none());
        let dup = CountryCollection::new(vec![Country::new("FR"), Country::new("FR")]);
        assert!(dup.unwrap_err().is_validation());
    }
}
