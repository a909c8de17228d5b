const TABLES: [&str; 8] = [
    "--demand",
    "test_data/demand.csv",
    "--activity",
    "test_data/activity.csv",
    "--emission",
    "test_data/emission.csv",
    "--grid",
    "test_data/grid.csv",
];

fn args<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = TABLES.to_vec();
    args.extend_from_slice(extra);
    args
}

#[test]
fn germany_2015() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "DE", "-y", "2015"]))
        .stdout()
        .contains("** Country: Germany (DE)")
        .stdout()
        .contains("Total emissions [kgCO2]: 315933.33")
        .stdout()
        .contains("Total fuel demand [GJ]: 2720.00")
        .stdout()
        .contains("- Iron and steel: 915.81")
        .unwrap();
}

#[test]
fn germany_2015_scenario() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "DE", "-y", "2015", "-g", "0"]))
        .stdout()
        .contains("Grid carbon intensity [kgCO2/GJ]: 100.00 -> 0.00")
        .stdout()
        .contains("Delta emissions [kgCO2]: -47000.00")
        .unwrap();
}

#[test]
fn germany_2015_custom_factors() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&[
            "-i",
            "DE",
            "-y",
            "2015",
            "--factors",
            "test_data/carbon_content.csv",
        ]))
        .stdout()
        .contains("Total emissions [kgCO2]: 321800.00")
        .unwrap();
}

#[test]
fn eu28_2015() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "EU28", "-y", "2015"]))
        .stdout()
        .contains("** Country: EU27 + UK (EU28)")
        .stdout()
        .contains("Total emissions [kgCO2]: 160000.00")
        .unwrap();
}

#[test]
fn json_output() {
    let path = std::env::temp_dir().join("eurenergy_test_cli_de_2015.json");
    let path_str = path.to_str().unwrap();
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "DE", "-y", "2015", "-g", "0", "--json", path_str]))
        .unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["iso2"], "DE");
    assert_eq!(json["country"], "Germany");
    assert_eq!(json["year"], 2015);
    assert_eq!(json["total_fuel_demand"], 2720.0);
    assert_eq!(
        json["processes"]["Non-metallic mineral products"]["Cement"]
            ["Total emission intensity (kgCO2/tonne)"],
        823.8
    );
    assert!((json["scenario"]["delta_emissions"].as_f64().unwrap() + 47000.0).abs() < 0.01);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_grid_data() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "ES", "-y", "2015"]))
        .fails_with(exitcode::DATAERR)
        .stderr()
        .contains("No grid carbon intensity available for country `ES` and year 2015")
        .unwrap();
}

#[test]
fn wrong_grid_unit() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "--demand",
            "test_data/demand.csv",
            "--activity",
            "test_data/activity.csv",
            "--emission",
            "test_data/emission.csv",
            "--grid",
            "test_data/grid_bad_unit.csv",
            "-i",
            "DE",
            "-y",
            "2015",
        ])
        .fails_with(exitcode::DATAERR)
        .unwrap();
}

#[test]
fn missing_table_file() {
    assert_cli::Assert::main_binary()
        .with_args(&[
            "--demand",
            "test_data/nonexistent.csv",
            "--activity",
            "test_data/activity.csv",
            "--emission",
            "test_data/emission.csv",
            "--grid",
            "test_data/grid.csv",
            "-i",
            "DE",
            "-y",
            "2015",
        ])
        .fails_with(exitcode::IOERR)
        .unwrap();
}

#[test]
fn wrong_year() {
    assert_cli::Assert::main_binary()
        .with_args(&args(&["-i", "DE", "-y", "last"]))
        .fails_with(exitcode::USAGE)
        .unwrap();
}

#[test]
fn show_license() {
    assert_cli::Assert::main_binary()
        .with_args(&["-L"])
        .stdout()
        .contains("Permission is hereby granted")
        .unwrap();
}
