use payslip_core::{
    ConfigurationError, FinancialYear, MonthName, PeriodSelection, PlantConfig, PlantRegistry,
};
use std::io::Write;

const REGISTRY_JSON: &str = r#"[
    {
        "name": "Gulbarga",
        "drive_id": "drive-gulbarga",
        "document_sources": { "2024-25": "sheet-g-2024", "2025_26": "" }
    },
    {
        "name": " Omkar ",
        "drive_id": "drive-omkar",
        "document_sources": { "2024_25": "sheet-o-2024", "2025-26": "sheet-o-2025" }
    },
    { "name": "Head Office", "drive_id": "drive-ho" }
]"#;

#[test]
fn loads_json_records_and_resolves() {
    let registry = PlantRegistry::from_json_str(REGISTRY_JSON).unwrap();
    assert_eq!(registry.plant_names(), vec!["Gulbarga", "Omkar", "Head Office"]);

    let resolved = registry
        .resolve(
            "Omkar",
            &PeriodSelection::new(MonthName::January, FinancialYear::new(2025)),
        )
        .unwrap();
    assert_eq!(resolved.document_source_id(), "sheet-o-2025");
    assert_eq!(resolved.calendar_year(), 2026);
    assert_eq!(resolved.drive_id(), "drive-omkar");

    let gulbarga = registry.get("Gulbarga").unwrap();
    assert_eq!(gulbarga.configured_years(), vec![FinancialYear::new(2024)]);
}

#[test]
fn unknown_plant_and_missing_year_are_configuration_errors() {
    let registry = PlantRegistry::from_json_str(REGISTRY_JSON).unwrap();
    let selection = PeriodSelection::new(MonthName::June, FinancialYear::new(2025));

    let unknown = registry.resolve("Bidar", &selection).unwrap_err();
    assert!(matches!(unknown, ConfigurationError::UnknownPlant(ref name) if name == "Bidar"));

    let missing = registry.resolve("Gulbarga", &selection).unwrap_err();
    assert_eq!(
        missing.to_string(),
        "no source configured for Gulbarga / 2025-26"
    );
}

#[test]
fn rejects_malformed_documents() {
    let bad_key = r#"[{ "name": "Kerur", "drive_id": "d", "document_sources": { "2024-26": "x" } }]"#;
    assert!(matches!(
        PlantRegistry::from_json_str(bad_key),
        Err(ConfigurationError::InvalidRegistry(_))
    ));

    let same_year_twice = r#"[{
        "name": "Kerur",
        "drive_id": "d",
        "document_sources": { "2024-25": "AAA", "2024_25": "BBB" }
    }]"#;
    let err = PlantRegistry::from_json_str(same_year_twice).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidRegistry(_)));
    assert!(err.to_string().contains("2024-25"));

    let duplicate = r#"[
        { "name": "Kerur", "drive_id": "a" },
        { "name": "Kerur ", "drive_id": "b" }
    ]"#;
    assert!(matches!(
        PlantRegistry::from_json_str(duplicate),
        Err(ConfigurationError::DuplicatePlant(ref name)) if name == "Kerur"
    ));

    assert!(matches!(
        PlantRegistry::from_json_str("{ not json"),
        Err(ConfigurationError::InvalidRegistry(_))
    ));

    assert!(matches!(
        PlantRegistry::new(vec![PlantConfig::new("  ", "drive")]),
        Err(ConfigurationError::InvalidRegistry(_))
    ));
}

#[test]
fn loads_registry_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(REGISTRY_JSON.as_bytes()).unwrap();

    let registry = PlantRegistry::from_json_file(file.path()).unwrap();
    assert_eq!(registry.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("plants.json");
    assert!(matches!(
        PlantRegistry::from_json_file(&missing),
        Err(ConfigurationError::Io { ref path, .. }) if *path == missing
    ));
}

#[test]
fn builtin_registry_resolves_configured_plant() {
    let registry = PlantRegistry::builtin();
    let resolved = registry
        .resolve(
            "Humnabad",
            &PeriodSelection::new(MonthName::October, FinancialYear::new(2024)),
        )
        .unwrap();
    assert_eq!(
        resolved.document_source_id(),
        "15ouV8H0JGCHD1CTeVaQgOgIODMsI6dXolRyEJOju53U"
    );

    let head_office = registry.resolve(
        "Head Office",
        &PeriodSelection::new(MonthName::October, FinancialYear::new(2024)),
    );
    assert!(matches!(
        head_office,
        Err(ConfigurationError::MissingSource { .. })
    ));
}
