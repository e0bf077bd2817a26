use std::fs;

use discogs2xlsx::{
    discogs::{DiscogsError, NoProgress, PassOutcome},
    management::CatalogAggregate,
    spreadsheet::{COLUMNS, GRADE_COLUMNS, write_catalog},
    types::{CanonicalRecord, CatalogExport, CatalogKind, GradePrices, Pass, PassReport},
};

fn record(album: &str, instance_id: u64) -> CanonicalRecord {
    CanonicalRecord {
        album: album.to_string(),
        year: 2018,
        id: instance_id + 1,
        format: "VINYL".to_string(),
        quantity: "1".to_string(),
        instance_id,
        catno: "PIASR440LP".to_string(),
        styles: "Modern Classical, Downtempo, New Age".to_string(),
        url: format!("https://api.discogs.com/releases/{}", instance_id + 1),
        have: None,
        want: None,
        uri: None,
        notes: None,
        num_for_sale: None,
        lowest_price: None,
        prices: None,
    }
}

fn enriched(album: &str, instance_id: u64) -> CanonicalRecord {
    let mut prices = GradePrices::new();
    prices.insert("mint".to_string(), "24.43".to_string());
    prices.insert("near_mint".to_string(), "21.86".to_string());

    CanonicalRecord {
        have: Some(2533),
        want: Some(323),
        uri: Some("https://www.discogs.com/Dead-Can-Dance-Dionysus/release/12736525".to_string()),
        notes: Some("℗ 2018 Dead Can Dance".to_string()),
        num_for_sale: Some(153),
        lowest_price: Some("14.46".to_string()),
        prices: Some(prices),
        ..record(album, instance_id)
    }
}

fn export(kind: CatalogKind, aggregate: CatalogAggregate) -> CatalogExport {
    CatalogExport {
        username: "vinylhoarder".to_string(),
        kind,
        aggregate,
        passes: vec![PassReport {
            pass: Pass::Catalog,
            outcome: PassOutcome::Complete,
        }],
    }
}

fn is_xlsx(path: &std::path::Path) -> bool {
    let bytes = fs::read(path).expect("output file exists");
    bytes.starts_with(b"PK")
}

#[test]
fn test_column_layout() {
    assert_eq!(COLUMNS.len(), 18);
    assert_eq!(COLUMNS[0], "Band");
    assert_eq!(COLUMNS[2], "Album");
    assert_eq!(COLUMNS[11], "Lowest Price");
    assert_eq!(COLUMNS[12], "Mint (M)");
    assert_eq!(COLUMNS[17], "Good (G)");
    assert_eq!(GRADE_COLUMNS.len(), COLUMNS.len() - 12);
}

#[test]
fn test_write_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discogs-collection.xlsx");

    let mut aggregate = CatalogAggregate::new();
    aggregate.merge("Dead Can Dance".to_string(), enriched("Dionysus", 382774613));
    aggregate.merge("Dead Can Dance".to_string(), record("Anastasis", 11));
    aggregate.merge("Arcana".to_string(), record("Dark Age Of Reason", 7));

    let rows = write_catalog(
        &export(CatalogKind::Collection, aggregate),
        &path,
        &mut NoProgress,
    )
    .unwrap();

    assert_eq!(rows, 3);
    assert!(is_xlsx(&path));
}

#[test]
fn test_write_empty_wantlist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discogs-wantlist.xlsx");

    let rows = write_catalog(
        &export(CatalogKind::Wantlist, CatalogAggregate::new()),
        &path,
        &mut NoProgress,
    )
    .unwrap();

    assert_eq!(rows, 0);
    assert!(is_xlsx(&path));
}

#[test]
fn test_write_partial_export_with_prices_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.xlsx");

    let mut prices = GradePrices::new();
    prices.insert("good".to_string(), "3.86".to_string());
    let mut aggregate = CatalogAggregate::new();
    aggregate.merge(
        "The Obsessed".to_string(),
        CanonicalRecord {
            prices: Some(prices),
            ..record("Lunar Womb", 3099920)
        },
    );

    let mut catalog = export(CatalogKind::Wantlist, aggregate);
    catalog.passes.push(PassReport {
        pass: Pass::Details,
        outcome: PassOutcome::Partial(DiscogsError::InvalidPayload("test".to_string())),
    });
    assert!(catalog.is_partial());

    let rows = write_catalog(&catalog, &path, &mut NoProgress).unwrap();

    assert_eq!(rows, 1);
    assert!(is_xlsx(&path));
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discogs-collection.xlsx");
    fs::write(&path, "not a spreadsheet").unwrap();

    let mut aggregate = CatalogAggregate::new();
    aggregate.merge("Arcana".to_string(), record("Cantar De Procella", 3));
    write_catalog(
        &export(CatalogKind::Collection, aggregate),
        &path,
        &mut NoProgress,
    )
    .unwrap();

    assert!(is_xlsx(&path));
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.xlsx");

    let result = write_catalog(
        &export(CatalogKind::Collection, CatalogAggregate::new()),
        &path,
        &mut NoProgress,
    );

    assert!(result.is_err());
}
