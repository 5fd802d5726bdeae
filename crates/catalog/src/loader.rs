use crate::Catalog;
use crate::error::CatalogError;
use crate::record::parse_record;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads a catalog from a CSV file with one header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog = load_csv_from_reader(BufReader::new(file))?;

    tracing::info!(path = %path.display(), stocks = catalog.len(), "Catalog loaded.");
    Ok(catalog)
}

/// Loads a catalog from any CSV source. The first row is treated as a header
/// and skipped; blank lines are ignored.
///
/// Records are labelled in errors by their line number in the source.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    // `flexible` lets rows of the wrong length through so they are reported
    // as malformed records rather than as a generic CSV error.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut stocks = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|err| match err.kind() {
            // Bad bytes in one row are that row's fault, not the reader's.
            csv::ErrorKind::Utf8 { pos, err: source } => CatalogError::MalformedRecord {
                record: pos.as_ref().map_or(row + 2, |p| p.line() as usize),
                reason: source.to_string(),
            },
            _ => CatalogError::from(err),
        })?;
        // Header is line 1, so the first data row is line 2.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row + 2);
        stocks.push(parse_record(line, record.iter())?);
    }

    Ok(Catalog::from_stocks(stocks))
}
