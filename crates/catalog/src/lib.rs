//! # Stock Catalog
//!
//! Holds the candidate stocks for a run and turns raw records into them.
//!
//! - **Ownership:** the `Catalog` owns every `Stock`. Optimizers borrow the
//!   catalog and refer to stocks by index, so derived fields are computed once
//!   and shared.
//! - **All or nothing:** a single bad record fails the whole load. No partial
//!   catalog is ever handed out.
//! - **Read-only:** there is no way to mutate a catalog after it is built,
//!   which makes it safe to share across threads.

pub mod error;
pub mod loader;
pub mod record;

pub use error::CatalogError;
pub use loader::{load_csv, load_csv_from_reader};
pub use record::parse_record;

use core_types::Stock;

/// An ordered, immutable list of candidate stocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    stocks: Vec<Stock>,
}

impl Catalog {
    /// Builds a catalog from `(name, price, percentage_benefit)` records.
    ///
    /// Order is preserved and duplicate names are kept as independent stocks.
    /// Records are numbered from 1 in error messages.
    pub fn from_records<I, R, S>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stocks = records
            .into_iter()
            .enumerate()
            .map(|(i, fields)| parse_record(i + 1, fields))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_stocks(stocks))
    }

    pub fn from_stocks(stocks: Vec<Stock>) -> Self {
        Self { stocks }
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn get(&self, index: usize) -> Option<&Stock> {
        self.stocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stock> {
        self.stocks.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Stock;
    type IntoIter = std::slice::Iter<'a, Stock>;

    fn into_iter(self) -> Self::IntoIter {
        self.stocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn keeps_record_order_and_duplicates() {
        let catalog = Catalog::from_records([
            ["Share-B", "20", "5"],
            ["Share-A", "10", "1"],
            ["Share-B", "30", "2"],
        ])
        .unwrap();

        let names: Vec<&str> = catalog.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Share-B", "Share-A", "Share-B"]);
        assert_eq!(catalog.get(2).unwrap().price(), dec!(30));
    }

    #[test]
    fn one_bad_record_fails_the_whole_load() {
        let result = Catalog::from_records(vec![
            vec!["Share-A", "10", "1"],
            vec!["Share-B", "oops", "1"],
        ]);
        assert!(matches!(
            result,
            Err(CatalogError::MalformedRecord { record: 2, .. })
        ));
    }

    #[test]
    fn empty_input_is_an_empty_catalog() {
        let records: Vec<Vec<String>> = Vec::new();
        let catalog = Catalog::from_records(records).unwrap();
        assert!(catalog.is_empty());
    }
}
