use crate::error::CatalogError;
use core_types::{CoreError, Stock};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of fields in a stock record: name, price, percentage benefit.
pub const RECORD_ARITY: usize = 3;

/// Turns one `(name, price, percentage_benefit)` record into a `Stock`.
///
/// `record` is only used to label errors. Surrounding whitespace in each field
/// is ignored.
pub fn parse_record<I, S>(record: usize, fields: I) -> Result<Stock, CatalogError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields: Vec<S> = fields.into_iter().collect();
    if fields.len() != RECORD_ARITY {
        return Err(CatalogError::MalformedRecord {
            record,
            reason: format!("expected {} fields, found {}", RECORD_ARITY, fields.len()),
        });
    }

    let name = fields[0].as_ref().trim();
    let price = parse_decimal(record, "price", fields[1].as_ref())?;
    let percentage_benefit = parse_decimal(record, "percentage benefit", fields[2].as_ref())?;

    Stock::new(name, price, percentage_benefit).map_err(|e| match e {
        // Blank names and negative prices are bad data, not internal failures.
        CoreError::InvalidInput(_, reason) => CatalogError::MalformedRecord { record, reason },
        other => CatalogError::Core(other),
    })
}

fn parse_decimal(record: usize, field: &str, raw: &str) -> Result<Decimal, CatalogError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CatalogError::MalformedRecord {
            record,
            reason: format!("{} '{}' is not a number", field, raw),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_a_well_formed_record() {
        let stock = parse_record(1, ["Share-GRUT", " 498.76 ", "39.42"]).unwrap();
        assert_eq!(stock.name(), "Share-GRUT");
        assert_eq!(stock.price(), dec!(498.76));
        assert_eq!(stock.percentage_benefit(), dec!(39.42));
    }

    #[test]
    fn accepts_scientific_notation() {
        let stock = parse_record(1, ["Share-E", "1e2", "5"]).unwrap();
        assert_eq!(stock.price(), dec!(100));
    }

    #[test]
    fn wrong_arity_is_malformed() {
        let err = parse_record(4, ["Share-A", "10"]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { record: 4, .. }));

        let err = parse_record(5, ["Share-A", "10", "1", "extra"]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { record: 5, .. }));
    }

    #[test]
    fn non_numeric_fields_are_malformed() {
        let err = parse_record(2, ["Share-A", "ten", "1"]).unwrap_err();
        match err {
            CatalogError::MalformedRecord { record, reason } => {
                assert_eq!(record, 2);
                assert!(reason.contains("price"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_record(3, ["Share-A", "10", ""]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { record: 3, .. }));
    }

    #[test]
    fn negative_price_and_blank_name_are_malformed() {
        let err = parse_record(7, ["Share-NEG", "-1.5", "10"]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { record: 7, .. }));

        let err = parse_record(8, ["", "1.5", "10"]).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { record: 8, .. }));
    }

    #[test]
    fn negative_benefit_is_allowed() {
        let stock = parse_record(1, ["Share-DOWN", "100", "-12.5"]).unwrap();
        assert_eq!(stock.profit(), dec!(87.5));
    }
}
