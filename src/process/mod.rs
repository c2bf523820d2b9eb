// src/process/mod.rs
use csv::ReaderBuilder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::{debug, trace};

pub mod autotype;
pub mod date_parser;

pub use autotype::{infer, Value};

static NULL: Value = Value::Null;

/// One CSV data row with its inferred values, addressable by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Header row of the file this record came from, shared by every row.
    headers: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(headers: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { headers, values }
    }

    /// Value under `column`, if the file has that column. With duplicate
    /// header names the rightmost column wins.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .and_then(|i| self.values.get(i))
    }

    /// Like `get`, but an absent column reads as `Value::Null`.
    pub fn value(&self, column: &str) -> &Value {
        self.get(column).unwrap_or(&NULL)
    }

    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A parsed CSV file: its header and every data row in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Arc<[String]>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse comma-separated text with a header row, inferring every field.
///
/// Each data row must have as many fields as the header. Completely empty
/// input gives an empty table.
pub fn parse_csv(text: &str) -> Result<Table, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Arc<[String]> = rdr.headers()?.iter().map(str::to_string).collect();
    trace!(columns = headers.len(), "parsed header");

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let values = record.iter().map(infer).collect();
        rows.push(Record::new(Arc::clone(&headers), values));
    }

    debug!(rows = rows.len(), columns = headers.len(), "parsed csv");
    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,paddock::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn parses_standings_with_inferred_types() -> Result<()> {
        init_test_logging();
        let content = "season,round,position,points,wins,driverId,constructorId
2023,1,1,25,1,max_verstappen,red_bull
2023,1,2,18,0,perez,red_bull
2023,1,3,15,0,alonso,aston_martin
";
        let table = parse_csv(content)?;

        assert_eq!(
            table.headers.as_ref(),
            [
                "season",
                "round",
                "position",
                "points",
                "wins",
                "driverId",
                "constructorId"
            ]
        );
        assert_eq!(table.len(), 3);

        let first = &table.rows[0];
        assert_eq!(first.value("points"), &Value::Number(25.0));
        assert_eq!(first.value("season").as_i64(), Some(2023));
        assert_eq!(first.value("driverId").as_str(), Some("max_verstappen"));
        assert_eq!(table.rows[2].value("constructorId").as_str(), Some("aston_martin"));
        Ok(())
    }

    #[test]
    fn quoted_fields_and_missing_values() -> Result<()> {
        let content = "driverId,givenName,familyName,dateOfBirth,code
hulkenberg,Nico,Hülkenberg,1987-08-19,HUL
de_vries,Nyck,\"de Vries, Jr\",,
";
        let table = parse_csv(content)?;
        assert_eq!(table.len(), 2);

        let nyck = &table.rows[1];
        assert_eq!(nyck.value("familyName").as_str(), Some("de Vries, Jr"));
        assert!(nyck.value("dateOfBirth").is_null());
        assert!(nyck.value("code").is_null());
        assert!(table.rows[0].value("dateOfBirth").as_date().is_some());
        Ok(())
    }

    #[test]
    fn absent_column_reads_as_null() -> Result<()> {
        let table = parse_csv("constructorId,name\nferrari,Ferrari\n")?;
        let row = &table.rows[0];
        assert_eq!(row.get("nationality"), None);
        assert!(row.value("nationality").is_null());
        Ok(())
    }

    #[test]
    fn header_only_and_empty_input() -> Result<()> {
        let table = parse_csv("season,round,raceName\n")?;
        assert_eq!(table.headers.len(), 3);
        assert!(table.is_empty());

        let table = parse_csv("")?;
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn ragged_row_is_an_error() {
        let content = "season,round\n2023,1\n2023,2,extra\n";
        let err = parse_csv(content).unwrap_err();
        assert!(matches!(err.kind(), csv::ErrorKind::UnequalLengths { .. }));
    }

    #[test]
    fn record_serializes_as_ordered_map() -> Result<()> {
        let table = parse_csv("season,round,raceName,date\n2023,1,Bahrain Grand Prix,2023-03-05\n")?;
        let json = serde_json::to_string(&table.rows[0])?;
        assert_eq!(
            json,
            r#"{"season":2023.0,"round":1.0,"raceName":"Bahrain Grand Prix","date":"2023-03-05"}"#
        );
        Ok(())
    }
}
