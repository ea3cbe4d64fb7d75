use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, WeatherError};
use crate::store::LocationRegistry;
use crate::utils::constants::{
    AIRPORT_CODE_COLUMN, AIRPORT_COLUMN_COUNT, AIRPORT_LATITUDE_COLUMN, AIRPORT_LONGITUDE_COLUMN,
};
use crate::utils::coordinates::parse_coordinate;

/// Totals from one bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl LoadReport {
    pub fn any_loaded(&self) -> bool {
        self.loaded > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Loaded {} airports ({} rows skipped)",
            self.loaded, self.skipped
        )
    }
}

/// Bulk loader for `airports.dat`-style files.
///
/// Each row has 11 comma-separated columns; the code (possibly double-quoted)
/// is column 4, latitude column 6 and longitude column 7. Rows with any other
/// column count, unparseable coordinates or out-of-range coordinates are
/// skipped.
pub struct AirportReader {
    delimiter: u8,
}

impl AirportReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Load every well-formed row of the file at `path` into `registry`
    pub fn load_path(&self, path: &Path, registry: &LocationRegistry) -> Result<LoadReport> {
        let file = File::open(path)?;
        let report = self.load_reader(file, registry)?;

        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "Airport file loaded"
        );
        Ok(report)
    }

    pub fn load_reader<R: Read>(&self, reader: R, registry: &LocationRegistry) -> Result<LoadReport> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut report = LoadReport::default();

        for (line_number, result) in csv_reader.records().enumerate() {
            let line_number = line_number + 1;
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(line = line_number, error = %e, "Skipping unreadable airport row");
                    report.skipped += 1;
                    continue;
                }
            };

            match self.parse_airport_row(&record) {
                Ok(Some((code, latitude, longitude))) => {
                    match registry.add_location(&code, latitude, longitude) {
                        Ok(_) => report.loaded += 1,
                        Err(e) => {
                            tracing::warn!(line = line_number, error = %e, "Skipping airport row");
                            report.skipped += 1;
                        }
                    }
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(line = line_number, error = %e, "Skipping airport row");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Extract `(code, latitude, longitude)`; `None` when the column count is wrong.
    fn parse_airport_row(&self, record: &StringRecord) -> Result<Option<(String, f64, f64)>> {
        if record.len() != AIRPORT_COLUMN_COUNT {
            return Ok(None);
        }

        let code = strip_quotes(&record[AIRPORT_CODE_COLUMN]).trim().to_string();
        if code.is_empty() {
            return Err(WeatherError::InvalidFormat(
                "Airport row has an empty code".to_string(),
            ));
        }

        let latitude = parse_coordinate(&record[AIRPORT_LATITUDE_COLUMN])?;
        let longitude = parse_coordinate(&record[AIRPORT_LONGITUDE_COLUMN])?;

        Ok(Some((code, latitude, longitude)))
    }
}

impl Default for AirportReader {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_quotes(value: &str) -> &str {
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReadingStore;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const AIRPORTS: &str = r#"1,"General Edward Lawrence Logan Intl","Boston","United States","BOS","KBOS",42.364347,-71.005181,19,-5,"A"
2,"Newark Liberty Intl","Newark","United States","EWR","KEWR",40.6925,-74.168667,18,-5,"A"
3,"John F Kennedy Intl","New York","United States","JFK","KJFK",40.639751,-73.778925,13,-5,"A"
4,"La Guardia","New York","United States","LGA","KLGA",40.777245,-73.872608,22,-5,"A"
5,"Morristown Municipal Airport","Morristown","United States","MMU","KMMU",40.79935,-74.4148747,187,-5,"A"
"#;

    fn registry() -> LocationRegistry {
        LocationRegistry::new(Arc::new(ReadingStore::new()))
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"BOS\""), "BOS");
        assert_eq!(strip_quotes("BOS"), "BOS");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn test_load_airports() -> Result<()> {
        let registry = registry();
        let report = AirportReader::new().load_reader(AIRPORTS.as_bytes(), &registry)?;

        assert_eq!(report, LoadReport { loaded: 5, skipped: 0 });
        assert!(report.any_loaded());

        let jfk = registry.find_location("JFK").unwrap();
        assert!((jfk.latitude - 40.639751).abs() < 1e-9);
        assert!((jfk.longitude - -73.778925).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_wrong_column_count_skipped() -> Result<()> {
        let registry = registry();
        let data = "1,\"Short\",\"BOS\",42.0,-71.0\n\
                    2,\"Name\",\"City\",\"Country\",\"JFK\",\"KJFK\",40.639751,-73.778925,13,-5,\"A\",\"extra\"\n";

        let report = AirportReader::new().load_reader(data.as_bytes(), &registry)?;

        assert_eq!(report, LoadReport { loaded: 0, skipped: 2 });
        assert!(!report.any_loaded());
        assert_eq!(registry.location_count(), 0);
        Ok(())
    }

    #[test]
    fn test_bad_coordinates_skipped() -> Result<()> {
        let registry = registry();
        let data = "1,\"A\",\"B\",\"C\",\"XXX\",\"KXXX\",north,-71.0,1,-5,\"A\"\n\
                    2,\"A\",\"B\",\"C\",\"YYY\",\"KYYY\",95.0,-71.0,1,-5,\"A\"\n\
                    3,\"A\",\"B\",\"C\",\"ZZZ\",\"KZZZ\",42.0,-71.0,1,-5,\"A\"\n";

        let report = AirportReader::new().load_reader(data.as_bytes(), &registry)?;

        assert_eq!(report, LoadReport { loaded: 1, skipped: 2 });
        assert_eq!(
            registry.list_codes().into_iter().collect::<Vec<_>>(),
            vec!["ZZZ".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_unquoted_and_padded_code() -> Result<()> {
        let registry = registry();
        let data = "1,Name,City,Country, \"SFO\" ,KSFO, 37.618972 , -122.374889 ,13,-8,A\n";

        AirportReader::new().load_reader(data.as_bytes(), &registry)?;

        assert!(registry.find_location("SFO").is_some());
        Ok(())
    }

    #[test]
    fn test_custom_delimiter() -> Result<()> {
        let registry = registry();
        let data = "1;Name;City;Country;\"ORD\";KORD;41.978603;-87.904842;668;-6;A\n";

        let report = AirportReader::with_delimiter(b';').load_reader(data.as_bytes(), &registry)?;

        assert_eq!(report.loaded, 1);
        assert!(registry.find_location("ORD").is_some());
        Ok(())
    }

    #[test]
    fn test_load_path() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", AIRPORTS)?;

        let registry = registry();
        let report = AirportReader::new().load_path(file.path(), &registry)?;

        assert_eq!(report.loaded, 5);
        assert_eq!(report.summary(), "Loaded 5 airports (0 rows skipped)");
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = AirportReader::new().load_path(Path::new("no/such/airports.dat"), &registry());
        assert!(matches!(result, Err(WeatherError::Io(_))));
    }
}
