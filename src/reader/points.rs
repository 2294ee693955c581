//! CSV point record reader, backed by Polars

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use super::Reader;
use crate::plot::PointRecord;
use crate::{MapError, Result};

/// Column holding the point label
pub const NAME_COLUMN: &str = "Name";
/// Column holding the latitude in degrees
pub const LATITUDE_COLUMN: &str = "latitude";
/// Column holding the longitude in degrees
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Reads named point records from a CSV file with a header row
///
/// Only an empty cell counts as a missing value; tokens such as `NA` are kept
/// as text, which makes a coordinate column holding them a load error.
/// Columns other than `Name`, `latitude` and `longitude` are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointReader;

impl Reader for PointReader {
    type Output = Vec<PointRecord>;

    fn read(&self, path: &Path) -> Result<Vec<PointRecord>> {
        let file = std::fs::File::open(path).map_err(|e| {
            MapError::LoadError(format!(
                "Failed to open point file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            // Scan every row so a late non-numeric coordinate is not silently coerced
            .with_infer_schema_length(None)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_null_values(Some(NullValues::AllColumnsSingle("".into()))),
            )
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| {
                MapError::LoadError(format!(
                    "Failed to parse point file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let records = records_from_frame(&df)?;
        info!(
            path = %path.display(),
            records = records.len(),
            "point records loaded"
        );
        Ok(records)
    }
}

/// Convert a DataFrame with `Name`, `latitude` and `longitude` columns into records
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<PointRecord>> {
    let names = typed_column(df, NAME_COLUMN, &DataType::String)?;
    let latitudes = typed_column(df, LATITUDE_COLUMN, &DataType::Float64)?;
    let longitudes = typed_column(df, LONGITUDE_COLUMN, &DataType::Float64)?;

    let names = names.as_materialized_series().str().map_err(polars_error)?;
    let latitudes = latitudes
        .as_materialized_series()
        .f64()
        .map_err(polars_error)?;
    let longitudes = longitudes
        .as_materialized_series()
        .f64()
        .map_err(polars_error)?;

    names
        .into_iter()
        .zip(latitudes)
        .zip(longitudes)
        .enumerate()
        .map(|(row, ((name, latitude), longitude))| {
            for (column, value) in [(LATITUDE_COLUMN, latitude), (LONGITUDE_COLUMN, longitude)] {
                if let Some(v) = value {
                    if !v.is_finite() {
                        return Err(MapError::LoadError(format!(
                            "Row {}: '{}' value {} is not a finite number",
                            row + 1,
                            column,
                            v
                        )));
                    }
                }
            }
            Ok(PointRecord {
                name: name.unwrap_or_default().to_string(),
                latitude,
                longitude,
            })
        })
        .collect()
}

fn typed_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column> {
    let column = df
        .column(name)
        .map_err(|_| MapError::LoadError(format!("Missing required column '{}'", name)))?;
    column.strict_cast(dtype).map_err(|e| {
        MapError::LoadError(format!(
            "Column '{}' cannot be read as {}: {}",
            name, dtype, e
        ))
    })
}

fn polars_error(e: PolarsError) -> MapError {
    MapError::LoadError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_csv(content: &str) -> Result<Vec<PointRecord>> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buoys.csv");
        std::fs::write(&path, content).unwrap();
        PointReader.read(&path)
    }

    #[test]
    fn test_reads_records_in_file_order() {
        let records = read_csv("Name,latitude,longitude\nA,10.0,-40.0\nB,12.0,-41.0\n").unwrap();
        assert_eq!(
            records,
            vec![
                PointRecord::new("A", 10.0, -40.0),
                PointRecord::new("B", 12.0, -41.0),
            ]
        );
    }

    #[test]
    fn test_extra_columns_and_integer_coordinates() {
        let records =
            read_csv("station_id,Name,longitude,latitude,depth\n62091,M2,-5,53,100\n").unwrap();
        assert_eq!(records, vec![PointRecord::new("M2", 53.0, -5.0)]);
    }

    #[test]
    fn test_empty_cell_is_missing() {
        let records = read_csv("Name,latitude,longitude\nA,10.0,-40.0\nB,,-41.0\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].latitude, None);
        assert_eq!(records[1].longitude, Some(-41.0));
    }

    #[test]
    fn test_na_token_is_not_missing() {
        let err = read_csv("Name,latitude,longitude\nA,10.0,-40.0\nB,NA,-41.0\n").unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_na_name_is_kept_as_text() {
        let records = read_csv("Name,latitude,longitude\nNA,10.0,-40.0\n").unwrap();
        assert_eq!(records[0].name, "NA");
    }

    #[test]
    fn test_missing_column() {
        let err = read_csv("Name,lat,longitude\nA,10.0,-40.0\n").unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = read_csv("Name,latitude,longitude\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = PointReader
            .read(Path::new("/nonexistent/buoys.csv"))
            .unwrap_err();
        assert!(matches!(err, MapError::LoadError(_)));
    }

    #[test]
    fn test_records_from_frame() {
        let df = df! {
            "Name" => ["A", "B"],
            "latitude" => [Some(10.0), None],
            "longitude" => [-40.0, -41.0],
        }
        .unwrap();
        let records = records_from_frame(&df).unwrap();
        assert_eq!(records[0], PointRecord::new("A", 10.0, -40.0));
        assert_eq!(records[1].latitude, None);
    }
}
