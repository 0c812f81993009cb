use std::{
    collections::HashMap,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use arc_swap::ArcSwap;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use thiserror::Error;
use tokio::time::sleep;

/// Columns copied into every feature's properties.
pub const PROPERTY_COLUMNS: [&str; 5] = ["name", "address", "narcanlocation", "hours", "location_type"];
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A spreadsheet export to turn into GeoJSON.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    /// Used for `location_type` when the sheet has no such column.
    pub default_location_type: Option<String>,
}

impl CsvSource {
    pub fn render(&self) -> Result<String, ConvertError> {
        let file = File::open(&self.path).map_err(|source| ConvertError::Io {
            path: self.path.clone(),
            source,
        })?;
        let collection = rows_to_features(file, self.default_location_type.as_deref())
            .map_err(|source| ConvertError::Csv {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::to_string(&collection)?)
    }
}

pub fn rows_to_features(
    reader: impl io::Read,
    default_location_type: Option<&str>,
) -> Result<FeatureCollection, csv::Error> {
    // exports drop trailing empty cells or add stray ones, so rows may be ragged
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut features = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                log::warn!("skipping row {row}: {err}");
                continue;
            }
        };
        // cells past the end of a short row read as ""; extra cells are dropped
        let record: HashMap<&str, &str> = headers
            .iter()
            .enumerate()
            .map(|(i, column)| (column, record.get(i).unwrap_or_default()))
            .collect();
        let Some((lng, lat)) = coordinates(row, &record) else {
            continue;
        };
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![lng, lat]))),
            id: None,
            properties: Some(properties(&record, default_location_type)),
            foreign_members: None,
        });
    }
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

// a column missing from the sheet becomes "", except location_type which
// takes the default when there is one
fn properties(record: &HashMap<&str, &str>, default_location_type: Option<&str>) -> JsonObject {
    PROPERTY_COLUMNS
        .iter()
        .map(|&column| {
            let value = match (record.get(column), column) {
                (Some(value), _) => (*value).to_owned(),
                (None, "location_type") => default_location_type.unwrap_or_default().to_owned(),
                (None, _) => String::new(),
            };
            (column.to_owned(), JsonValue::String(value))
        })
        .collect()
}

// empty coordinates are skipped quietly, unparsable ones with a warning
fn coordinates(row: usize, record: &HashMap<&str, &str>) -> Option<(f64, f64)> {
    let (lat, lng) = (cell(record, LATITUDE)?, cell(record, LONGITUDE)?);
    match (lat.parse(), lng.parse()) {
        (Ok(lat), Ok(lng)) => Some((lng, lat)),
        _ => {
            log::warn!("skipping row {row}: bad coordinates {lat:?}, {lng:?}");
            None
        }
    }
}

fn cell<'a>(record: &HashMap<&str, &'a str>, column: &str) -> Option<&'a str> {
    record
        .get(column)
        .map(|value| (*value).trim())
        .filter(|value| !value.is_empty())
}

pub fn convert_file(source: &CsvSource, output: &Path) -> Result<(), ConvertError> {
    let geojson = source.render()?;
    fs::write(output, geojson).map_err(|source| ConvertError::Io {
        path: output.to_owned(),
        source,
    })?;
    log::info!(
        "GeoJSON file {} has been updated from {}",
        output.display(),
        source.path.display()
    );
    Ok(())
}

async fn reload_geojson(source: CsvSource, every: Duration, geo: Arc<ArcSwap<String>>) {
    loop {
        sleep(every).await;
        log::info!("reloading {}", source.path.display());
        match source.render() {
            Ok(new) => geo.store(Arc::new(new)),
            Err(err) => log::error!("error reloading geojson, keeping the old one: {err}"),
        }
    }
}

/// Renders `source` now and keeps re-rendering it in the background.
pub fn get_reloading_geojson(
    source: CsvSource,
    every: Duration,
) -> Result<Arc<ArcSwap<String>>, ConvertError> {
    let geojson = Arc::new(ArcSwap::new(Arc::new(source.render()?)));
    tokio::spawn(reload_geojson(source, every, geojson.clone()));
    Ok(geojson)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(csv: &str, default_location_type: Option<&str>) -> FeatureCollection {
        rows_to_features(csv.as_bytes(), default_location_type).unwrap()
    }

    fn property<'a>(feature: &'a Feature, key: &str) -> &'a str {
        feature.property(key).and_then(JsonValue::as_str).unwrap()
    }

    #[test]
    fn skips_rows_without_coordinates() {
        let fc = convert(
            "name,address,latitude,longitude\n\
             A,1 Main St,41.4,-74.3\n\
             B,2 Main St,,-74.3\n\
             C,3 Main St,north,-74.3\n\
             D,4 Main St,41.5,-74.2\n",
            None,
        );
        assert_eq!(fc.features.len(), 2);
        assert_eq!(property(&fc.features[0], "name"), "A");
        assert_eq!(property(&fc.features[1], "name"), "D");
        let geometry = fc.features[1].geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![-74.2, 41.5]));
    }

    #[test]
    fn ragged_rows_do_not_abort_conversion() {
        let fc = convert(
            "name,address,hours,latitude,longitude\n\
             A,1 Main,9-5,41.4,-74.3\n\
             B,2 Main,,41.5,-74.2,extra\n\
             C,3 Main\n\
             D,4 Main,24/7,41.6\n",
            None,
        );
        assert_eq!(fc.features.len(), 2);
        assert_eq!(property(&fc.features[0], "name"), "A");
        assert_eq!(property(&fc.features[0], "hours"), "9-5");
        assert_eq!(property(&fc.features[1], "name"), "B");
        assert_eq!(property(&fc.features[1], "hours"), "");
    }

    #[test]
    fn short_row_keeps_column_defaults_apart() {
        let fc = convert(
            "name,latitude,longitude,location_type\nA,41.4,-74.3\n",
            Some("facility"),
        );
        // the column exists, the cell is just missing
        assert_eq!(property(&fc.features[0], "location_type"), "");
    }

    #[test]
    fn missing_columns_are_filled() {
        let fc = convert("name,latitude,longitude\nA,41.4,-74.3\n", Some("facility"));
        let feature = &fc.features[0];
        assert_eq!(property(feature, "address"), "");
        assert_eq!(property(feature, "hours"), "");
        assert_eq!(property(feature, "narcanlocation"), "");
        assert_eq!(property(feature, "location_type"), "facility");
    }

    #[test]
    fn present_location_type_wins_over_default() {
        let fc = convert(
            "name,location_type,latitude,longitude\nA,Hospital,41.4,-74.3\nB,,41.4,-74.3\n",
            Some("facility"),
        );
        assert_eq!(property(&fc.features[0], "location_type"), "Hospital");
        assert_eq!(property(&fc.features[1], "location_type"), "");
    }

    #[test]
    fn output_parses_as_facilities() {
        let fc = convert(
            "name,hours,location_type,latitude,longitude\nA,,Nursing Home,41.4,-74.3\n",
            None,
        );
        let facilities = ocmap_shared::location::facilities(&fc).unwrap();
        assert_eq!(facilities[0].hours, None);
        assert_eq!(facilities[0].kind, ocmap_shared::FacilityKind::NursingHome);
    }
}
