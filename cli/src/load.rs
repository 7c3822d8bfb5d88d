use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use pharmacy_graph_core::{Coordinate, FacilityRecord};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Column layout (HIFLD pharmacy export)
// ---------------------------------------------------------------------------

const COL_LONGITUDE: &str = "X";
const COL_LATITUDE: &str = "Y";
const COL_NAME: &str = "NAME";
const COL_CITY: &str = "CITY";
const COL_STATE: &str = "STATE";
const COL_ZIP: &str = "ZIP";

/// Counts from one load, for the startup banner and `status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub kept: usize,
    pub skipped_region: usize,
    pub skipped_coordinates: usize,
    /// Kept rows whose text fields held invalid UTF-8, replaced with U+FFFD.
    pub repaired_text: usize,
}

struct Columns {
    longitude: usize,
    latitude: usize,
    name: usize,
    city: usize,
    state: usize,
    zip: usize,
}

impl Columns {
    fn locate(headers: &csv::ByteRecord, source: &str) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim_ascii() == name.as_bytes())
                .ok_or_else(|| anyhow!("missing required column '{}' in {}", name, source))
        };
        Ok(Self {
            longitude: find(COL_LONGITUDE)?,
            latitude: find(COL_LATITUDE)?,
            name: find(COL_NAME)?,
            city: find(COL_CITY)?,
            state: find(COL_STATE)?,
            zip: find(COL_ZIP)?,
        })
    }
}

/// Load facilities for one state from a pharmacy CSV file.
pub fn load_facilities(path: &Path, state: &str) -> Result<(Vec<FacilityRecord>, LoadReport)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_facilities(file, state, &path.display().to_string())
}

/// Read facilities from CSV, keeping rows whose STATE matches `state`
/// (case-insensitive) and whose X/Y parse to a valid coordinate.
///
/// Rows are read as raw bytes and the state filter runs before any decoding,
/// so stray Latin-1 in other states' rows costs nothing. Text fields of kept
/// rows are decoded lossily. Rows with a blank or malformed position are
/// skipped, not fatal; a missing column is.
pub fn read_facilities<R: Read>(
    reader: R,
    state: &str,
    source: &str,
) -> Result<(Vec<FacilityRecord>, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .byte_headers()
        .with_context(|| format!("Failed to read header row of {}", source))?
        .clone();
    let cols = Columns::locate(&headers, source)?;
    let wanted = state.trim();

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (idx, result) in reader.byte_records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = result.with_context(|| format!("Failed to read row {} of {}", line, source))?;
        report.rows_read += 1;

        let field = |i: usize| row.get(i).map(<[u8]>::trim_ascii).unwrap_or(&[]);

        if !field(cols.state).eq_ignore_ascii_case(wanted.as_bytes()) {
            report.skipped_region += 1;
            continue;
        }

        let coordinate = match parse_coordinate(field(cols.latitude), field(cols.longitude)) {
            Some(c) => c,
            None => {
                debug!(
                    line,
                    name = %text(field(cols.name)),
                    x = %text(field(cols.longitude)),
                    y = %text(field(cols.latitude)),
                    "skipping row without a usable position"
                );
                report.skipped_coordinates += 1;
                continue;
            }
        };

        let name = text(field(cols.name));
        let city = text(field(cols.city));
        let zip = text(field(cols.zip));
        if [&name, &city, &zip].iter().any(|t| matches!(t, Cow::Owned(_))) {
            debug!(line, name = %name, "replaced invalid UTF-8 in text fields");
            report.repaired_text += 1;
        }

        records.push(FacilityRecord {
            name: name.into_owned(),
            city: city.into_owned(),
            zip: zip.into_owned(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        });
    }

    report.kept = records.len();
    info!(
        source,
        state = wanted,
        kept = report.kept,
        rows = report.rows_read,
        skipped_coordinates = report.skipped_coordinates,
        repaired_text = report.repaired_text,
        "loaded pharmacies"
    );

    Ok((records, report))
}

fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn parse_coordinate(latitude: &[u8], longitude: &[u8]) -> Option<Coordinate> {
    let latitude: f64 = std::str::from_utf8(latitude).ok()?.parse().ok()?;
    let longitude: f64 = std::str::from_utf8(longitude).ok()?.parse().ok()?;
    Coordinate::new(latitude, longitude).validated().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "X,Y,OBJECTID,NAME,ADDRESS,CITY,STATE,ZIP\n";

    fn read(body: &str, state: &str) -> Result<(Vec<FacilityRecord>, LoadReport)> {
        let csv = format!("{}{}", HEADER, body);
        read_facilities(csv.as_bytes(), state, "test.csv")
    }

    #[test]
    fn test_filters_by_state() {
        let (records, report) = read(
            "-83.05,42.33,1,Corner Drug,1 Main St,DETROIT,MI,48201\n\
             -81.69,41.49,2,Lakeside Rx,2 Erie Ave,CLEVELAND,OH,44114\n\
             -84.55,42.73,3,Capitol Pharmacy,3 Oak St,LANSING,mi,48933\n",
            "MI",
        )
        .unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Corner Drug", "Capitol Pharmacy"]);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.skipped_region, 1);
        assert_eq!(report.kept, 2);
    }

    #[test]
    fn test_maps_x_to_longitude_and_y_to_latitude() {
        let (records, _) = read("-83.05,42.33,1,Corner Drug,1 Main St,DETROIT,MI,48201\n", "MI").unwrap();
        assert_eq!(records[0].latitude, 42.33);
        assert_eq!(records[0].longitude, -83.05);
        assert_eq!(records[0].city, "DETROIT");
        assert_eq!(records[0].zip, "48201");
    }

    #[test]
    fn test_skips_missing_or_bad_coordinates() {
        let (records, report) = read(
            ",42.33,1,No X,1 Main St,DETROIT,MI,48201\n\
             -83.05,,2,No Y,2 Main St,DETROIT,MI,48201\n\
             abc,42.33,3,Garbled,3 Main St,DETROIT,MI,48201\n\
             -83.05,142.33,4,Off Planet,4 Main St,DETROIT,MI,48201\n\
             -83.06,42.34,5,Good,5 Main St,DETROIT,MI,48202\n",
            "MI",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
        assert_eq!(report.skipped_coordinates, 4);
    }

    #[test]
    fn test_quoted_fields_and_whitespace() {
        let (records, _) = read(
            " -83.05 , 42.33 ,1,\"Smith, Jones & Co\",\"1 Main St, Ste 2\",DETROIT, MI ,48201\n",
            "MI",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Smith, Jones & Co");
    }

    #[test]
    fn test_short_row_is_skipped_not_fatal() {
        let (records, report) = read("-83.05,42.33,1,Truncated\n", "MI").unwrap();
        assert!(records.is_empty());
        assert_eq!(report.skipped_region, 1);
    }

    #[test]
    fn test_invalid_utf8_in_other_state_is_filtered() {
        let mut csv = HEADER.as_bytes().to_vec();
        csv.extend_from_slice(b"-83.05,42.33,1,Corner Drug,1 Main St,DETROIT,MI,48201\n");
        csv.extend_from_slice(b"-81.69,41.49,2,Caf\xe9 Rx,2 Erie Ave,CLEVELAND,OH,44114\n");

        let (records, report) = read_facilities(csv.as_slice(), "MI", "latin1.csv").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Corner Drug");
        assert_eq!(report.skipped_region, 1);
        assert_eq!(report.repaired_text, 0);
    }

    #[test]
    fn test_invalid_utf8_in_kept_row_is_repaired() {
        let mut csv = HEADER.as_bytes().to_vec();
        csv.extend_from_slice(b"-83.05,42.33,1,Caf\xe9 Rx,1 Main St,DETROIT,MI,48201\n");
        csv.extend_from_slice(b"-83.06,42.34,2,Good,2 Main St,DETROIT,MI,48202\n");

        let (records, report) = read_facilities(csv.as_slice(), "MI", "latin1.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Caf\u{fffd} Rx");
        assert_eq!(records[0].zip, "48201");
        assert_eq!(report.repaired_text, 1);
        assert_eq!(report.kept, 2);
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "X,Y,NAME,CITY,STATE\n-83.05,42.33,A,DETROIT,MI\n";
        let err = read_facilities(csv.as_bytes(), "MI", "broken.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ZIP") && msg.contains("broken.csv"), "{}", msg);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pharmacies.csv");
        std::fs::write(
            &path,
            format!("{}-83.05,42.33,1,Corner Drug,1 Main St,DETROIT,MI,48201\n", HEADER),
        )
        .unwrap();
        let (records, report) = load_facilities(&path, "MI").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_facilities(Path::new("/nonexistent/pharmacies.csv"), "MI").unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
