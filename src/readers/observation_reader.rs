use crate::error::{ProcessingError, Result};
use crate::models::ObservationRecord;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, SNOW_DEPTH_ELEMENT};
use crate::utils::dates::parse_flexible_date;
use csv::{ByteRecord, ReaderBuilder, Trim};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reads GHCN-Daily CSV extracts:
/// `ID, DATETIME, ELEMENT, DATA_VALUE, M_FLAG, Q_FLAG, S_FLAG, OBS_TIME`
pub struct ObservationReader {
    element: String,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            element: SNOW_DEPTH_ELEMENT.to_string(),
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read every snow depth row in input order.
    ///
    /// Rows for other elements are skipped before any other column is
    /// inspected. A snow depth row with an unparseable date or value aborts
    /// the read.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        if !path.exists() {
            return Err(ProcessingError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let records = if self.use_mmap {
            self.read_observations_mmap(path)?
        } else {
            self.read_observations_buffered(path)?
        };

        info!(
            "Read {} {} observations from {}",
            records.len(),
            self.element,
            path.display()
        );

        Ok(records)
    }

    fn read_observations_buffered(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.parse_records(reader, path)
    }

    /// Memory-mapped variant for large by-year extracts
    fn read_observations_mmap(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.parse_records(&mmap[..], path)
    }

    fn parse_records<R: Read>(&self, source: R, path: &Path) -> Result<Vec<ObservationRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (index, row) in reader.byte_records().enumerate() {
            let row = row?;
            let line_number = row
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 1);

            match self.parse_row(&row, path, line_number)? {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!("Skipped {} rows for other elements", skipped);
        Ok(records)
    }

    /// Parse one CSV row; `Ok(None)` for rows of other elements.
    ///
    /// The element column is compared as raw bytes before anything else, so
    /// short or non-UTF-8 rows of other elements are dropped untouched.
    fn parse_row(
        &self,
        row: &ByteRecord,
        path: &Path,
        line_number: u64,
    ) -> Result<Option<ObservationRecord>> {
        if row.get(2) != Some(self.element.as_bytes()) {
            return Ok(None);
        }

        if row.len() < 4 {
            return Err(ProcessingError::malformed(
                path,
                line_number,
                format!("expected at least 4 columns, found {}", row.len()),
            ));
        }

        let field = |index: usize| -> Result<Option<&str>> {
            row.get(index)
                .map(|bytes| {
                    std::str::from_utf8(bytes).map_err(|_| {
                        ProcessingError::malformed(
                            path,
                            line_number,
                            format!("column {} is not valid UTF-8", index + 1),
                        )
                    })
                })
                .transpose()
        };

        let station_id = field(0)?.unwrap_or_default();
        let raw_date = field(1)?.unwrap_or_default();
        let date = parse_flexible_date(raw_date).map_err(|_| {
            ProcessingError::malformed(path, line_number, format!("invalid date: '{}'", raw_date))
        })?;

        let raw_value = field(3)?.unwrap_or_default();
        let value = if raw_value.is_empty() {
            None
        } else {
            Some(raw_value.parse::<f64>().map_err(|_| {
                ProcessingError::malformed(
                    path,
                    line_number,
                    format!("invalid data value: '{}'", raw_value),
                )
            })?)
        };

        let optional = |index: usize| -> Result<Option<String>> {
            Ok(field(index)?
                .filter(|text| !text.is_empty())
                .map(str::to_string))
        };

        let record = ObservationRecord::new(
            station_id.to_string(),
            date,
            self.element.clone(),
            value,
        )
        .with_flags(optional(4)?, optional(5)?, optional(6)?, optional(7)?);

        Ok(Some(record))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_extract(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_read_observations_keeps_snow_depth_only() -> Result<()> {
        let temp_file = write_extract(&[
            "USW00094728,20220101,PRCP,3,,,W,2400",
            "USW00094728,20220101,SNWD,50,,,W,2400",
            "USC00300028,20220101,TMAX,-56,,,7,0800",
            "USC00300028,20220101,SNWD,127,,,7,0800",
        ]);

        let records = ObservationReader::new().read_observations(temp_file.path())?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].station_id, "USW00094728");
        assert_eq!(records[0].value, Some(50.0));
        assert_eq!(records[0].s_flag.as_deref(), Some("W"));
        assert_eq!(records[0].obs_time.as_deref(), Some("2400"));
        assert_eq!(records[0].m_flag, None);
        assert_eq!(records[1].station_id, "USC00300028");
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());

        Ok(())
    }

    #[test]
    fn test_empty_value_is_none() -> Result<()> {
        let temp_file = write_extract(&["A,2022-01-01,SNWD,,,,,"]);

        let records = ObservationReader::new().read_observations(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, None);

        Ok(())
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let temp_file = write_extract(&["A,20220101,SNWD,10,,,,", "A,2022XX01,SNWD,10,,,,"]);

        let result = ObservationReader::new().read_observations(temp_file.path());

        match result {
            Err(ProcessingError::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("2022XX01"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_on_other_element_is_ignored() -> Result<()> {
        let temp_file = write_extract(&["A,not-a-date,PRCP,10,,,,", "A,20220101,SNWD,10,,,,"]);

        let records = ObservationReader::new().read_observations(temp_file.path())?;
        assert_eq!(records.len(), 1);

        Ok(())
    }

    #[test]
    fn test_short_row_of_other_element_is_ignored() -> Result<()> {
        let temp_file = write_extract(&["A,20220101,PRCP", "A,20220101,SNWD,50,,,,"]);

        let records = ObservationReader::new().read_observations(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, Some(50.0));

        Ok(())
    }

    #[test]
    fn test_non_utf8_flag_on_other_element_is_ignored() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"A,20220101,TMAX,3,\xff,,,\nA,20220101,SNWD,50,,,,\n")?;

        let records = ObservationReader::new().read_observations(temp_file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].station_id, "A");

        Ok(())
    }

    #[test]
    fn test_non_utf8_snow_depth_row_is_malformed() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"A,20220101,SNWD,50,\xff,,,\n")?;

        let result = ObservationReader::new().read_observations(temp_file.path());

        assert!(matches!(result, Err(ProcessingError::MalformedRecord { line: 1, .. })));

        Ok(())
    }

    #[test]
    fn test_bad_value_is_fatal() {
        let temp_file = write_extract(&["A,20220101,SNWD,deep,,,,"]);

        let result = ObservationReader::new().read_observations(temp_file.path());
        assert!(matches!(result, Err(ProcessingError::MalformedRecord { .. })));
    }

    #[test]
    fn test_short_row_is_fatal() {
        let temp_file = write_extract(&["A,20220101,SNWD"]);

        let result = ObservationReader::new().read_observations(temp_file.path());
        assert!(matches!(result, Err(ProcessingError::MalformedRecord { .. })));
    }

    #[test]
    fn test_mmap_matches_buffered() -> Result<()> {
        let temp_file = write_extract(&[
            "A,20220101,SNWD,50,,,,",
            "B,20220102,SNWD,0,,,,",
            "B,20220102,SNOW,5,,,,",
        ]);

        let buffered = ObservationReader::new().read_observations(temp_file.path())?;
        let mapped = ObservationReader::new()
            .with_mmap(true)
            .read_observations(temp_file.path())?;

        assert_eq!(buffered, mapped);
        assert_eq!(mapped.len(), 2);

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = ObservationReader::new().read_observations(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(ProcessingError::FileNotFound { .. })));
    }
}
