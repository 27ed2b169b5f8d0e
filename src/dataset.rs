//! Tabular input for the analysis engine
//!
//! A `Dataset` is a header row plus string cells. Cells that are empty or hold
//! one of the usual NA markers are stored as missing (`None`), so the engine
//! only ever sees present-or-absent values and does its own numeric coercion.

use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::Path;

/// Tokens that denote a missing cell in delimited input
///
/// Matches the default NA set of common dataframe readers.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header names plus rows of optional string cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Returns true if a raw cell should be treated as missing
pub fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

impl Dataset {
    /// Create an empty dataset with the given column names
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with missing cells
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) -> Result<()> {
        if row.len() > self.headers.len() {
            return Err(AnalysisError::Parse {
                line: self.rows.len() + 2,
                message: format!(
                    "expected at most {} fields, found {}",
                    self.headers.len(),
                    row.len()
                ),
            });
        }
        row.resize(self.headers.len(), None);
        self.rows.push(row);
        Ok(())
    }

    /// Build a dataset from raw string rows, applying the NA rules to every cell
    ///
    /// # Example
    /// ```
    /// use abtest::Dataset;
    ///
    /// let ds = Dataset::from_rows(
    ///     ["group", "revenue"],
    ///     [["A", "1.5"], ["B", "NA"]],
    /// ).unwrap();
    /// assert_eq!(ds.len(), 2);
    /// assert_eq!(ds.column("revenue").unwrap().collect::<Vec<_>>(), vec![Some("1.5"), None]);
    /// ```
    pub fn from_rows<H, R, C>(
        headers: impl IntoIterator<Item = H>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        H: Into<String>,
        R: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut dataset = Self::new(headers);
        for row in rows {
            dataset.push_row(row.into_iter().map(|c| to_cell(c.as_ref())).collect())?;
        }
        Ok(dataset)
    }

    /// Parse comma-separated text with a header row
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_delimited(text, b',')
    }

    /// Parse delimited text with a header row
    ///
    /// Quoting follows RFC 4180. Records may end in LF, CRLF or a lone CR,
    /// and blank lines are skipped.
    pub fn from_delimited(text: &str, delimiter: u8) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(parse_error)?;
        if headers.is_empty() {
            return Err(AnalysisError::Parse {
                line: 1,
                message: "missing header row".to_string(),
            });
        }

        let mut dataset = Self::new(headers.iter());
        for result in reader.records() {
            let record = result.map_err(parse_error)?;
            if record.len() > dataset.headers.len() {
                return Err(AnalysisError::Parse {
                    line: record_line(record.position()),
                    message: format!(
                        "expected {} fields, found {}",
                        dataset.headers.len(),
                        record.len()
                    ),
                });
            }
            dataset.push_row(record.iter().map(to_cell).collect())?;
        }

        tracing::debug!(
            columns = dataset.headers.len(),
            rows = dataset.rows.len(),
            "Parsed delimited input"
        );
        Ok(dataset)
    }

    /// Read a delimited file; `.tsv` files are tab-separated, anything else comma
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        Self::from_delimited(&text, delimiter)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column; duplicate names resolve to the first occurrence
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over one column's cells, `None` for missing
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = Option<&'a str>> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }
}

fn to_cell(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

fn record_line(position: Option<&csv::Position>) -> usize {
    position.map_or(0, |p| p.line() as usize)
}

fn parse_error(err: csv::Error) -> AnalysisError {
    AnalysisError::Parse {
        line: record_line(err.position()),
        message: err.to_string(),
    }
}
