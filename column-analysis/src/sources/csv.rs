//! Delimited text file source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use super::DataSource;
use crate::dataset::Dataset;
use crate::error::{ColumnAnalysisError, Result};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Whether the first record holds the column names
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Comment prefix (lines starting with this are ignored)
    pub comment: Option<u8>,
    /// Whether leading and trailing whitespace is removed from fields
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::csv()
    }
}

impl CsvOptions {
    /// Comma separated values with a header row.
    pub fn csv() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
            comment: None,
            trim: false,
        }
    }

    /// Tab separated values with a header row.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::csv()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_comment(mut self, comment: u8) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .comment(self.comment)
            .flexible(true)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}

/// A CSV or TSV file loaded fully into memory.
///
/// Records may have different numbers of fields.
///
/// # Examples
///
/// ```rust
/// use column_analysis::sources::{CsvOptions, CsvSource};
///
/// let data = "width,class\n1.5,setosa\n2.0,virginica\n";
/// let dataset = CsvSource::from_reader(data.as_bytes(), &CsvOptions::csv()).unwrap();
///
/// assert_eq!(dataset.headers(), ["width", "class"]);
/// assert_eq!(dataset.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a source for a comma separated file with a header row.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    /// Creates a source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Reads the file into a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Dataset> {
        let file = File::open(&self.path).map_err(|e| {
            ColumnAnalysisError::data_source_with_source(
                "CSV",
                format!("cannot open {}", self.path.display()),
                e,
            )
        })?;
        let dataset = Self::from_reader(BufReader::new(file), &self.options)?;
        info!(
            rows = dataset.len(),
            columns = dataset.headers().len(),
            "Loaded delimited file"
        );
        Ok(dataset)
    }

    /// Reads delimited records from any reader.
    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset> {
        let mut csv_reader = options.reader_builder().from_reader(reader);

        let headers = if options.has_header {
            csv_reader
                .headers()?
                .iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        let mut dataset = Dataset::with_headers(headers);
        for record in csv_reader.records() {
            let record = record?;
            dataset.push_row(record.iter().map(str::to_string).collect());
        }
        debug!(rows = dataset.len(), "Parsed delimited records");
        Ok(dataset)
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<Dataset> {
        CsvSource::load(self)
    }

    fn description(&self) -> String {
        let kind = if self.options.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        };
        format!("{kind} file {}", self.path.display())
    }
}
