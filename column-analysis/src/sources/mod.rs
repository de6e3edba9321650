//! Data sources that load a [`Dataset`](crate::dataset::Dataset).
//!
//! Only delimited text files are supported. Every field is kept as the raw
//! string found in the file; numeric interpretation is left to the analyzers.

use std::fmt::Debug;

use crate::dataset::Dataset;
use crate::error::Result;

mod csv;

pub use self::csv::{CsvOptions, CsvSource};

/// A source that can produce a [`Dataset`].
///
/// # Examples
///
/// ```rust,no_run
/// use column_analysis::sources::{CsvSource, DataSource};
///
/// # fn example() -> column_analysis::Result<()> {
/// let source = CsvSource::new("data/iris.csv");
/// let dataset = source.load()?;
/// println!("{} loaded {} rows", source.description(), dataset.len());
/// # Ok(())
/// # }
/// ```
pub trait DataSource: Debug + Send + Sync {
    /// Reads the whole source into memory.
    fn load(&self) -> Result<Dataset>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}
