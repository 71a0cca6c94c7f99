use serde::{Deserialize, Serialize};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Tab-separated values, no escaping.
    Tsv,
    /// Comma-separated values, every field double-quoted.
    Csv,
}

impl ExportFormat {
    /// Field separator for this format.
    pub fn separator(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            Self::Csv => b',',
        }
    }

    /// File name offered for download.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tsv => "table-data.tsv",
            Self::Csv => "table-data.csv",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Tsv => "text/tab-separated-values",
            Self::Csv => "text/csv",
        }
    }
}

/// How CSV fields are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Wrap every field in quotes and double embedded quotes.
    #[default]
    Escaped,
    /// Wrap every field in quotes without escaping anything.
    ///
    /// A value containing `"` or `,` produces output that no CSV reader will split correctly.
    Legacy,
}

/// Options controlling export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Ignored for [`ExportFormat::Tsv`].
    pub csv_quoting: CsvQuoting,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            csv_quoting: CsvQuoting::default(),
        }
    }

    pub fn with_csv_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.csv_quoting = quoting;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(ExportFormat::Tsv)
    }
}
