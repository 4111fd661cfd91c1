use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::{EXTRACTED_COLUMNS, ExtractedRiskRow, RiskRowSink, RiskRowSinkError};

type Opener<W> = Box<dyn FnOnce() -> std::io::Result<W> + Send>;

/// Writes extracted rows as CSV, flushing each row so partial runs keep what was fetched.
pub struct CsvRiskWriter<W: Write> {
    pending: Option<Opener<W>>,
    writer: Option<csv::Writer<W>>,
}

impl CsvRiskWriter<File> {
    /// The file is only created, truncating what it held, when the header is written.
    pub fn create(path: &Path) -> Self {
        let path = path.to_path_buf();
        Self {
            pending: Some(Box::new(move || {
                File::create(&path).map_err(|e| {
                    std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))
                })
            })),
            writer: None,
        }
    }
}

impl<W: Write> CsvRiskWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            pending: None,
            writer: Some(csv::Writer::from_writer(inner)),
        }
    }

    pub fn into_inner(self) -> Result<W, RiskRowSinkError> {
        match self.writer {
            Some(writer) => writer
                .into_inner()
                .map_err(|e| RiskRowSinkError::WriteError(Box::new(e.into_error()))),
            None => Err(not_opened()),
        }
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<W>, RiskRowSinkError> {
        if let Some(open) = self.pending.take() {
            self.writer = Some(csv::Writer::from_writer(open().map_err(boxed)?));
        }
        self.writer.as_mut().ok_or_else(not_opened)
    }

    fn write_and_flush<I, T>(&mut self, record: I) -> Result<(), RiskRowSinkError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let writer = self.writer()?;
        writer.write_record(record).map_err(boxed)?;
        writer.flush().map_err(boxed)
    }
}

fn boxed(error: impl std::error::Error + Send + Sync + 'static) -> RiskRowSinkError {
    RiskRowSinkError::WriteError(Box::new(error))
}

fn not_opened() -> RiskRowSinkError {
    boxed(std::io::Error::other("csv output was never opened"))
}

impl<W: Write> RiskRowSink for CsvRiskWriter<W> {
    fn write_header(&mut self) -> Result<(), RiskRowSinkError> {
        self.write_and_flush(EXTRACTED_COLUMNS)
    }

    fn write_row(&mut self, row: &ExtractedRiskRow) -> Result<(), RiskRowSinkError> {
        self.write_and_flush(row.cells())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_writes_the_header_and_quotes_cells() {
        let mut writer = CsvRiskWriter::new(Vec::new());
        let row = ExtractedRiskRow {
            project_name: "Water, Land & People".to_string(),
            custom_fields: vec!["Water".to_string(), "Kenya, Nairobi".to_string()],
            ..Default::default()
        };

        writer.write_header().unwrap();
        writer.write_row(&row).unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), EXTRACTED_COLUMNS.join(","));
        let line = lines.next().unwrap();
        assert!(line.contains("\"Water, Land & People\""));
        assert!(line.contains("Water,\"Kenya, Nairobi\""));
        assert_eq!(line.matches(',').count(), EXTRACTED_COLUMNS.len() - 1 + 2);
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_are_on_disk_as_soon_as_they_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risks.csv");
        let mut writer = CsvRiskWriter::create(&path);

        writer.write_header().unwrap();
        writer.write_row(&ExtractedRiskRow::default()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn the_file_is_left_alone_until_the_header_is_written() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "previous extraction\n").unwrap();

        let mut writer = CsvRiskWriter::create(file.path());
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "previous extraction\n"
        );

        writer.write_header().unwrap();
        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.trim_end(), EXTRACTED_COLUMNS.join(","));
    }

    #[test]
    fn an_unwritable_path_fails_on_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("risks.csv");
        let mut writer = CsvRiskWriter::create(&path);

        let error = writer.write_header().unwrap_err();

        assert!(error.to_string().contains("risks.csv"));
        assert!(writer.write_row(&ExtractedRiskRow::default()).is_err());
    }
}
