//! Robust CSV loading with polars.
//!
//! The source exports come from spreadsheets with inconsistent separators and
//! encodings. Each file is read with every column as text, trying the
//! separator/encoding combinations in order until one yields a header that
//! satisfies the table schema.

use log::debug;
use polars::prelude::{CsvEncoding, CsvReadOptions, DataFrame, PolarsError, SerReader};
use std::io::Cursor;
use std::path::Path;

use super::error::{IngestError, IngestResult};
use super::schema::{clean_header, header_of, TableSchema};

/// Separator and encoding of one read attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    pub separator: u8,
    pub latin1: bool,
}

/// Dialects tried in order: comma/UTF-8, semicolon/UTF-8, then the Latin-1 variants.
pub const DIALECTS: [CsvDialect; 4] = [
    CsvDialect {
        separator: b',',
        latin1: false,
    },
    CsvDialect {
        separator: b';',
        latin1: false,
    },
    CsvDialect {
        separator: b';',
        latin1: true,
    },
    CsvDialect {
        separator: b',',
        latin1: true,
    },
];

/// Transcode Latin-1 bytes to UTF-8. Input that is already valid UTF-8 is
/// returned unchanged.
pub fn latin1_to_utf8(bytes: Vec<u8>) -> Vec<u8> {
    match String::from_utf8(bytes) {
        Ok(text) => text.into_bytes(),
        Err(e) => e
            .into_bytes()
            .iter()
            .map(|&b| char::from(b))
            .collect::<String>()
            .into_bytes(),
    }
}

/// Read `path` with one dialect, all columns as strings, header cleaned.
pub fn read_with_dialect(path: &Path, dialect: CsvDialect) -> Result<DataFrame, PolarsError> {
    let options = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| {
            opts.with_separator(dialect.separator)
                .with_encoding(CsvEncoding::Utf8)
        });

    let mut df = if dialect.latin1 {
        let bytes = latin1_to_utf8(std::fs::read(path)?);
        options
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?
    } else {
        options
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?
    };

    let cleaned: Vec<String> = header_of(&df).iter().map(|n| clean_header(n)).collect();
    df.set_column_names(cleaned)?;
    Ok(df)
}

/// Read `path` with the first dialect whose header satisfies `schema`, then
/// resolve it to canonical column names.
///
/// # Returns
/// * `Err(IngestError::Schema)` when some dialect parsed but none had the
///   required columns (missing columns are those of the first parse)
/// * `Err(IngestError::Csv)` when no dialect could parse the file at all
pub fn read_table(path: &Path, schema: &TableSchema) -> IngestResult<DataFrame> {
    let mut first_missing: Option<Vec<String>> = None;
    let mut last_error: Option<PolarsError> = None;

    for dialect in DIALECTS {
        match read_with_dialect(path, dialect) {
            Ok(df) => {
                let missing = schema.missing(&header_of(&df));
                if missing.is_empty() {
                    debug!(
                        "Read {} rows of '{}' from {} with separator '{}'{}",
                        df.height(),
                        schema.table,
                        path.display(),
                        dialect.separator as char,
                        if dialect.latin1 { " (latin-1)" } else { "" }
                    );
                    return schema.resolve(df);
                }
                first_missing.get_or_insert(missing);
            }
            Err(e) => last_error = Some(e),
        }
    }

    match (first_missing, last_error) {
        (Some(missing), _) => Err(IngestError::Schema {
            table: schema.table,
            missing,
        }),
        (None, Some(source)) => Err(IngestError::Csv {
            path: path.to_path_buf(),
            source,
        }),
        (None, None) => Err(IngestError::Schema {
            table: schema.table,
            missing: Vec::new(),
        }),
    }
}
