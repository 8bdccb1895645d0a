//! Source-to-canonical column maps and schema validation.

use polars::prelude::{DataFrame, PlSmallStr};

use super::error::{IngestError, IngestResult};

/// One canonical column and the source headers it may appear under.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl ColumnSpec {
    const fn required(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            canonical,
            aliases,
            required: true,
        }
    }

    const fn optional(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            canonical,
            aliases,
            required: false,
        }
    }

    /// First header naming this column, canonical name first.
    fn find<'h>(&self, header: &'h [String]) -> Option<&'h str> {
        std::iter::once(self.canonical)
            .chain(self.aliases.iter().copied())
            .find_map(|name| header.iter().find(|h| h.as_str() == name))
            .map(String::as_str)
    }
}

/// Expected columns of one source table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [ColumnSpec],
}

pub const EVENTS_SCHEMA: TableSchema = TableSchema {
    table: "events",
    columns: &[
        ColumnSpec::required("sessionId", &[]),
        ColumnSpec::required("shipName", &[]),
        ColumnSpec::required("startGMTDate", &[]),
        ColumnSpec::required("endGMTDate", &[]),
        ColumnSpec::required("eventName", &[]),
        ColumnSpec::optional("duration", &[]),
        ColumnSpec::optional("decLatitude", &[]),
        ColumnSpec::optional("decLongitude", &[]),
    ],
};

pub const CONSUMPTION_SCHEMA: TableSchema = TableSchema {
    table: "consumption",
    columns: &[
        ColumnSpec::required("sessionId", &["SESSION_ID"]),
        ColumnSpec::required("consumedQuantity", &["CONSUMED_QUANTITY"]),
    ],
};

pub const COATINGS_SCHEMA: TableSchema = TableSchema {
    table: "coatings",
    columns: &[
        ColumnSpec::required("shipName", &["Nome do navio"]),
        ColumnSpec::required("applicationDate", &["Data da aplicacao"]),
        ColumnSpec::required("baselineMonths", &["Cr1. Período base de verificação"]),
        ColumnSpec::required("maxIdleMonths", &["Cr1. Parada máxima acumulada no período"]),
    ],
};

pub const INSPECTIONS_SCHEMA: TableSchema = TableSchema {
    table: "inspections",
    columns: &[
        ColumnSpec::required("shipName", &["Embarcação"]),
        ColumnSpec::required("reportDate", &["Data"]),
        ColumnSpec::required("foulingType", &["Tipo de incrustação da embarcação"]),
    ],
};

/// Trim whitespace and strip quotes from a header cell.
pub fn clean_header(name: &str) -> String {
    name.trim().replace('"', "")
}

pub fn header_of(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|n| n.to_string()).collect()
}

impl TableSchema {
    /// Canonical names of required columns absent from `header`.
    pub fn missing(&self, header: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|spec| spec.required && spec.find(header).is_none())
            .map(|spec| spec.canonical.to_string())
            .collect()
    }

    /// Validate `df` and rename every recognized column to its canonical name.
    ///
    /// # Returns
    /// * `Ok(DataFrame)` with canonical names (optional columns may be absent)
    /// * `Err(IngestError::Schema)` listing the missing required columns
    pub fn resolve(&self, mut df: DataFrame) -> IngestResult<DataFrame> {
        let header = header_of(&df);
        let missing = self.missing(&header);
        if !missing.is_empty() {
            return Err(IngestError::Schema {
                table: self.table,
                missing,
            });
        }

        for spec in self.columns {
            if let Some(source) = spec.find(&header) {
                if source != spec.canonical {
                    df.rename(source, PlSmallStr::from_static(spec.canonical))?;
                }
            }
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header("  \"shipName\" "), "shipName");
        assert_eq!(clean_header("Data"), "Data");
    }

    #[test]
    fn test_missing_reports_canonical_names() {
        let missing = CONSUMPTION_SCHEMA.missing(&header(&["SESSION_ID", "OTHER"]));
        assert_eq!(missing, vec!["consumedQuantity".to_string()]);
        assert!(CONSUMPTION_SCHEMA
            .missing(&header(&["sessionId", "CONSUMED_QUANTITY"]))
            .is_empty());
    }

    #[test]
    fn test_optional_columns_are_not_required() {
        let names = header(&["sessionId", "shipName", "startGMTDate", "endGMTDate", "eventName"]);
        assert!(EVENTS_SCHEMA.missing(&names).is_empty());
    }

    #[test]
    fn test_resolve_renames_aliases() {
        let df = polars::df!(
            "Embarcação" => ["ATLAS"],
            "Data" => ["01/02/2024"],
            "Tipo de incrustação da embarcação" => ["Craca"],
        )
        .unwrap();
        let resolved = INSPECTIONS_SCHEMA.resolve(df).unwrap();
        assert_eq!(
            header_of(&resolved),
            vec!["shipName", "reportDate", "foulingType"]
        );
    }

    #[test]
    fn test_resolve_rejects_missing_columns() {
        let df = polars::df!("Nome do navio" => ["ATLAS"]).unwrap();
        let err = COATINGS_SCHEMA.resolve(df).unwrap_err();
        match err {
            IngestError::Schema { table, missing } => {
                assert_eq!(table, "coatings");
                assert_eq!(missing.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
