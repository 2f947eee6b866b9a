//! CSV output for the flattened type table.

use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::hierarchy::flatten::TypeTable;

/// Column header of the type-table file.
pub const HEADER: [&str; 6] = ["id", "labels", "properties", "subtypeof", "type", "is_basetype"];

impl TypeTable {
    /// Write the table as CSV to any sink.
    ///
    /// One row per table entry in emission order; `subtypeof` is empty for
    /// basic types and `is_basetype` is the literal `yes` or `no`.
    pub fn write_csv<W: io::Write>(&self, sink: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(sink);
        writer
            .write_record(HEADER)
            .map_err(|e| Error::Io(e.to_string()))?;

        for row in self.rows() {
            let id = row.id.to_string();
            let parent = row.parent.map(|p| p.to_string()).unwrap_or_default();
            let basetype = if row.basetype { "yes" } else { "no" };
            writer
                .write_record([
                    id.as_str(),
                    row.labels.as_str(),
                    row.properties.as_str(),
                    parent.as_str(),
                    row.type_name.as_str(),
                    basetype,
                ])
                .map_err(|e| Error::Io(e.to_string()))?;
        }

        writer.flush().map_err(|e| Error::Io(e.to_string()))
    }

    /// Write the table as CSV to a file path.
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| Error::Io(e.to_string()))?;
        self.write_csv(file)
    }

    /// Render the table as a CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Other(e.to_string()))
    }
}
