//! Tab-delimited output table serialization.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use spinpost_core::{ErrorInfo, SpinpostError};

use crate::observables::ConditionObservables;

/// Writes the observable table.
///
/// Layout: a seed header line, a column header line, then one row per
/// condition in pipeline order. The fixed columns are
/// `T H E Cv M Mz X`, followed by a `<t> <t>z X_<t>` triple per species in
/// lexicographic label order. The species columns come from the dataset's
/// declared species set, so the header is complete even when every
/// condition was skipped. Column order never depends on incidental map
/// iteration; rerunning on the same input is byte-identical.
pub fn write_table<W: Write>(
    writer: &mut W,
    seed: u64,
    species: &[String],
    rows: &[ConditionObservables],
) -> io::Result<()> {
    writeln!(writer, "# seed = {seed}")?;

    write!(writer, "#\tT\tH\tE\tCv\tM\tMz\tX\t")?;
    for label in species {
        write!(writer, "{label}\t{label}z\tX_{label}\t")?;
    }
    writeln!(writer)?;

    for row in rows {
        write!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            row.temperature,
            row.field,
            row.mean_energy,
            row.specific_heat,
            row.mean_mag,
            row.mean_mag_z,
            row.susceptibility
        )?;
        for species in row.species.values() {
            write!(
                writer,
                "{}\t{}\t{}\t",
                species.mean_mag, species.mean_mag_z, species.susceptibility
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Renders the table into a string.
pub fn table_to_string(seed: u64, species: &[String], rows: &[ConditionObservables]) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    let _ = write_table(&mut buffer, seed, species, rows);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Writes the table to a file path.
pub fn write_table_path(
    path: &Path,
    seed: u64,
    species: &[String],
    rows: &[ConditionObservables],
) -> Result<(), SpinpostError> {
    let mut file = File::create(path).map_err(|err| table_io_error(path, &err))?;
    write_table(&mut file, seed, species, rows).map_err(|err| table_io_error(path, &err))?;
    Ok(())
}

fn table_io_error(path: &Path, err: &io::Error) -> SpinpostError {
    SpinpostError::Io(
        ErrorInfo::new("table-write", err.to_string())
            .with_context("path", path.display().to_string()),
    )
}
