use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use kutta_core::Trajectory;
use log::info;

/// `t,y` for scalar trajectories, `t,y0,y1,...` otherwise.
pub fn header(dimension: usize) -> Vec<String> {
    let mut columns = Vec::with_capacity(dimension + 1);
    columns.push("t".to_string());
    if dimension == 1 {
        columns.push("y".to_string());
    } else {
        columns.extend((0..dimension).map(|i| format!("y{i}")));
    }
    columns
}

/// Shortest round-trip text that always keeps a decimal point (`0.0`, `10.0`, `0.1`).
fn csv_field(value: f64) -> String {
    format!("{value:?}")
}

/// Writes every sample at full precision.
pub fn write_csv<W: Write>(trajectory: &Trajectory, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header(trajectory.dimension()))?;
    for (t, y) in trajectory.iter() {
        let mut record = Vec::with_capacity(y.len() + 1);
        record.push(csv_field(t));
        record.extend(y.iter().map(|&v| csv_field(v)));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file(trajectory: &Trajectory, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_csv(trajectory, BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    info!("Saved results to {}", path.display());
    Ok(())
}

/// Human-facing listing with six decimals, same column layout as the CSV.
pub fn write_table<W: Write>(trajectory: &Trajectory, out: &mut W) -> Result<()> {
    writeln!(out, "{}", header(trajectory.dimension()).join(","))?;
    for (t, y) in trajectory.iter() {
        let mut line = format!("{t:.6}");
        for v in y.iter() {
            line.push_str(&format!(",{v:.6}"));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
