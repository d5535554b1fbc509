// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Coordinate CSV input and labeled CSV output.
//!
//! Input files have a header row followed by `frame,x,y` rows. Output files
//! carry every sample in its original order with a trailing label column,
//! left empty for unlabeled samples.

use crate::error::SessionError;
use crate::models::sample::Sample;
use std::collections::BTreeMap;
use std::path::Path;

/// Header written at the top of a labeled CSV.
pub const LABELED_HEADER: [&str; 4] = ["Frame", "X", "Y", "Label"];

/// Read the samples from a coordinate CSV file.
///
/// The first row is treated as a header and skipped. Any row that does not
/// hold exactly an integer frame and two numbers fails the whole read.
pub fn read_coordinates(path: &Path) -> Result<Vec<Sample>, SessionError> {
    let file = std::fs::File::open(path).map_err(|e| SessionError::io(path, e))?;
    read_coordinates_from(std::io::BufReader::new(file), path)
}

fn read_coordinates_from<R: std::io::Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<Sample>, SessionError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| SessionError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let malformed = |message: String| SessionError::MalformedRow {
            path: path.to_path_buf(),
            line,
            message,
        };

        if record.len() != 3 {
            return Err(malformed(format!(
                "expected 3 columns, found {}",
                record.len()
            )));
        }

        let frame = record[0]
            .parse::<usize>()
            .map_err(|_| malformed(format!("invalid frame {:?}", &record[0])))?;
        let x = record[1]
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid x {:?}", &record[1])))?;
        let y = record[2]
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid y {:?}", &record[2])))?;

        samples.push(Sample::new(frame, x, y));
    }

    Ok(samples)
}

/// Write every sample with its label (or a blank) to a labeled CSV file.
///
/// Rows keep the order of `samples`; nothing is sorted.
pub fn write_labels(
    path: &Path,
    samples: &[Sample],
    labels: &BTreeMap<usize, u32>,
) -> Result<(), SessionError> {
    let csv_err = |source| SessionError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(LABELED_HEADER).map_err(csv_err)?;

    for (index, sample) in samples.iter().enumerate() {
        let label = labels
            .get(&index)
            .map(|label| label.to_string())
            .unwrap_or_default();
        writer
            .write_record([
                sample.frame.to_string(),
                sample.x.to_string(),
                sample.y.to_string(),
                label,
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|e| SessionError::io(path, e))?;
    Ok(())
}
