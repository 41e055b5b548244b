use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::coordinate::Coordinate;
use crate::errors::IntervalParseError;
use crate::models::Interval;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Get a reader for stdin if the path is `-`, otherwise defer to [`get_dynamic_reader`].
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

/// Parse one tab separated `start<TAB>end[<TAB>rest...]` line into an interval.
///
/// Everything after the end column is kept verbatim as the value. `line_no` is only used for
/// error messages.
pub fn parse_interval_line<N>(
    line: &str,
    line_no: usize,
) -> Result<Interval<N, Option<String>>, IntervalParseError>
where
    N: Coordinate + FromStr,
{
    let mut fields = line.splitn(3, '\t');

    let start = parse_field(fields.next(), "start", line_no)?;
    let end = parse_field(fields.next(), "end", line_no)?;
    let val = fields.next().map(|rest| rest.to_string());

    Ok(Interval { start, end, val })
}

fn parse_field<N>(
    field: Option<&str>,
    name: &'static str,
    line_no: usize,
) -> Result<N, IntervalParseError>
where
    N: FromStr,
{
    let raw = field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(IntervalParseError::MissingField {
            field: name,
            line: line_no,
        })?;

    raw.parse::<N>()
        .map_err(|_| IntervalParseError::InvalidCoordinate {
            field: name,
            value: raw.to_string(),
            line: line_no,
        })
}

/// Read every interval from a reader. Blank lines and lines starting with `#` are skipped.
pub fn read_intervals_from<N, R>(
    reader: R,
) -> Result<Vec<Interval<N, Option<String>>>, IntervalParseError>
where
    N: Coordinate + FromStr,
    R: BufRead,
{
    let mut intervals = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        intervals.push(parse_interval_line(&line, idx + 1)?);
    }
    Ok(intervals)
}

///
/// Read a (possibly gzip'd) interval file into memory.
///
/// # Arguments
///
/// - path: path to the file to read, or `-` for stdin
///
pub fn read_intervals<N>(path: &str) -> Result<Vec<Interval<N, Option<String>>>>
where
    N: Coordinate + FromStr,
{
    let reader = get_dynamic_reader_w_stdin(path)?;
    let intervals = read_intervals_from(reader)
        .with_context(|| format!("Failed to parse intervals from {path}"))?;
    Ok(intervals)
}
