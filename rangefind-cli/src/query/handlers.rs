use std::fmt::{Display, Write as FmtWrite};
use std::io::{self, BufRead, BufWriter, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use rangefind_core::Coordinate;
use rangefind_core::utils::{get_dynamic_reader_w_stdin, read_intervals};
use rangefind_index::{IntervalIndex, Overlapper};

type Query<N> = (N, N);

pub fn run_query(matches: &ArgMatches) -> Result<()> {
    let intervals_file = matches
        .get_one::<String>("intervals")
        .expect("A path to an interval file is required.");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    if matches.get_flag("float") {
        run_typed::<f64, _>(matches, intervals_file, &mut writer)?;
    } else {
        run_typed::<i64, _>(matches, intervals_file, &mut writer)?;
    }

    writer.flush()?;

    Ok(())
}

fn run_typed<N, W>(matches: &ArgMatches, intervals_file: &str, writer: &mut W) -> Result<()>
where
    N: Coordinate + FromStr + Display,
    W: Write,
{
    let intervals = read_intervals::<N>(intervals_file)?;
    info!("Loaded {} intervals from {}", intervals.len(), intervals_file);

    let index = IntervalIndex::build(intervals);
    let queries = collect_queries::<N>(matches)?;
    info!("Running {} queries", queries.len());

    write_results(&index, &queries, matches.get_flag("count"), writer)
}

/// Parse a query written as `start<sep>end`, or a bare `start` for a point. Anything after a
/// second separator is ignored.
pub fn parse_query<N>(text: &str, sep: char) -> Result<Query<N>>
where
    N: FromStr,
{
    let mut fields = text.trim().splitn(3, sep);
    let start_str = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing start field in query '{}'", text))?;
    let start = start_str
        .trim()
        .parse::<N>()
        .map_err(|_| anyhow::anyhow!("Invalid query start: {}", start_str))?;

    let end = match fields.next() {
        Some(end_str) => end_str
            .trim()
            .parse::<N>()
            .map_err(|_| anyhow::anyhow!("Invalid query end: {}", end_str))?,
        None => start_str
            .trim()
            .parse::<N>()
            .map_err(|_| anyhow::anyhow!("Invalid query start: {}", start_str))?,
    };

    Ok((start, end))
}

fn collect_queries<N>(matches: &ArgMatches) -> Result<Vec<Query<N>>>
where
    N: FromStr,
{
    let mut queries = Vec::new();

    if let Some(points) = matches.get_many::<String>("point") {
        for point in points {
            queries.push(parse_query::<N>(point, ',')?);
        }
    }

    if let Some(ranges) = matches.get_many::<String>("range") {
        for range in ranges {
            queries.push(parse_query::<N>(range, ',')?);
        }
    }

    if let Some(query_file) = matches.get_one::<String>("queries") {
        let reader = get_dynamic_reader_w_stdin(query_file)?;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let query = parse_query::<N>(&line, '\t')
                .with_context(|| format!("Bad query on line {} of {}", idx + 1, query_file))?;
            queries.push(query);
        }
    }

    if queries.is_empty() {
        anyhow::bail!("No queries given. Use --point, --range or --queries.");
    }

    Ok(queries)
}

/// Write one line per hit (`qstart qend start end value`) or, with `count_only`, one line per
/// query (`qstart qend count`).
pub fn write_results<N, W>(
    index: &IntervalIndex<N, Option<String>>,
    queries: &[Query<N>],
    count_only: bool,
    writer: &mut W,
) -> Result<()>
where
    N: Coordinate + Display,
    W: Write,
{
    let mut output_buffer = String::with_capacity(1024);

    for (start, end) in queries {
        if count_only {
            let count = index.find_iter(*start, *end).count();
            output_buffer.clear();
            writeln!(&mut output_buffer, "{}\t{}\t{}", start, end, count)?;
            writer.write_all(output_buffer.as_bytes())?;
            continue;
        }

        for hit in index.find_iter(*start, *end) {
            output_buffer.clear();
            writeln!(
                &mut output_buffer,
                "{}\t{}\t{}\t{}\t{}",
                start,
                end,
                hit.start,
                hit.end,
                hit.val.as_deref().unwrap_or(".")
            )?;
            writer.write_all(output_buffer.as_bytes())?;
        }
    }

    Ok(())
}
