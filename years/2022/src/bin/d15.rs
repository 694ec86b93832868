use anyhow::{anyhow, Context, Result};
use lib::prelude::Opts;
use y2022::sensor::parse_readings;
use y2022::sweep::{find_vacant_point, sum_overlapping_segment_lengths, tuning_frequency};

const ROW: i64 = 2_000_000;
const LIMIT: i64 = 4_000_000;

fn main() -> Result<()> {
    let opts = Opts::parse()?;
    let row = opts.param("row", ROW)?;
    let limit = opts.param("limit", LIMIT)?;

    let (input, path) = lib::input!(opts, "d15.txt");

    lib::cli::run(&opts, &path, input, |mut input| {
        let readings = parse_readings(&mut input)?;
        input.finish()?;

        let part1 = sum_overlapping_segment_lengths(row, &readings);

        let point = find_vacant_point(limit, &readings)
            .with_context(|| anyhow!("no vacant point within 0..={limit}"))?;

        Ok((part1, tuning_frequency(point)))
    })
}
