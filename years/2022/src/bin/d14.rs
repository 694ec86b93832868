use anyhow::Result;
use lib::prelude::{IStr, Opts};
use y2022::cave::{Cave, SOURCE};

fn main() -> Result<()> {
    let opts = Opts::parse()?;
    let (input, path) = lib::input!(opts, "d14.txt");
    lib::cli::run(&opts, &path, input, solve)
}

fn solve(mut input: IStr) -> Result<(usize, usize)> {
    let mut cave = Cave::from_input(&mut input)?;
    input.finish()?;

    let mut floored = cave.clone();

    let part1 = cave.fill_with_sand_from(SOURCE);
    log::trace!("cave without floor:\n{cave}");

    floored.add_baseline_around(SOURCE)?;
    let part2 = floored.fill_with_sand_from(SOURCE);
    log::trace!("cave with floor:\n{floored}");

    Ok((part1, part2))
}
