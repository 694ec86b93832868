//! CLI helpers.

mod bencher;
pub(crate) mod error;
mod output;
mod stdout_logger;

use core::fmt;
use core::ops::AddAssign;
use core::str::FromStr;
use core::time::Duration;
use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::input::IStr;

pub use self::bencher::Bencher;
pub use self::error::{CliError, LineCol};
pub(self) use self::output::{Output, OutputKind};

static STDOUT_LOGGER: stdout_logger::StdoutLogger = stdout_logger::StdoutLogger;

/// Run mode.
#[derive(Default)]
pub enum Mode {
    /// Default run mode.
    #[default]
    Default,
    /// Run as benchmark.
    Bench,
}

/// Input options.
#[derive(Default)]
pub struct Opts {
    /// Run as a benchmark.
    pub mode: Mode,
    /// Run in verbose mode.
    verbose: bool,
    /// Output JSON report.
    json: bool,
    /// Warmup period.
    warmup: Option<u64>,
    /// Bench period.
    time_limit: Option<u64>,
    /// Number of times to run benches.
    count: Option<usize>,
    /// Override of the input file to process.
    input: Option<String>,
    /// Puzzle parameters passed through `--param <name>=<value>`.
    params: HashMap<String, String>,
}

impl Opts {
    /// Parse CLI options.
    pub fn parse() -> Result<Self> {
        let opts = Self::parse_from(std::env::args().skip(1))?;

        if !opts.json {
            let level = if opts.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            };

            log::set_max_level(level);
            log::set_logger(&STDOUT_LOGGER)
                .map_err(|error| anyhow!("failed to set log: {error}"))?;
        }

        Ok(opts)
    }

    /// Parse options from the given arguments.
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            match arg.as_ref() {
                "--bench" => {
                    if !matches!(opts.mode, Mode::Default) {
                        bail!("duplicate `--bench` arguments");
                    }

                    opts.mode = Mode::Bench;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                "--json" => {
                    opts.json = true;
                }
                "--warmup" => {
                    opts.warmup = Some(value(&mut it, "--warmup")?);
                }
                "--time-limit" => {
                    opts.time_limit = Some(value(&mut it, "--time-limit")?);
                }
                "--count" => {
                    opts.count = Some(value(&mut it, "--count")?);
                }
                "--input" => {
                    opts.input = Some(value(&mut it, "--input")?);
                }
                "--param" => {
                    let param: String = value(&mut it, "--param")?;

                    let Some((name, value)) = param.split_once('=') else {
                        bail!("bad argument to `--param`, expected `<name>=<value>`: {param}");
                    };

                    opts.params.insert(name.to_owned(), value.to_owned());
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        Ok(opts)
    }

    /// The input file override, if `--input` was specified.
    pub fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Get the puzzle parameter `name`, or `default` if it was not
    /// specified.
    pub fn param<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(value) = self.params.get(name) else {
            return Ok(default);
        };

        value
            .parse()
            .with_context(|| anyhow!("bad value for parameter `{name}`: {value}"))
    }

    fn output_kind(&self) -> OutputKind {
        if self.json {
            OutputKind::Json
        } else {
            OutputKind::Normal
        }
    }
}

/// Parse the value following a flag.
fn value<I, T>(it: &mut I, flag: &str) -> Result<T>
where
    I: Iterator,
    I::Item: AsRef<str>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = it
        .next()
        .with_context(|| anyhow!("missing argument to `{flag}`"))?;

    value
        .as_ref()
        .parse()
        .with_context(|| anyhow!("bad argument to `{flag}`"))
}

/// Run `solve` over `input` according to the mode in `opts`.
///
/// Errors raised by `solve` are decorated with the location in the input
/// they refer to.
pub fn run<T, O>(opts: &Opts, path: &str, input: IStr, mut solve: T) -> Result<()>
where
    T: FnMut(IStr) -> Result<O>,
    O: fmt::Debug + PartialEq,
{
    let mut solve = move || solve(input).map_err(|e| error::error_context(path, input, e));

    match opts.mode {
        Mode::Default => {
            let value = solve()?;
            let stdout = std::io::stdout();
            let mut o = Output::new(stdout.lock(), opts.output_kind());
            o.info(format_args!("{value:?}"))?;
        }
        Mode::Bench => {
            let mut b = Bencher::new();
            b.iter(opts, solve)?;
        }
    }

    Ok(())
}

#[derive(Default, Deserialize, Serialize)]
pub struct Report {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
}

impl Report {
    /// Build a report out of sorted samples.
    fn from_sorted(samples: &[Duration]) -> Self {
        let count = samples.len();
        let sum = samples.iter().sum::<Duration>();

        let avg = if count == 0 {
            Duration::default()
        } else {
            Duration::from_nanos(u64::try_from(sum.as_nanos() / (count as u128)).unwrap_or_default())
        };

        Self {
            p50: percentile(samples, 5000),
            p95: percentile(samples, 9500),
            p99: percentile(samples, 9900),
            count,
            min: samples.first().copied().unwrap_or_default(),
            max: samples.last().copied().unwrap_or_default(),
            avg,
        }
    }
}

/// Pick the sample at `per10k` ten-thousandths into `samples`.
fn percentile(samples: &[Duration], per10k: usize) -> Duration {
    let index = (samples.len() * per10k / 10000).min(samples.len().saturating_sub(1));
    samples.get(index).copied().unwrap_or_default()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report {
            p50,
            p95,
            p99,
            count,
            min,
            max,
            avg,
        } = self;

        write!(f, "count: {count}, min: {min:?}, max: {max:?}, avg: {avg:?}, 50th: {p50:?}, 95th: {p95:?}, 99th: {p99:?}")
    }
}

impl AddAssign<&Report> for Report {
    fn add_assign(&mut self, rhs: &Report) {
        self.p50 += rhs.p50;
        self.p95 += rhs.p95;
        self.p99 += rhs.p99;
        self.count += rhs.count;
        self.min += rhs.min;
        self.max += rhs.max;
        self.avg += rhs.avg;
    }
}
