//! Builds every puzzle binary, runs them with JSON output and sums up their
//! bench reports.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use lib::cli::Report;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Deserialize;

/// Package holding the puzzle binaries.
const PACKAGE: &str = "y2022";

#[derive(Debug, Deserialize)]
struct Target {
    name: String,
    kind: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    target: Target,
    executable: Option<PathBuf>,
}

struct Executable {
    name: String,
    path: PathBuf,
}

#[derive(Default)]
struct Opts {
    quiet: bool,
    verbose: bool,
    args: Vec<OsString>,
}

impl Opts {
    /// Parse CLI options, everything after `--` is passed to the binaries.
    fn parse() -> Result<Self> {
        let mut opts = Self::default();
        let mut it = std::env::args_os().skip(1);

        for arg in it.by_ref() {
            let Some(arg) = arg.to_str() else {
                bail!("non-utf8 argument");
            };

            match arg {
                "-q" | "--quiet" => {
                    opts.quiet = true;
                }
                "-V" | "--verbose" => {
                    opts.verbose = true;
                }
                "--" => {
                    break;
                }
                other => {
                    bail!("unsupported argument: {other}");
                }
            }
        }

        opts.args.extend(it);
        Ok(opts)
    }

    /// Test if options are verbose.
    fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse()?;
    let executables = build()?;

    let mut total = Report::default();

    for e in executables {
        let mut cmd = Command::new(&e.path);
        cmd.stdout(Stdio::piped());
        cmd.args(&opts.args[..]);
        cmd.arg("--json");

        let mut child = cmd
            .spawn()
            .with_context(|| anyhow!("{}", e.path.display()))?;

        let output = child.stdout.take().context("missing stdout")?;

        for value in serde_json::Deserializer::from_reader(output).into_iter() {
            let value: serde_json::Value = value?;

            match value.get("type").and_then(|d| d.as_str()) {
                Some("report") => {
                    let report = data::<Report>(value)?;

                    if !opts.quiet {
                        println!("{name}: {report}", name = e.name);
                    }

                    total += &report;
                }
                Some("message") => {
                    let message = data::<Message>(value)?;

                    if opts.is_verbose() || message.kind == "error" {
                        println!("{name}: {}: {}", message.kind, message.output, name = e.name);
                    }
                }
                _ => {}
            }
        }

        let status = child.wait()?;

        if opts.is_verbose() || !status.success() {
            println!("{name}: {status}", name = e.name);
        }
    }

    println!("total: {total}");
    Ok(())
}

/// Build the puzzle package in release mode and collect its binaries.
fn build() -> Result<Vec<Executable>> {
    let mut cmd = Command::new("cargo");
    cmd.stdout(Stdio::piped());
    cmd.args(["build", "--release", "-p", PACKAGE]);
    cmd.args(["--message-format", "json"]);

    let mut child = cmd.spawn()?;
    let output = child.stdout.take().context("missing stdout")?;

    let mut executables = Vec::new();

    for value in serde_json::Deserializer::from_reader(output).into_iter() {
        let value: serde_json::Value = value?;

        if value.get("reason").and_then(|d| d.as_str()) != Some("compiler-artifact") {
            continue;
        }

        let artifact = Artifact::deserialize(value.into_deserializer())?;

        if artifact.target.kind != ["bin"] {
            continue;
        }

        let path = artifact.executable.context("missing executable")?;

        executables.push(Executable {
            name: artifact.target.name,
            path,
        });
    }

    let status = child.wait()?;

    if !status.success() {
        bail!("building `{PACKAGE}` failed: {status}");
    }

    executables.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(executables)
}

/// Extract the `data` field of an output line.
fn data<T>(value: serde_json::Value) -> Result<T>
where
    T: DeserializeOwned,
{
    #[derive(Deserialize)]
    struct Data<T> {
        data: T,
    }

    Ok(Data::<T>::deserialize(value.into_deserializer())?.data)
}

#[derive(Deserialize)]
struct Message {
    kind: String,
    output: String,
}
