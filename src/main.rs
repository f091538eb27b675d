use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use kori::transpiler::js::squish;

const OUTPUT_EXTENSION: &str = "js";

struct Options {
    input_path: PathBuf,
    output_path: PathBuf,
    to_stdout: bool,
    pretty: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let program = std::env::args().next().unwrap_or_else(|| "kori".to_string());
    let Some(options) = parse_args(std::env::args().skip(1), &program)? else {
        return Ok(());
    };

    if !options.to_stdout {
        println!("Input path: {}", options.input_path.display());
        println!("Output path: {}", options.output_path.display());
    }

    let source = fs::read_to_string(&options.input_path)
        .with_context(|| format!("Reading {}", options.input_path.display()))?;
    let output = kori::compile(source.trim())?;
    let output = if options.pretty {
        output
    } else {
        squish(&output)
    };

    if options.to_stdout {
        println!("{output}");
        return Ok(());
    }

    fs::write(&options.output_path, output)
        .with_context(|| format!("Writing {}", options.output_path.display()))?;
    Ok(())
}

/// `None` means usage was printed and there is nothing to compile.
fn parse_args(args: impl Iterator<Item = String>, program: &str) -> Result<Option<Options>> {
    let mut args = args;
    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut to_stdout = false;
    let mut pretty = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("Missing output path after {arg}"))?;
                output_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                print!("{}", usage(program));
                return Ok(None);
            }
            "--stdout" => to_stdout = true,
            "--pretty" => pretty = true,
            _ => {
                if input_path.is_some() {
                    bail!("Only one input file is supported");
                }
                input_path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(input_path) = input_path else {
        bail!("Missing input path\n{}", usage(program));
    };
    let output_path = output_path.unwrap_or_else(|| default_output_path(&input_path));

    Ok(Some(Options {
        input_path,
        output_path,
        to_stdout,
        pretty,
    }))
}

fn default_output_path(input_path: &Path) -> PathBuf {
    input_path.with_extension(OUTPUT_EXTENSION)
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [options] <input>\n\
         Options:\n    \
         -o <output>     Provide output path\n    \
         --stdout        Print the generated JavaScript instead of writing it\n    \
         --pretty        Keep one function per line instead of squishing whitespace\n    \
         -h              Show this help message\n"
    )
}
