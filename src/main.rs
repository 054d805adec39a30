use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Format {
    Pdf,
    Docx,
    Both,
}

/// Export an ABNT block document (JSON) to PDF and/or DOCX.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input document: a JSON array of blocks
    input: PathBuf,

    /// Output path. Defaults to the input name with the target extension;
    /// with --format both this is used as a stem.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "pdf")]
    format: Format,
}

fn output_path(args: &Args, extension: &str) -> PathBuf {
    match &args.output {
        Some(path) if args.format != Format::Both => path.clone(),
        Some(path) => path.with_extension(extension),
        None => args.input.with_extension(extension),
    }
}

fn run(args: &Args) -> Result<(), abntdoc::Error> {
    let blocks = abntdoc::load_blocks(&args.input)?;

    if matches!(args.format, Format::Pdf | Format::Both) {
        let out = output_path(args, "pdf");
        abntdoc::export_pdf(&blocks, &out)?;
        println!("{}", out.display());
    }
    if matches!(args.format, Format::Docx | Format::Both) {
        let out = output_path(args, "docx");
        abntdoc::export_docx(&blocks, &out)?;
        println!("{}", out.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
