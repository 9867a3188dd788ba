use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Target};
use log::{LevelFilter, info, warn};

use course_indexer::course::types::EntryOrder;
use course_indexer::{CourseScanner, IndexWriter, IndexerConfig, Preset};

/// Exit code for `--strict` runs whose scan was cut short
const EXIT_PARTIAL: u8 = 2;

#[derive(Parser)]
#[command(name = "course-indexer", version, about = "Build a JSON index of course folders")]
struct Cli {
    /// Directory whose immediate subfolders are scanned
    #[arg(default_value = ".")]
    root: PathBuf,
    
    /// Built-in behaviour preset
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    
    /// TOML, YAML or JSON file overriding preset values
    #[arg(long)]
    config: Option<PathBuf>,
    
    /// Index file, relative to ROOT unless absolute
    #[arg(short, long)]
    output: Option<PathBuf>,
    
    /// Visit folders in name order instead of filesystem order
    #[arg(long)]
    sort: bool,
    
    /// Scan and print, but do not write the index file
    #[arg(long)]
    dry_run: bool,
    
    /// Do not echo the index to stdout
    #[arg(long)]
    no_echo: bool,
    
    /// Exit with code 2 if the root could not be listed or the scan was aborted
    #[arg(long)]
    strict: bool,
    
    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    
    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stderr)
        .format_timestamp(None)
        .init();
}

/// Scan, write and echo the index; returns the process exit code
fn run(cli: &Cli, out: &mut impl Write) -> Result<u8> {
    let config = match &cli.config {
        Some(path) => IndexerConfig::load(path)?,
        None => IndexerConfig::default(),
    };
    let mut options = config.into_options(cli.preset);
    if let Some(output) = &cli.output {
        options.output_file = output.clone();
    }
    if cli.sort {
        options.order = EntryOrder::Name;
    }
    
    let output_file = options.output_file.clone();
    let result = CourseScanner::new(options).scan_directory(&cli.root);
    let writer = IndexWriter::for_scan(&cli.root, &output_file, &result.stats);
    
    let rendered = if cli.dry_run {
        info!("Dry run, not writing {}", writer.path().display());
        IndexWriter::render(&result.courses)?
    } else {
        writer.save(&result.courses)?
    };
    
    if !cli.no_echo {
        writeln!(out, "{}", rendered).context("Failed to write index to stdout")?;
    }
    
    if result.stats.is_partial() {
        warn!("Scan of {} was incomplete", cli.root.display());
        if cli.strict {
            return Ok(EXIT_PARTIAL);
        }
    }
    Ok(0)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);
    
    let code = run(&cli, &mut io::stdout().lock())?;
    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("course-indexer").chain(args.iter().copied()))
    }

    fn create_course(root: &std::path::Path, folder: &str) -> Result<()> {
        let dir = root.join(folder);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("data.json"), r#"{"title": "Intro"}"#)?;
        fs::write(dir.join("cover.png"), "")?;
        Ok(())
    }

    #[test]
    fn writes_index_into_root_and_echoes_it() -> Result<()> {
        let root = tempdir()?;
        create_course(root.path(), "intro")?;
        let mut out: Vec<u8> = Vec::new();

        let code = run(&cli(&[root.path().to_str().unwrap()]), &mut out)?;

        assert_eq!(code, 0);
        let written = fs::read_to_string(root.path().join("index.json"))?;
        assert!(written.contains("\"file\": \"intro/data.json\""));
        assert_eq!(String::from_utf8(out)?, format!("{}\n", written));
        Ok(())
    }

    #[test]
    fn output_override_and_no_echo() -> Result<()> {
        let root = tempdir()?;
        create_course(root.path(), "intro")?;
        let mut out: Vec<u8> = Vec::new();

        let args = cli(&[root.path().to_str().unwrap(), "-o", "catalog.json", "--no-echo", "--preset", "legacy"]);
        let code = run(&args, &mut out)?;

        assert_eq!(code, 0);
        assert!(out.is_empty());
        assert!(root.path().join("catalog.json").exists());
        assert!(!root.path().join("courses.json").exists());
        Ok(())
    }

    #[test]
    fn dry_run_does_not_write() -> Result<()> {
        let root = tempdir()?;
        create_course(root.path(), "intro")?;
        let mut out: Vec<u8> = Vec::new();

        let code = run(&cli(&[root.path().to_str().unwrap(), "--dry-run"]), &mut out)?;

        assert_eq!(code, 0);
        assert!(!root.path().join("index.json").exists());
        assert!(String::from_utf8(out)?.contains("\"name\": \"Intro\""));
        Ok(())
    }

    #[test]
    fn missing_root_still_succeeds_without_creating_it() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("typo").join("root");
        let output = dir.path().join("index.json");
        let mut out: Vec<u8> = Vec::new();

        let args = cli(&[missing.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        let code = run(&args, &mut out)?;

        assert_eq!(code, 0);
        assert!(!dir.path().join("typo").exists());
        assert_eq!(fs::read_to_string(&output)?, "[]");
        assert_eq!(String::from_utf8(out)?, "[]\n");
        Ok(())
    }

    #[test]
    fn file_root_still_writes_empty_index() -> Result<()> {
        let dir = tempdir()?;
        let file_root = dir.path().join("not-a-dir");
        fs::write(&file_root, "")?;
        let output = dir.path().join("courses.json");

        let args = cli(&[file_root.to_str().unwrap(), "-o", output.to_str().unwrap(), "--no-echo"]);
        let code = run(&args, &mut Vec::<u8>::new())?;

        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&output)?, "[]");
        Ok(())
    }

    #[test]
    fn strict_reports_incomplete_scan() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing");
        let output = dir.path().join("index.json");

        let args = cli(&[missing.to_str().unwrap(), "-o", output.to_str().unwrap(), "--strict", "--no-echo"]);
        assert_eq!(run(&args, &mut Vec::<u8>::new())?, EXIT_PARTIAL);

        create_course(dir.path(), "intro")?;
        let args = cli(&[dir.path().to_str().unwrap(), "-o", output.to_str().unwrap(), "--strict", "--no-echo"]);
        assert_eq!(run(&args, &mut Vec::<u8>::new())?, 0);
        Ok(())
    }
}
