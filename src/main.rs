use anyhow::Context;
use clap::Parser;
use sql_dump_cleaner::{
    clean_default_targets, clean_with, cleaned_path_for, write_cleaned, CleanReport,
    DigestAlgorithm, IgnorePatterns, LineFilter,
};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Path that stands for stdin (as input) or stdout (as output)
const STDIO: &str = "-";

/// Strip ownership, ACL, session settings and comments from SQL dumps
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dump to clean (or - for stdin). Without it, the default dumps in --dir are cleaned
    input: Option<PathBuf>,

    /// Output file (defaults to <input>_cleaned.<ext>, or stdout for stdin; - for stdout)
    output: Option<PathBuf>,

    /// Extra ignore patterns, one per line (supports comments with #)
    #[arg(long, value_name = "FILE", env = "SQL_DUMP_CLEANER_IGNORE_FILE")]
    ignore_file: Option<PathBuf>,

    /// Extra ignore pattern (repeatable)
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Start from an empty pattern set instead of the built-in one
    #[arg(long)]
    no_default_patterns: bool,

    /// Compute checksum of cleaned output (sha256, sha512)
    #[arg(long, value_name = "ALGORITHM")]
    digest: Option<DigestAlgorithm>,

    /// Directory searched for the default dumps when no input is given
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,
}

impl Cli {
    fn output_path(&self, input: &Path) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None if input == Path::new(STDIO) => PathBuf::from(STDIO),
            None => cleaned_path_for(input),
        }
    }

    /// True when cleaned SQL goes to stdout, so status lines must not
    fn writes_stdout(&self) -> bool {
        self.input
            .as_deref()
            .is_some_and(|input| self.output_path(input) == Path::new(STDIO))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.writes_stdout());

    let filter = build_filter(&cli)?;

    match cli.input.as_deref() {
        None => {
            let cleaned = clean_default_targets(&cli.dir, &filter, cli.digest)
                .with_context(|| format!("cleaning default dumps in {}", cli.dir.display()))?;
            for (output, report) in &cleaned {
                report_digest(output, report, cli.digest);
            }
        }
        Some(input) => {
            let output = cli.output_path(input);
            let report = if input != Path::new(STDIO) && output != Path::new(STDIO) {
                clean_with(input, &output, &filter, cli.digest)
                    .with_context(|| format!("cleaning {}", input.display()))?
            } else {
                clean_stream(input, &output, &filter, cli.digest)?
            };
            report_digest(&output, &report, cli.digest);
        }
    }

    Ok(())
}

fn init_logging(stdout_is_data: bool) {
    let target = if stdout_is_data {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(target)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn build_filter(cli: &Cli) -> anyhow::Result<LineFilter> {
    let mut patterns = if cli.no_default_patterns {
        IgnorePatterns::empty()
    } else {
        IgnorePatterns::default()
    };

    if let Some(path) = &cli.ignore_file {
        let extra = IgnorePatterns::load(path)
            .with_context(|| format!("loading ignore patterns from {}", path.display()))?;
        log::debug!("Loaded {} patterns from {}", extra.len(), path.display());
        patterns.extend(extra.iter());
    }
    patterns.extend(cli.patterns.iter().map(String::as_str));

    let filter = LineFilter::new(patterns);
    log::debug!("{} ignore patterns active", filter.patterns().len());
    Ok(filter)
}

/// Clean when either end is stdin/stdout
fn clean_stream(
    input: &Path,
    output: &Path,
    filter: &LineFilter,
    digest: Option<DigestAlgorithm>,
) -> anyhow::Result<CleanReport> {
    if input == Path::new(STDIO) {
        clean_source(io::stdin().lock(), "stdin", output, filter, digest)
    } else {
        let label = input.display().to_string();
        let file = File::open(input).with_context(|| format!("opening {}", label))?;
        clean_source(file, &label, output, filter, digest)
    }
}

/// Read all of `source` first, then create and fill `output`
fn clean_source<R: Read>(
    mut source: R,
    input_label: &str,
    output: &Path,
    filter: &LineFilter,
    digest: Option<DigestAlgorithm>,
) -> anyhow::Result<CleanReport> {
    let output_label = stdio_label(output, "stdout");
    log::info!("Cleaning {} -> {}...", input_label, output_label);

    let mut content = String::new();
    source
        .read_to_string(&mut content)
        .with_context(|| format!("reading {}", input_label))?;

    let report = if output == Path::new(STDIO) {
        let mut stdout = io::stdout().lock();
        write_cleaned(&content, &mut stdout, filter, digest).context("writing stdout")?
    } else {
        let mut file =
            File::create(output).with_context(|| format!("creating {}", output_label))?;
        write_cleaned(&content, &mut file, filter, digest)
            .with_context(|| format!("writing {}", output_label))?
    };

    log::info!("Cleaned SQL saved to {}", output_label);
    Ok(report)
}

fn stdio_label(path: &Path, stdio_name: &str) -> String {
    if path == Path::new(STDIO) {
        stdio_name.to_string()
    } else {
        path.display().to_string()
    }
}

fn report_digest(output: &Path, report: &CleanReport, digest: Option<DigestAlgorithm>) {
    if let (Some(algorithm), Some(checksum)) = (digest, &report.digest) {
        log::info!("{} {}: {}", output.display(), algorithm.name(), checksum);
    }
}
