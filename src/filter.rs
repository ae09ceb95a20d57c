use crate::digest::{DigestAlgorithm, DigestWriter};
use crate::error::CleanError;
use crate::patterns::IgnorePatterns;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// SQL line comment marker
pub const COMMENT_MARKER: &str = "--";

/// Why a line was left out of the cleaned output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Empty or whitespace only
    Blank,
    /// Starts with `--` once trimmed
    Comment,
    /// Contains the ignore pattern at this index of the pattern set
    Ignored { pattern: usize },
}

/// Result of running the filter rules over a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Line survives as `text`; `comment_stripped` is set if an inline comment was cut
    Keep {
        text: &'a str,
        comment_stripped: bool,
    },
    Drop(DropReason),
}

/// Counters for one clean pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub lines_read: usize,
    pub lines_kept: usize,
    pub blank: usize,
    pub comments: usize,
    pub ignored: usize,
    /// Hits per ignore pattern, indexed like the pattern set
    pub ignored_by_pattern: Vec<usize>,
    pub inline_comments_stripped: usize,
    /// Hex checksum of the written output, when one was requested
    pub digest: Option<String>,
}

impl CleanReport {
    fn new(pattern_count: usize) -> Self {
        CleanReport {
            ignored_by_pattern: vec![0; pattern_count],
            ..CleanReport::default()
        }
    }

    pub fn lines_dropped(&self) -> usize {
        self.lines_read - self.lines_kept
    }

    fn record(&mut self, outcome: &LineOutcome<'_>) {
        self.lines_read += 1;
        match *outcome {
            LineOutcome::Keep {
                comment_stripped, ..
            } => {
                self.lines_kept += 1;
                if comment_stripped {
                    self.inline_comments_stripped += 1;
                }
            }
            LineOutcome::Drop(DropReason::Blank) => self.blank += 1,
            LineOutcome::Drop(DropReason::Comment) => self.comments += 1,
            LineOutcome::Drop(DropReason::Ignored { pattern }) => {
                self.ignored += 1;
                self.ignored_by_pattern[pattern] += 1;
            }
        }
    }
}

/// Line-oriented cleaner for SQL dumps
///
/// Matching is purely textual: a pattern or `--` inside a quoted string
/// literal triggers the same as anywhere else.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    patterns: IgnorePatterns,
}

impl LineFilter {
    pub fn new(patterns: IgnorePatterns) -> Self {
        LineFilter { patterns }
    }

    pub fn patterns(&self) -> &IgnorePatterns {
        &self.patterns
    }

    /// Apply the rules to one line (without its line terminator)
    ///
    /// Rules run in order; each later rule only sees lines that passed the
    /// earlier ones:
    /// 1. blank or `--`-prefixed lines are dropped
    /// 2. lines whose trimmed form contains an ignore pattern are dropped
    /// 3. the original line is cut at the first `--`
    /// 4. trailing whitespace is removed from what survives
    pub fn classify<'a>(&self, line: &'a str) -> LineOutcome<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineOutcome::Drop(DropReason::Blank);
        }
        if trimmed.starts_with(COMMENT_MARKER) {
            return LineOutcome::Drop(DropReason::Comment);
        }

        if let Some((pattern, _)) = self.patterns.find(trimmed) {
            return LineOutcome::Drop(DropReason::Ignored { pattern });
        }

        if let Some(pos) = line.find(COMMENT_MARKER) {
            // Rule 1 already dropped lines with only whitespace before the marker
            let head = line[..pos].trim_end();
            debug_assert!(!head.trim_start().is_empty());
            return LineOutcome::Keep {
                text: head,
                comment_stripped: true,
            };
        }

        LineOutcome::Keep {
            text: line.trim_end(),
            comment_stripped: false,
        }
    }

    /// Surviving lines of `input` in input order, plus the counters
    pub fn clean_lines<'a>(&self, input: &'a str) -> (Vec<&'a str>, CleanReport) {
        let mut report = CleanReport::new(self.patterns.len());
        let mut kept = Vec::new();

        for line in split_lines(input) {
            let outcome = self.classify(line);
            report.record(&outcome);
            if let LineOutcome::Keep { text, .. } = outcome {
                kept.push(text);
            }
        }

        (kept, report)
    }

    /// Cleaned form of `input`: surviving lines joined by `\n`, no trailing newline
    pub fn clean_text(&self, input: &str) -> String {
        self.clean_lines(input).0.join("\n")
    }
}

/// Split on `\n`, `\r\n` and lone `\r`, without a final empty line
pub fn split_lines(input: &str) -> SplitLines<'_> {
    SplitLines { rest: input }
}

/// Iterator returned by [`split_lines`]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(|c| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &self.rest[..pos];
                let terminator = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Clean a whole SQL dump from `input` into `output`
///
/// The input is read completely before anything is written. When
/// `digest_algorithm` is set, the checksum of exactly the bytes written is
/// returned in [`CleanReport::digest`].
pub fn clean_sql<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    filter: &LineFilter,
    digest_algorithm: Option<DigestAlgorithm>,
) -> Result<CleanReport, CleanError> {
    let mut content = String::new();
    input
        .read_to_string(&mut content)
        .map_err(|e| CleanError::input(None, e))?;

    write_cleaned(&content, output, filter, digest_algorithm)
}

/// Clean `input_path` into `output_path` with the built-in ignore patterns
pub fn clean(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<CleanReport, CleanError> {
    clean_with(input_path, output_path, &LineFilter::default(), None)
}

/// Clean `input_path` into `output_path`, creating or overwriting the output
pub fn clean_with(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    filter: &LineFilter,
    digest_algorithm: Option<DigestAlgorithm>,
) -> Result<CleanReport, CleanError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    log::info!(
        "Cleaning {} -> {}...",
        input_path.display(),
        output_path.display()
    );

    let content =
        fs::read_to_string(input_path).map_err(|e| CleanError::input(Some(input_path), e))?;
    let mut output =
        File::create(output_path).map_err(|e| CleanError::output(Some(output_path), e))?;

    let report = write_cleaned(&content, &mut output, filter, digest_algorithm)
        .map_err(|e| e.at(input_path, output_path))?;

    log::debug!(
        "{}: read={} kept={} blank={} comments={} ignored={} inline_stripped={}",
        input_path.display(),
        report.lines_read,
        report.lines_kept,
        report.blank,
        report.comments,
        report.ignored,
        report.inline_comments_stripped
    );
    log::info!("Cleaned SQL saved to {}", output_path.display());

    Ok(report)
}

/// Clean already-read `content` into `output`
pub fn write_cleaned<W: Write>(
    content: &str,
    output: &mut W,
    filter: &LineFilter,
    digest_algorithm: Option<DigestAlgorithm>,
) -> Result<CleanReport, CleanError> {
    let (kept, mut report) = filter.clean_lines(content);
    let body = kept.join("\n");

    match digest_algorithm {
        Some(algorithm) => {
            let mut digest_writer = DigestWriter::new(output, algorithm);
            write_body(&mut digest_writer, &body)?;
            report.digest = Some(digest_writer.finalize());
        }
        None => write_body(output, &body)?,
    }

    Ok(report)
}

fn write_body<W: Write>(output: &mut W, body: &str) -> Result<(), CleanError> {
    output
        .write_all(body.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| CleanError::output(None, e))
}
