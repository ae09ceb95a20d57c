//! sql-dump-cleaner - Strip environment-specific noise from SQL dumps
//!
//! This library turns a `pg_dump`-style SQL file into a form that applies
//! cleanly to another environment. It is a single textual pass over lines;
//! no SQL is parsed.
//!
//! # Rules
//!
//! Each line goes through these rules in order:
//!
//! - **Comments and blanks**: lines that are empty or start with `--` are dropped
//! - **Ignore patterns**: lines containing `OWNER TO`, `ACL`, `GRANT ALL`,
//!   `REVOKE ALL`, session settings or `\restrict` are dropped
//! - **Inline comments**: anything from the first `--` onward is cut
//! - **Trailing whitespace**: removed from every kept line
//!
//! Kept lines are joined with `\n` in input order, with no trailing newline.
//!
//! # Examples
//!
//! Clean a file with the built-in patterns:
//!
//! ```no_run
//! sql_dump_cleaner::clean("schema.sql", "schema_cleaned.sql").unwrap();
//! ```
//!
//! Add project-specific patterns and checksum the result:
//!
//! ```no_run
//! use sql_dump_cleaner::{clean_with, DigestAlgorithm, IgnorePatterns, LineFilter};
//!
//! let mut patterns = IgnorePatterns::default();
//! patterns.push("COMMENT ON EXTENSION");
//! let filter = LineFilter::new(patterns);
//! let report = clean_with("data.sql", "data_cleaned.sql", &filter, Some(DigestAlgorithm::Sha256)).unwrap();
//! println!("{} lines kept, sha256 {}", report.lines_kept, report.digest.unwrap());
//! ```
//!
//! In-memory:
//!
//! ```
//! use sql_dump_cleaner::LineFilter;
//!
//! let filter = LineFilter::default();
//! let cleaned = filter.clean_text("-- dump\nALTER TABLE t OWNER TO admin;\nINSERT INTO t VALUES (1); -- seed row\n");
//! assert_eq!(cleaned, "INSERT INTO t VALUES (1);");
//! ```

pub mod defaults;
pub mod digest;
pub mod error;
pub mod filter;
pub mod patterns;

pub use defaults::{clean_default_targets, cleaned_path_for, DEFAULT_TARGETS};
pub use digest::DigestAlgorithm;
pub use error::CleanError;
pub use filter::{
    clean, clean_sql, clean_with, split_lines, write_cleaned, CleanReport, DropReason, LineFilter,
    LineOutcome,
};
pub use patterns::{IgnorePatterns, DEFAULT_IGNORE_PATTERNS};
