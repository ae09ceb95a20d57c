use proptest::prelude::*;
use sql_dump_cleaner::{LineFilter, DEFAULT_IGNORE_PATTERNS};

/// Lines that look like dump content: SQL fragments, comments, blanks and
/// the environment-specific statements the filter targets.
fn dump_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[ \t]{0,4}[A-Za-z0-9_(),;'=.]{1,20}( [A-Za-z0-9_(),;'=.]{1,10}){0,3}[ \t]{0,3}",
        2 => "[ \t]{0,4}[A-Za-z0-9_();' ]{1,20}--[A-Za-z0-9 -]{0,12}",
        1 => "[ \t]{0,4}--[A-Za-z0-9 :;-]{0,20}",
        1 => "[ \t]{0,6}",
        1 => prop::sample::select(vec![
            "ALTER TABLE public.t OWNER TO viora;",
            "GRANT ALL ON SCHEMA public TO app;",
            "REVOKE ALL ON SCHEMA public FROM PUBLIC;",
            "SET default_table_access_method = heap;",
            "SELECT pg_catalog.set_config('search_path', '', false);",
            "\\restrict abc",
            "INSERT INTO acl_notes VALUES ('ACL');",
        ])
        .prop_map(String::from),
    ]
}

fn dump() -> impl Strategy<Value = String> {
    prop::collection::vec(dump_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn no_blank_or_comment_lines_survive(input in dump()) {
        let output = LineFilter::default().clean_text(&input);
        for line in output.lines() {
            prop_assert!(!line.trim().is_empty());
            prop_assert!(!line.trim().starts_with("--"));
        }
    }

    #[test]
    fn no_ignore_pattern_survives(input in dump()) {
        let output = LineFilter::default().clean_text(&input);
        for pattern in DEFAULT_IGNORE_PATTERNS {
            prop_assert!(!output.contains(*pattern), "{:?} survived in {:?}", pattern, output);
        }
    }

    #[test]
    fn kept_lines_are_prefixes_in_input_order(input in dump()) {
        let filter = LineFilter::default();
        let (kept, _) = filter.clean_lines(&input);

        // Every kept line is a prefix of some input line, and they appear in order
        let mut remaining = input.lines();
        for line in kept {
            prop_assert!(!line.contains("--"));
            prop_assert_eq!(line, line.trim_end());
            prop_assert!(remaining.any(|original| original.starts_with(line)));
        }
    }

    #[test]
    fn no_trailing_newline(input in dump()) {
        let output = LineFilter::default().clean_text(&input);
        prop_assert!(!output.ends_with('\n'));
        prop_assert!(!output.contains("\n\n"));
    }

    #[test]
    fn cleaning_is_idempotent(input in dump()) {
        let filter = LineFilter::default();
        let once = filter.clean_text(&input);
        let twice = filter.clean_text(&once);
        prop_assert_eq!(once, twice);
    }
}
