#![allow(non_snake_case)]
#![allow(clippy::approx_constant)]

use {
    crate::*,
    pretty_assertions::assert_eq,
    std::{fs, io, path::PathBuf},
    tempfile::TempDir,
};

fn cmp_f64(l: f64, r: f64) -> bool {
    (l - r).abs() < 0.000_001
}

fn parse(src: &str) -> Result<IniTable, ConfigError> {
    src.parse()
}

fn syntax_error(src: &str) -> IniError {
    match parse(src) {
        Err(ConfigError::Syntax(error)) => error,
        other => panic!("Expected a syntax error, got {:?}.", other),
    }
}

/// Writes `contents` to `config.ini` in a new temp directory.
/// The directory is removed when the returned `TempDir` is dropped.
fn temp_ini(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn NoSectionForVariable() {
    assert_eq!(
        syntax_error("; comment\n\nkey = 1\n[Section]\n"),
        IniError {
            row: 3,
            column: 1,
            error: IniErrorKind::NoSectionForVariable
        }
    );
    // Leading whitespace.
    assert_eq!(
        syntax_error("  key"),
        IniError {
            row: 1,
            column: 3,
            error: IniErrorKind::NoSectionForVariable
        }
    );

    // But this succeeds.

    let ini = parse("[Section]\nkey = 1\n").unwrap();
    assert_eq!(ini.get("Section", "key").unwrap(), "1");
}

#[test]
fn WrongSyntax() {
    // Key-value separator at line start.
    assert_eq!(
        syntax_error("[Section]\n= 1\n"),
        IniError {
            row: 2,
            column: 1,
            error: IniErrorKind::WrongSyntax
        }
    );
    // Keys must start with a letter.
    assert_eq!(
        syntax_error("[Section]\n_key = 1\n"),
        IniError {
            row: 2,
            column: 1,
            error: IniErrorKind::WrongSyntax
        }
    );
    assert_eq!(
        syntax_error("[Section]\n 1key = 1\n"),
        IniError {
            row: 2,
            column: 2,
            error: IniErrorKind::WrongSyntax
        }
    );
    // Not a comment delimiter by default.
    assert_eq!(
        syntax_error("# comment\n"),
        IniError {
            row: 1,
            column: 1,
            error: IniErrorKind::WrongSyntax
        }
    );
}

#[test]
fn WrongSectionSyntax() {
    // Unterminated section header.
    assert_eq!(
        syntax_error("[Sec\nkey = 1\n"),
        IniError {
            row: 1,
            column: 5,
            error: IniErrorKind::WrongSectionSyntax
        }
    );
    // Invalid character in the section name.
    assert_eq!(
        syntax_error("[Section 1]\n"),
        IniError {
            row: 1,
            column: 9,
            error: IniErrorKind::WrongSectionSyntax
        }
    );
    // Empty section name.
    assert_eq!(
        syntax_error("[]\n"),
        IniError {
            row: 1,
            column: 2,
            error: IniErrorKind::WrongSectionSyntax
        }
    );
    // Garbage after the section header.
    assert_eq!(
        syntax_error("[Section1]\n[Section2] key = 1\n"),
        IniError {
            row: 2,
            column: 12,
            error: IniErrorKind::WrongSectionSyntax
        }
    );

    // But this succeeds.

    let ini = parse("[Section_2] \t; comment\nkey = 1\n").unwrap();
    assert_eq!(ini.get("Section_2", "key").unwrap(), "1");
}

#[test]
fn WrongVariableSyntax() {
    // Invalid character in the key.
    assert_eq!(
        syntax_error("[Section]\nkey-1 = 1\n"),
        IniError {
            row: 2,
            column: 4,
            error: IniErrorKind::WrongVariableSyntax
        }
    );
    // Garbage between the key and the separator.
    assert_eq!(
        syntax_error("[Section]\nkey 1 = 1\n"),
        IniError {
            row: 2,
            column: 5,
            error: IniErrorKind::WrongVariableSyntax
        }
    );
    // Only spaces may separate the key and the separator.
    assert_eq!(
        syntax_error("[Section]\nkey\t= 1\n"),
        IniError {
            row: 2,
            column: 4,
            error: IniErrorKind::WrongVariableSyntax
        }
    );
}

#[test]
fn DuplicateVariable() {
    let src = "[Section]\nkey = 1\nkey = 2\n";

    assert_eq!(
        IniParser::new(src.as_bytes())
            .duplicate_keys(IniDuplicateKeys::Forbid)
            .parse()
            .err()
            .map(|err| err.to_string())
            .unwrap(),
        "syntax error: row 3: duplicate variable"
    );

    let ini = IniParser::new(src.as_bytes())
        .duplicate_keys(IniDuplicateKeys::First)
        .parse()
        .unwrap();
    assert_eq!(ini.get("Section", "key").unwrap(), "1");

    // Same key in different sections is not a duplicate.
    let ini = IniParser::new("[A]\nkey = 1\n[B]\nkey = 2\n".as_bytes())
        .duplicate_keys(IniDuplicateKeys::Forbid)
        .parse()
        .unwrap();
    assert_eq!(ini.get("A", "key").unwrap(), "1");
    assert_eq!(ini.get("B", "key").unwrap(), "2");
}

#[test]
fn last_value_wins() {
    let ini = parse("[S]\nk = 1\nk = 2\n").unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "2");

    // A later bare key resets the value.
    let ini = parse("[S]\nk = 1\nk\n").unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "");
}

#[test]
fn empty_values() {
    let ini = parse("[S]\nexplicit = \nbare\nspaced =    ; comment\ncommented ; comment\n").unwrap();

    assert_eq!(ini.lookup("S", "explicit").unwrap(), "");
    assert_eq!(ini.lookup("S", "bare").unwrap(), "");
    assert_eq!(ini.lookup("S", "spaced").unwrap(), "");
    assert_eq!(ini.lookup("S", "commented").unwrap(), "");

    // Empty value is not the same as a missing key.
    match ini.lookup("S", "missing") {
        Err(ConfigError::KeyNotFound { .. }) => {}
        _ => panic!("Expected an error."),
    }
}

#[test]
fn values() {
    let ini = parse(
        "[S]\n\
         trailing = value ; trailing comment\n\
         inner = hello   world\n\
         special = a=b [c] #d\n\
         unicode = héllo\n",
    )
    .unwrap();

    assert_eq!(ini.get("S", "trailing").unwrap(), "value ");
    assert_eq!(ini.get("S", "inner").unwrap(), "hello   world");
    assert_eq!(ini.get("S", "special").unwrap(), "a=b [c] #d");
    assert_eq!(ini.get("S", "unicode").unwrap(), "héllo");

    let ini = IniParser::new("[S]\nkey = a # b\n".as_bytes())
        .comments(IniCommentDelimiter::Semicolon | IniCommentDelimiter::NumberSign)
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "key").unwrap(), "a ");

    // Comments disabled.
    let ini = IniParser::new("[S]\nkey = a ; b\n".as_bytes())
        .comments(IniCommentDelimiter::None)
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "key").unwrap(), "a ; b");
}

#[test]
fn sections() {
    let ini = parse("[A]\nx = 1\n[Empty]\n[B]\ny = 2\n[A]\nz = 3\n").unwrap();

    assert_eq!(ini.len(), 3);
    assert!(ini.contains_section("Empty"));
    assert!(ini.section("Empty").unwrap().is_empty());

    // Duplicate sections are merged.
    let a = ini.section("A").unwrap();
    assert_eq!(a.iter().collect::<Vec<_>>(), vec![("x", "1"), ("z", "3")]);

    assert_eq!(
        ini.sections().map(|(name, _)| name).collect::<Vec<_>>(),
        vec!["A", "B", "Empty"]
    );

    match ini.lookup("Missing", "x") {
        Err(ConfigError::SectionNotFound(section)) => assert_eq!(section, "Missing"),
        _ => panic!("Expected an error."),
    }

    match ini.lookup("Empty", "x") {
        Err(ConfigError::KeyNotFound { suggestions, .. }) => assert!(suggestions.is_empty()),
        _ => panic!("Expected an error."),
    }
}

#[test]
fn key_not_found_suggestions() {
    let ini = parse("[S]\nzeta = 1\nalpha = 2\nmid\n[T]\nother = 3\n").unwrap();

    match ini.lookup("S", "beta") {
        Err(ConfigError::KeyNotFound {
            section,
            key,
            suggestions,
        }) => {
            assert_eq!(section, "S");
            assert_eq!(key, "beta");
            assert_eq!(suggestions, vec!["alpha", "mid", "zeta"]);
        }
        _ => panic!("Expected an error."),
    }
}

#[test]
fn new_lines() {
    let ini = parse("[S]\r\nk1 = v1\r\nk2 = v2\rk3 = v3\n").unwrap();

    assert_eq!(ini.get("S", "k1").unwrap(), "v1");
    assert_eq!(ini.get("S", "k2").unwrap(), "v2");
    assert_eq!(ini.get("S", "k3").unwrap(), "v3");

    // `\r\n` is counted as a single line.
    assert_eq!(
        syntax_error("[S]\r\nk = 1\r\n= 2\r\n"),
        IniError {
            row: 3,
            column: 1,
            error: IniErrorKind::WrongSyntax
        }
    );
}

#[test]
fn whitespace() {
    // Any whitespace, including vertical tabs and form feeds, is skipped at the start of the line.
    let ini = parse("[S]\n\x0bk = 1\n\x0c\tl = 2\n").unwrap();

    assert_eq!(ini.get("S", "k").unwrap(), "1");
    assert_eq!(ini.get("S", "l").unwrap(), "2");
}

#[test]
fn unterminated_last_line_is_dropped() {
    // The value being parsed at EOF is dropped, but the key was already added when the separator was parsed.
    let ini = parse("[S]\nk = v").unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "");

    // A bare key being parsed at EOF is dropped.
    let ini = parse("[S]\nk").unwrap();
    assert_eq!(ini.get("S", "k"), None);

    // Unless we flush it.
    let ini = IniParser::new("[S]\nk = v".as_bytes())
        .flush_at_eof(true)
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "v");

    let ini = IniParser::new("[S]\nk".as_bytes())
        .flush_at_eof(true)
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "");

    // Unterminated section headers are not added.
    let ini = parse("[S]\nk = v\n[T").unwrap();
    assert!(!ini.contains_section("T"));
}

#[test]
fn deterministic() {
    let src = "; header\n[Section1]\nvar1 = hello\nvar2 = 42\n\n[Section2]\nflag\nvar1 = x ; y\n";

    assert_eq!(parse(src).unwrap(), parse(src).unwrap());
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n ; only comments\n").unwrap().is_empty());
}

#[test]
fn invalid_utf8() {
    // Latin-1 comments are skipped like any other comment.
    let ini = IniParser::new(&b"[S]\n; caf\xe9\nk = 1\n"[..])
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "1");

    // Latin-1 values are read one char per byte.
    let ini = IniParser::new(&b"[S]\nk = caf\xe9 \xff\n"[..])
        .parse()
        .unwrap();
    assert_eq!(ini.get("S", "k").unwrap(), "café ÿ");

    // Only ASCII chars are valid in keys.
    assert_eq!(
        IniParser::new(&b"[S]\nk\xe9 = 1\n"[..])
            .parse()
            .err()
            .map(|err| err.to_string())
            .unwrap(),
        "syntax error: row 2: wrong variable syntax"
    );
}

#[test]
fn ini_file() {
    let (_dir, path) = temp_ini(
        "[Section1]\nvar1 = hello\nvar2 = 42\nvar3 = 3.14\n",
    );

    let ini = IniFile::new(&path);

    assert_eq!(ini.get("Section1", "var1").unwrap(), "hello");
    assert_eq!(ini.get_string("Section1", "var1").unwrap(), "hello");
    assert_eq!(ini.get_i64("Section1", "var2").unwrap(), 42);
    assert!(cmp_f64(ini.get_f64("Section1", "var3").unwrap(), 3.14));
    assert!(cmp_f64(ini.get_f64("Section1", "var2").unwrap(), 42.0));
    assert_eq!(ini.get_as::<u8>("Section1", "var2").unwrap(), 42);

    // Dotted paths.
    assert_eq!(ini.get_path("Section1.var1").unwrap(), "hello");
    assert_eq!(ini.get_path_as::<i64>("Section1.var2").unwrap(), 42);
    match ini.get_path("Section1") {
        Err(ConfigError::InvalidPath(path)) => assert_eq!(path, "Section1"),
        _ => panic!("Expected an error."),
    }

    // Conversion errors.
    match ini.get_i64("Section1", "var1") {
        Err(ConfigError::Conversion { value, target, .. }) => {
            assert_eq!(value, "hello");
            assert_eq!(target, "i64");
        }
        _ => panic!("Expected an error."),
    }
    match ini.get_i64("Section1", "var3") {
        Err(ConfigError::Conversion { value, .. }) => assert_eq!(value, "3.14"),
        _ => panic!("Expected an error."),
    }

    // Missing keys / sections.
    match ini.get("Section1", "var4") {
        Err(ConfigError::KeyNotFound { suggestions, .. }) => {
            assert_eq!(suggestions, vec!["var1", "var2", "var3"])
        }
        _ => panic!("Expected an error."),
    }
    match ini.get_f64("Section2", "var1") {
        Err(ConfigError::SectionNotFound(section)) => assert_eq!(section, "Section2"),
        _ => panic!("Expected an error."),
    }
}

#[test]
fn ini_file_is_cached_until_reloaded() {
    let (_dir, path) = temp_ini("[S]\nk = 1\n");

    let mut ini = IniFile::new(&path);
    assert_eq!(ini.get("S", "k").unwrap(), "1");

    fs::write(&path, "[S]\nk = 2\n").unwrap();

    // Still cached.
    assert_eq!(ini.get("S", "k").unwrap(), "1");

    let table = ini.reload().unwrap();
    assert_eq!(table.get("S", "k").unwrap(), "2");
    assert_eq!(ini.get("S", "k").unwrap(), "2");
}

#[test]
fn ini_file_errors() {
    // Missing file.
    let dir = tempfile::tempdir().unwrap();
    let ini = IniFile::new(dir.path().join("missing.ini"));
    match ini.get("S", "k") {
        Err(ConfigError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
        _ => panic!("Expected an error."),
    }

    // Syntax errors are reported on every lookup - nothing is cached.
    let (_dir, path) = temp_ini("[S]\nk = 1\n[T\n");
    let ini = IniFile::new(&path);

    for _ in 0..2 {
        match ini.get("S", "k") {
            Err(ConfigError::Syntax(error)) => assert_eq!(
                error,
                IniError {
                    row: 3,
                    column: 3,
                    error: IniErrorKind::WrongSectionSyntax
                }
            ),
            _ => panic!("Expected an error."),
        }
    }
}

#[test]
fn ini_file_options() {
    let (_dir, path) = temp_ini(
        "# comment\n[S]\nk = 1 # one\nk = 2\nlast = v",
    );

    let ini = IniFile::with_options(
        &path,
        IniOptions {
            comments: IniCommentDelimiter::Semicolon | IniCommentDelimiter::NumberSign,
            duplicate_keys: IniDuplicateKeys::First,
            flush_at_eof: true,
        },
    );

    assert_eq!(ini.path(), path.as_path());
    assert_eq!(ini.get("S", "k").unwrap(), "1 ");
    assert_eq!(ini.get("S", "last").unwrap(), "v");
}
