use std::io;

/// Syntax errors raised by the `.ini` parser FSM.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum IniErrorKind {
    /// A key was encountered before any section header.
    #[error("no section for variable")]
    NoSectionForVariable,
    /// Invalid character at the start of the line -
    /// expected a section header, key, comment or whitespace.
    #[error("wrong syntax")]
    WrongSyntax,
    /// Invalid character in or after a section header,
    /// an unterminated or an empty section header.
    #[error("wrong section syntax")]
    WrongSectionSyntax,
    /// Invalid character in a key name or between the key name and the key-value separator.
    #[error("wrong variable syntax")]
    WrongVariableSyntax,
    /// Duplicate key in a section, not allowed by options.
    #[error("duplicate variable")]
    DuplicateVariable,
}

/// A fatal syntax error returned by the [`.ini parser`](struct.IniParser.html).
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
#[error("row {row}: {error}")]
pub struct IniError {
    /// Line in the source where the error occured (1-based).
    pub row: u32,
    /// Column in the source where the error occured (1-based).
    pub column: u32,
    /// Actual error.
    pub error: IniErrorKind,
}

/// An error returned by the [`.ini parser`](struct.IniParser.html)
/// and by the [`.ini file`](struct.IniFile.html) accessors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The `.ini` source could not be opened or read, or is not valid UTF-8.
    #[error("failed to read the config: {0}")]
    Io(#[from] io::Error),
    /// The `.ini` source is malformed.
    #[error("syntax error: {0}")]
    Syntax(#[from] IniError),
    /// Requested section is not defined in the config.
    #[error("section \"{0}\" is not found")]
    SectionNotFound(String),
    /// Requested key is not defined in an existing section.
    /// Contains all keys which do exist in the section.
    #[error("variable \"{key}\" is not found in section \"{section}\"; maybe you meant:{}", format_suggestions(.suggestions))]
    KeyNotFound {
        section: String,
        key: String,
        suggestions: Vec<String>,
    },
    /// The value is not a valid textual representation of the requested type.
    #[error("cannot convert \"{value}\" to {target}: {reason}")]
    Conversion {
        value: String,
        target: &'static str,
        reason: String,
    },
    /// A dotted `"section.key"` path is missing the separator or one of its halves.
    #[error("invalid config path \"{0}\" - expected \"section.key\"")]
    InvalidPath(String),
}

fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .fold(String::new(), |acc, key| acc + "\n" + key)
}
