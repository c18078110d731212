#![allow(non_upper_case_globals)]

use bitflags::bitflags;

bitflags! {
    /// Flags which specify which characters are valid `.ini` config comment delimiters.
    pub struct IniCommentDelimiter: u8 {
        /// Comments not supported.
        const None = 0b00;
        /// `;`
        const Semicolon = 0b01;
        /// `#`
        const NumberSign = 0b10;
    }
}

/// Controls how duplicate keys, if any, are handled in the sections of the `.ini` config.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IniDuplicateKeys {
    /// Do not allow duplicate keys.
    Forbid,
    /// Use the first encountered instance of the key in the section,
    /// skip all following ones.
    First,
    /// Use the last encountered instance of the key in the section,
    /// overwriting all prior, if any.
    Last,
}

/// Configuration options for the `.ini` parser.
#[derive(Clone, Copy, Debug)]
pub struct IniOptions {
    /// Valid comment delimiter character(s).
    /// If [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), comments are not supported.
    ///
    /// Default: [`Semicolon`](struct.IniCommentDelimiter.html#associatedconstant.Semicolon).
    pub comments: IniCommentDelimiter,
    /// Duplicate key handling policy.
    ///
    /// Default: [`Last`](enum.IniDuplicateKeys.html#variant.Last).
    pub duplicate_keys: IniDuplicateKeys,
    /// Whether the key / value still being parsed when the source ends without a trailing new line
    /// is added to the config.
    /// If `false`, the unterminated value is dropped.
    ///
    /// Default: `false`.
    pub flush_at_eof: bool,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            comments: IniCommentDelimiter::Semicolon,
            duplicate_keys: IniDuplicateKeys::Last,
            flush_at_eof: false,
        }
    }
}

impl IniOptions {
    pub(crate) fn is_comment_char(&self, c: char) -> bool {
        match c {
            ';' => self.comments.contains(IniCommentDelimiter::Semicolon),
            '#' => self.comments.contains(IniCommentDelimiter::NumberSign),
            _ => false,
        }
    }
}
