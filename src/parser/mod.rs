mod fsm_state;
mod reader;

use {
    crate::*,
    fsm_state::*,
    log::{debug, trace, warn},
    reader::*,
    std::io::{BufReader, Read},
};

/// Parses the `.ini` config source in a single pass, one char at a time,
/// using the user-provided [`parsing options`](struct.IniOptions.html).
pub struct IniParser<R> {
    /// Source `.ini` reader.
    reader: R,
    /// Parsing options as provided by the user.
    options: IniOptions,
}

impl<R: Read> IniParser<R> {
    /// Creates a new [`parser`](struct.IniParser.html) from the `.ini` config `reader`
    /// using default [`parsing options`](struct.IniOptions.html).
    /// The reader is buffered internally.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Default::default())
    }

    pub fn with_options(reader: R, options: IniOptions) -> Self {
        Self { reader, options }
    }

    /// Sets the valid comment delimiter character(s).
    /// If [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), comments are not supported.
    ///
    /// Default: [`Semicolon`](struct.IniCommentDelimiter.html#associatedconstant.Semicolon).
    pub fn comments(mut self, comments: IniCommentDelimiter) -> Self {
        self.options.comments = comments;
        self
    }

    /// Sets the duplicate key handling policy.
    ///
    /// Default: [`Last`](enum.IniDuplicateKeys.html#variant.Last).
    pub fn duplicate_keys(mut self, duplicate_keys: IniDuplicateKeys) -> Self {
        self.options.duplicate_keys = duplicate_keys;
        self
    }

    /// Sets whether the key / value still being parsed when the source ends
    /// without a trailing new line is added to the config.
    ///
    /// Default: `false`.
    pub fn flush_at_eof(mut self, flush_at_eof: bool) -> Self {
        self.options.flush_at_eof = flush_at_eof;
        self
    }

    /// Consumes the parser and tries to parse the whole `.ini` source.
    /// Returns the parsed table, or the first error encountered - no partial table is returned.
    pub fn parse(self) -> Result<IniTable, ConfigError> {
        let options = self.options;

        let mut reader = IniReader::new(BufReader::new(self.reader));

        let mut table = IniTable::new();
        let mut persistent_state = IniParserPersistentState::new();
        let mut fsm_state = IniParserFSMState::StartLine;

        // Read the chars until EOF, process according to current state.
        while let Some(c) = reader.next()? {
            let transition = fsm_state
                .process(c, &mut persistent_state, &options)
                .map_err(|err| Self::error(err, &reader))?;

            if let Some(emit) = transition.emit {
                add_to_table(emit, &mut table, &mut persistent_state, &options)
                    .map_err(|err| Self::error(err, &reader))?;
            }

            fsm_state = transition.state;
        }

        if let Some(emit) = fsm_state.finish(&options) {
            add_to_table(emit, &mut table, &mut persistent_state, &options)
                .map_err(|err| Self::error(err, &reader))?;
        } else if fsm_state.is_pending() {
            debug!(
                "dropped unterminated line {} at the end of the source ({:?})",
                reader.line(),
                fsm_state
            );
        }

        debug!("parsed {} section(s)", table.len());

        Ok(table)
    }

    /// Error helper method.
    fn error(error: IniErrorKind, reader: &IniReader<BufReader<R>>) -> IniError {
        IniError {
            row: reader.line(),
            column: reader.column(),
            error,
        }
    }
}

/// Adds the section / key / value finished by the last transition to the `table`.
fn add_to_table(
    emit: IniEmit,
    table: &mut IniTable,
    state: &mut IniParserPersistentState,
    options: &IniOptions,
) -> Result<(), IniErrorKind> {
    // Sections are only allocated when their header is parsed; keys and values look them up.
    if emit == IniEmit::Section {
        trace!("[{}]", state.section);
        table.add_section(&state.section);
        return Ok(());
    }

    let section = table
        .section_mut(&state.section)
        .ok_or(IniErrorKind::NoSectionForVariable)?;

    match emit {
        IniEmit::Section => {}
        IniEmit::Key => {
            state.skip_value = false;

            if section.contains_key(&state.key) {
                match options.duplicate_keys {
                    IniDuplicateKeys::Forbid => return Err(IniErrorKind::DuplicateVariable),
                    IniDuplicateKeys::First => {
                        warn!(
                            "skipping duplicate key \"{}\" in section \"{}\"",
                            state.key, state.section
                        );
                        state.skip_value = true;
                        return Ok(());
                    }
                    IniDuplicateKeys::Last => {
                        warn!(
                            "overwriting duplicate key \"{}\" in section \"{}\"",
                            state.key, state.section
                        );
                    }
                }
            }

            trace!("[{}] {}", state.section, state.key);
            section.insert(state.key.clone(), String::new());
        }
        IniEmit::Value => {
            if !state.skip_value {
                trace!("[{}] {} = {:?}", state.section, state.key, state.value);
                section.insert(state.key.clone(), state.value.clone());
            }
        }
    }

    Ok(())
}

impl std::str::FromStr for IniTable {
    type Err = ConfigError;

    /// Parses the `.ini` config string using default [`parsing options`](struct.IniOptions.html).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IniParser::new(s.as_bytes()).parse()
    }
}
