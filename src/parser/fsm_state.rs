use crate::*;

/// Accumulator buffers used to communicate information between parser FSM states.
pub(super) struct IniParserPersistentState {
    // Current section name; empty until the first section header is closed.
    pub section: String,
    // Current key name.
    pub key: String,
    // Current value.
    pub value: String,
    // Whether the value for the current key must be skipped
    // (i.e., when we encountered a duplicate key and we use the `First` duplicate key policy).
    pub skip_value: bool,
}

impl IniParserPersistentState {
    pub(super) fn new() -> Self {
        Self {
            section: String::new(),
            key: String::new(),
            value: String::new(),
            skip_value: false,
        }
    }
}

/// What the parser must add to the config after a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum IniEmit {
    /// The current section header was closed.
    Section,
    /// The current key was finished; add it with an empty value.
    Key,
    /// The current value was finished; set it for the current key.
    Value,
}

/// Result of processing a single char.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) struct IniTransition {
    pub state: IniParserFSMState,
    pub emit: Option<IniEmit>,
}

impl From<IniParserFSMState> for IniTransition {
    fn from(state: IniParserFSMState) -> Self {
        Self { state, emit: None }
    }
}

impl IniTransition {
    fn emit(state: IniParserFSMState, emit: IniEmit) -> Self {
        Self {
            state,
            emit: Some(emit),
        }
    }
}

/// `.ini` parser FSM states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum IniParserFSMState {
    /// We started parsing a new line.
    /// Accept whitespace (including new lines),
    /// comment delimiters (-> SkipLine),
    /// section start delimiters (`'['`) (-> Section),
    /// alphabetic chars if a section is open (-> Key).
    StartLine,
    /// We encountered a section start delimiter and are parsing the section name.
    /// Accept valid key chars,
    /// section end delimiters (`']'`) (-> AfterSection).
    Section,
    /// We finished parsing a section name and expect the end of the line.
    /// Accept new lines (-> StartLine),
    /// whitespace,
    /// comment delimiters (-> SkipLine).
    AfterSection,
    /// We encountered a comment delimiter and skip the rest of the line.
    /// Accept new lines (-> StartLine),
    /// skip everything else.
    SkipLine,
    /// We started parsing a key.
    /// Accept valid key chars,
    /// key-value separators (`'='`) (-> BeforeValue),
    /// spaces (-> KeyValueSeparator),
    /// new lines (-> StartLine) and comment delimiters (-> SkipLine) after a bare key.
    Key,
    /// We finished parsing a key and expect a key-value separator.
    /// Accept key-value separators (`'='`) (-> BeforeValue),
    /// spaces,
    /// new lines (-> StartLine) and comment delimiters (-> SkipLine) after a bare key.
    KeyValueSeparator,
    /// We finished parsing a key-value separator and expect a value (or a new line).
    /// Accept spaces,
    /// new lines (-> StartLine),
    /// comment delimiters (-> SkipLine),
    /// anything else (-> Value).
    BeforeValue,
    /// We started parsing a value.
    /// Accept new lines (-> StartLine),
    /// comment delimiters (-> SkipLine),
    /// anything else.
    Value,
}

impl IniParserFSMState {
    /// Processes the next char `c`, updating the accumulator buffers in `state`.
    /// Returns the new parser state, along with what must be added to the config, if anything,
    /// or an error.
    pub(super) fn process(
        self,
        c: char,
        state: &mut IniParserPersistentState,
        options: &IniOptions,
    ) -> Result<IniTransition, IniErrorKind> {
        use {IniErrorKind::*, IniParserFSMState::*};

        let new_line = c == '\n';
        let comment = options.is_comment_char(c);

        Ok(match self {
            StartLine => {
                // Skip whitespace at the start of the line (including new lines).
                if is_whitespace(c) {
                    self.into()

                // Line comment - skip the rest of the line.
                } else if comment {
                    SkipLine.into()

                // Section start delimiter - parse the section name.
                } else if c == '[' {
                    state.section.clear();
                    Section.into()

                // Valid key start - start parsing the key, unless there's no section to put it in.
                } else if c.is_ascii_alphabetic() {
                    if state.section.is_empty() {
                        return Err(NoSectionForVariable);
                    }

                    state.key.clear();
                    state.key.push(c);
                    Key.into()

                // Else an error.
                } else {
                    return Err(WrongSyntax);
                }
            }
            Section => {
                // Section end delimiter - finish the section name, skip the rest of the line.
                if c == ']' {
                    // Empty section names are not allowed.
                    if state.section.is_empty() {
                        return Err(WrongSectionSyntax);
                    }

                    IniTransition::emit(AfterSection, IniEmit::Section)

                // Valid section name char - keep parsing the section name.
                } else if is_key_char(c) {
                    state.section.push(c);
                    self.into()

                // Else an error (including new lines).
                } else {
                    return Err(WrongSectionSyntax);
                }
            }
            AfterSection => {
                if new_line {
                    StartLine.into()
                } else if comment {
                    SkipLine.into()
                } else if is_whitespace(c) {
                    self.into()
                } else {
                    return Err(WrongSectionSyntax);
                }
            }
            SkipLine => {
                if new_line {
                    StartLine.into()
                } else {
                    self.into()
                }
            }
            Key => {
                // Bare key - finish the key with an empty value, start the new line.
                if new_line {
                    IniTransition::emit(StartLine, IniEmit::Key)

                // Bare key followed by a comment.
                } else if comment {
                    IniTransition::emit(SkipLine, IniEmit::Key)

                // Space between the key and the separator - finish the key, parse the separator.
                } else if c == ' ' {
                    IniTransition::emit(KeyValueSeparator, IniEmit::Key)

                // Key-value separator - finish the key, parse the value.
                } else if c == '=' {
                    IniTransition::emit(BeforeValue, IniEmit::Key)

                // Valid key char - keep parsing the key.
                } else if is_key_char(c) {
                    state.key.push(c);
                    self.into()

                // Else an error.
                } else {
                    return Err(WrongVariableSyntax);
                }
            }
            KeyValueSeparator => {
                if new_line {
                    StartLine.into()
                } else if comment {
                    SkipLine.into()
                } else if c == ' ' {
                    self.into()
                } else if c == '=' {
                    BeforeValue.into()
                } else {
                    return Err(WrongVariableSyntax);
                }
            }
            BeforeValue => {
                // New line or comment - the value is empty (the key was already added).
                if new_line {
                    StartLine.into()
                } else if comment {
                    SkipLine.into()

                // Skip the spaces before the value.
                } else if c == ' ' {
                    self.into()

                // Anything else starts the value.
                } else {
                    state.value.clear();
                    state.value.push(c);
                    Value.into()
                }
            }
            Value => {
                if new_line {
                    IniTransition::emit(StartLine, IniEmit::Value)
                } else if comment {
                    IniTransition::emit(SkipLine, IniEmit::Value)
                } else {
                    state.value.push(c);
                    self.into()
                }
            }
        })
    }

    /// Called when the source ends.
    /// Returns what must be added to the config for the key / value still being parsed, if anything.
    /// The key / value is dropped unless `flush_at_eof` is set in the `options`.
    pub(super) fn finish(self, options: &IniOptions) -> Option<IniEmit> {
        if !options.flush_at_eof {
            return None;
        }

        match self {
            IniParserFSMState::Key => Some(IniEmit::Key),
            IniParserFSMState::Value => Some(IniEmit::Value),
            _ => None,
        }
    }

    /// Whether the source ending in this state loses a pending key / value.
    pub(super) fn is_pending(self) -> bool {
        matches!(self, IniParserFSMState::Key | IniParserFSMState::Value)
    }
}

/// Same set as C's `isspace`: unlike `char::is_ascii_whitespace`, includes the vertical tab.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Section names and keys may only contain ASCII alphanumeric chars and underscores.
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
