use std::{
    collections::VecDeque,
    io::{self, Bytes, Read},
};

/// Current position in the source.
/// Used for error reporting.
struct IniSrcPositionState {
    line: u32,
    column: u32,
    new_line: bool,
    // Set to `true` in order to consume a `\n` following a `\r` as a single newline.
    cr: bool,
}

impl IniSrcPositionState {
    fn new() -> Self {
        Self {
            line: 1,
            column: 0,
            new_line: false,
            cr: false,
        }
    }
}

/// Reads the `.ini` source one UTF-8 encoded char at a time,
/// keeping track of the line / column of the last char read.
///
/// Bytes which do not form a valid UTF-8 sequence are read as Latin-1 chars, one char per byte.
pub(super) struct IniReader<R> {
    bytes: Bytes<R>,
    // Bytes read ahead while trying to decode an invalid UTF-8 sequence.
    pending: VecDeque<u8>,
    position: IniSrcPositionState,
}

impl<R: Read> IniReader<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            pending: VecDeque::new(),
            position: IniSrcPositionState::new(),
        }
    }

    /// 1-based line of the last char read.
    pub(super) fn line(&self) -> u32 {
        self.position.line
    }

    /// 1-based column of the last char read.
    pub(super) fn column(&self) -> u32 {
        self.position.column
    }

    /// Reads the next char from the source, if any.
    /// Increments the line/column counters.
    /// Carriage returns and `\r\n` pairs are returned as a single `\n`.
    pub(super) fn next(&mut self) -> io::Result<Option<char>> {
        loop {
            let c = match self.next_char()? {
                Some(c) => c,
                None => return Ok(None),
            };

            let state = &mut self.position;

            // Eat a line feed if the previous char was a carriage return.
            if state.cr {
                state.cr = false;

                if c == '\n' {
                    continue;
                }
            }

            if state.new_line {
                state.line += 1;
                state.column = 0;

                state.new_line = false;
            }

            state.column += 1;

            return Ok(Some(match c {
                '\r' => {
                    state.new_line = true;
                    state.cr = true;
                    '\n'
                }
                '\n' => {
                    state.new_line = true;
                    '\n'
                }
                c => c,
            }));
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.pending.pop_front() {
            Some(byte) => Ok(Some(byte)),
            None => self.bytes.next().transpose(),
        }
    }

    /// Decodes the next UTF-8 encoded char from the byte stream.
    /// Falls back to Latin-1 for the first byte of an invalid sequence;
    /// the rest of the sequence is decoded again on the following calls.
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.next_byte()? {
            Some(first) => first,
            None => return Ok(None),
        };

        let len = match utf8_len(first) {
            Some(len) => len,
            None => return Ok(Some(latin1(first))),
        };

        let mut buffer = [first, 0, 0, 0];
        let mut read = 1;

        while read < len {
            match self.next_byte()? {
                Some(byte) => {
                    buffer[read] = byte;
                    read += 1;

                    if !is_continuation_byte(byte) {
                        break;
                    }
                }
                None => break,
            }
        }

        if let Some(c) = std::str::from_utf8(&buffer[..read])
            .ok()
            .and_then(|s| s.chars().next())
        {
            return Ok(Some(c));
        }

        for &byte in buffer[1..read].iter().rev() {
            self.pending.push_front(byte);
        }

        Ok(Some(latin1(first)))
    }
}

/// Returns the length in bytes of the UTF-8 sequence starting with `first`,
/// or `None` if `first` may not start a sequence.
fn utf8_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

fn latin1(byte: u8) -> char {
    char::from(byte)
}
