//! Word-wrapping writer for descriptive text
//!
//! A line-buffering sink that wraps text at a target column and prefixes
//! every emitted line, nesting descriptions under their report line.
//!
//! - `\n` or `\r` flushes the buffered line and resets the column.
//! - The alert character is forwarded at once and takes no column.
//! - A tab advances the column to the next multiple of [`TAB_WIDTH`].
//! - Anything else is buffered. Once the column reaches the width, the line
//!   breaks at the last buffered space or tab, carrying the rest over; with
//!   no break point the whole buffer is emitted as one forced line.

use std::io::{self, Write};

/// Columns per tab stop
pub const TAB_WIDTH: usize = 8;

/// Prefix of every wrapped line
pub const LINE_PREFIX: &str = "#   ";

const BELL: u8 = 0x07;

/// Word-wrapping writer over an underlying sink
pub struct WidthFormatter<W: Write> {
    sink: W,
    width: usize,
    column: usize,
    buffer: Vec<u8>,
}

impl<W: Write> WidthFormatter<W> {
    pub fn new(sink: W, width: usize) -> Self {
        Self {
            sink,
            width,
            column: 0,
            buffer: Vec::new(),
        }
    }

    /// Current column of the buffered line
    pub fn column(&self) -> usize {
        self.column
    }

    /// Return the underlying sink, dropping any unterminated line
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn put(&mut self, byte: u8) -> io::Result<()> {
        match byte {
            b'\n' | b'\r' => {
                self.buffer.push(byte);
                self.column = 0;
                self.sink.write_all(LINE_PREFIX.as_bytes())?;
                self.sink.write_all(&self.buffer)?;
                self.buffer.clear();
            }
            BELL => self.sink.write_all(&[byte])?,
            b'\t' => {
                self.buffer.push(byte);
                self.column += TAB_WIDTH - self.column % TAB_WIDTH;
            }
            _ => {
                if self.column >= self.width {
                    self.break_line()?;
                }
                self.buffer.push(byte);
                self.column += 1;
            }
        }
        Ok(())
    }

    fn break_line(&mut self) -> io::Result<()> {
        self.sink.write_all(LINE_PREFIX.as_bytes())?;

        match self.buffer.iter().rposition(|b| matches!(b, b' ' | b'\t')) {
            Some(pos) => {
                self.sink.write_all(&self.buffer[..pos])?;
                self.buffer.drain(..=pos);
                self.column = self.buffer.len();
            }
            None => {
                self.sink.write_all(&self.buffer)?;
                self.buffer.clear();
                self.column = 0;
            }
        }

        self.sink.write_all(b"\n")
    }
}

impl<W: Write> Write for WidthFormatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.put(byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
