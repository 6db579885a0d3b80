#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The Presenter turns a [`BufferDiff`] into terminal output, tracking the
//! current style and cursor so that escape sequences are only emitted when
//! something actually changes.
//!
//! # Design Principles
//!
//! - **State tracking**: remember the last emitted style and cursor position
//! - **Run grouping**: position the cursor once per [`ChangeRun`]
//! - **Single write**: buffer all output and flush once per frame
//! - **Synchronized output**: wrap each frame in DEC 2026 begin/end
//!
//! [`ChangeRun`]: crate::diff::ChangeRun

use std::io::{self, BufWriter, Write};

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::diff::BufferDiff;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Last emitted style (None = unknown/reset).
    current_style: Option<CellStyle>,
    /// Last known cursor position. None = unknown.
    cursor: Option<(u16, u16)>,
    /// Terminal row of buffer row 0 (non-zero in inline mode).
    origin_y: u16,
}

impl<W: Write> Presenter<W> {
    /// Create a new presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
            origin_y: 0,
        }
    }

    /// Place buffer row 0 at terminal row `y`.
    pub fn set_origin(&mut self, y: u16) {
        if self.origin_y != y {
            self.origin_y = y;
            self.cursor = None;
        }
    }

    /// Present the cells of `buffer` named by `diff`.
    ///
    /// # Errors
    ///
    /// Propagates any write error from the underlying writer.
    pub fn present(&mut self, buffer: &Buffer, diff: &BufferDiff) -> io::Result<()> {
        if diff.is_empty() {
            return Ok(());
        }

        queue!(self.writer, terminal::BeginSynchronizedUpdate)?;

        for run in diff.runs() {
            for x in run.x0..=run.x1 {
                let Some(cell) = buffer.get(x, run.y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                self.emit_cell(x, run.y, cell)?;
            }
        }

        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            terminal::EndSynchronizedUpdate
        )?;
        self.current_style = None;
        self.writer.flush()
    }

    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.writer, cursor::MoveTo(x, self.origin_y + y))?;
        }

        let style = CellStyle::from_cell(cell);
        if self.current_style != Some(style) {
            self.emit_style(style)?;
            self.current_style = Some(style);
        }

        let mut utf8 = [0u8; 4];
        self.writer.write_all(cell.ch.encode_utf8(&mut utf8).as_bytes())?;

        let advance = unicode_width::UnicodeWidthChar::width(cell.ch).unwrap_or(1) as u16;
        self.cursor = Some((x + advance.max(1), y));
        Ok(())
    }

    fn emit_style(&mut self, style: CellStyle) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        if style.attrs.contains(StyleFlags::BOLD) {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns the flush error if buffered bytes could not be written.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// Map a packed color to a terminal color. Fully transparent means "terminal default".
fn to_color(color: PackedRgba) -> Color {
    if color.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    fn render(frame: &Frame, origin: u16) -> String {
        let mut presenter = Presenter::new(Vec::new());
        presenter.set_origin(origin);
        presenter
            .present(&frame.buffer, &BufferDiff::full(&frame.buffer))
            .expect("write to vec");
        String::from_utf8(presenter.into_inner().expect("flush to vec")).expect("utf8 output")
    }

    #[test]
    fn emits_text_and_positions() {
        let mut frame = Frame::new(6, 1);
        frame.print(0, 0, "12:12", PackedRgba::WHITE, StyleFlags::BOLD);
        let out = render(&frame, 0);
        assert!(out.starts_with("\x1b[?2026h"));
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("12:12"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.ends_with("\x1b[?2026l"));
    }

    #[test]
    fn origin_offsets_rows() {
        let frame = Frame::new(2, 1);
        let out = render(&frame, 10);
        assert!(out.contains("\x1b[11;1H"));
    }

    #[test]
    fn truecolor_sequences() {
        let mut frame = Frame::new(1, 1);
        frame.fill_bg(frame.bounds(), PackedRgba::rgb(0x30, 0x30, 0x30));
        let out = render(&frame, 0);
        assert!(out.contains("\x1b[48;2;48;48;48m"));
    }

    #[test]
    fn empty_diff_writes_nothing() {
        let buf = Buffer::new(3, 3);
        let mut presenter = Presenter::new(Vec::new());
        presenter
            .present(&buf, &BufferDiff::compute(&buf, &buf))
            .expect("write to vec");
        assert!(presenter.into_inner().expect("flush").is_empty());
    }

    #[test]
    fn transparent_maps_to_reset() {
        assert_eq!(to_color(PackedRgba::TRANSPARENT), Color::Reset);
        assert_eq!(
            to_color(PackedRgba::rgb(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
