// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

/// Cached attribute state, so the writer only emits escape sequences when
/// fg/bg/bold actually change between printed cells.
#[derive(Default)]
struct Ink {
    fg: Option<Option<Color>>,
    bg: Option<Option<Color>>,
    bold: Option<bool>,
}

impl Ink {
    fn apply(&mut self, out: &mut Stdout, cell: &Cell) -> Result<()> {
        if self.fg != Some(cell.fg) {
            out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
            self.bg = Some(cell.bg);
        }
        if self.bold != Some(cell.bold) {
            out.queue(SetAttribute(if cell.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            self.bold = Some(cell.bold);
        }
        Ok(())
    }

    fn matches(&self, cell: &Cell) -> bool {
        self.fg == Some(cell.fg) && self.bg == Some(cell.bg) && self.bold == Some(cell.bold)
    }
}

pub struct Terminal {
    stdout: Stdout,
    prev: Vec<Cell>,
    prev_size: (u16, u16),
    run_buf: String,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            prev: Vec::new(),
            prev_size: (0, 0),
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        let total = frame.width as usize * frame.height as usize;
        let resized = self.prev_size != size;
        let dirty_is_large = total > 0 && frame.dirty_indices().len() >= total / 3;

        if resized || frame.is_dirty_all() || dirty_is_large {
            self.draw_full(frame, resized)?;
        } else {
            self.draw_dirty(frame)?;
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }

    fn draw_full(&mut self, frame: &Frame, resized: bool) -> Result<()> {
        if resized {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }
        let total = frame.width as usize * frame.height as usize;
        self.prev.resize(total, Cell::blank_with_bg(None));
        self.prev_size = (frame.width, frame.height);

        let mut ink = Ink::default();
        for y in 0..frame.height {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width {
                let idx = y as usize * frame.width as usize + x as usize;
                let cell = frame.cell_at_index(idx);
                ink.apply(&mut self.stdout, &cell)?;
                self.stdout.queue(Print(cell.ch))?;
                self.prev[idx] = cell;
            }
        }
        Ok(())
    }

    /// Emit only cells that changed since the last flush, coalescing
    /// consecutive same-attribute cells on a row into a single print.
    fn draw_dirty(&mut self, frame: &Frame) -> Result<()> {
        let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
        dirty.sort_unstable();

        let width = frame.width as usize;
        let mut ink = Ink::default();
        let mut cursor_at: Option<usize> = None;

        let mut i = 0;
        while i < dirty.len() {
            let start = dirty[i];
            let cell = frame.cell_at_index(start);
            if self.prev.get(start).copied() == Some(cell) {
                i += 1;
                continue;
            }

            self.prev[start] = cell;
            if cursor_at != Some(start) {
                let x = (start % width) as u16;
                let y = (start / width) as u16;
                self.stdout.queue(cursor::MoveTo(x, y))?;
            }
            ink.apply(&mut self.stdout, &cell)?;

            self.run_buf.clear();
            self.run_buf.push(cell.ch);
            let mut end = start;

            while i + 1 < dirty.len() && dirty[i + 1] == end + 1 && (end + 1) % width != 0 {
                let next = frame.cell_at_index(end + 1);
                if self.prev.get(end + 1).copied() == Some(next) || !ink.matches(&next) {
                    break;
                }
                end += 1;
                i += 1;
                self.prev[end] = next;
                self.run_buf.push(next.ch);
            }

            self.stdout.queue(Print(self.run_buf.as_str()))?;
            cursor_at = if (end + 1) % width != 0 {
                Some(end + 1)
            } else {
                None
            };
            i += 1;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
