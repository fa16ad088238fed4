//! Terminal frontend: the UI collaborator the editor core treats as
//! external.
//!
//! Owns the single-threaded event loop, dialogs (path and keyword prompts,
//! destructive-action confirmation), rendering, and the autosave timer.
//! The loop sleeps until either input arrives or the autosave deadline
//! passes, so the core never needs a thread of its own.
//!
//! Keys: Ctrl-Q quit, Ctrl-N new, Ctrl-O open, Ctrl-S save,
//! Ctrl-Shift-S save as, Ctrl-F find, Esc clear highlights, Ctrl-T theme,
//! Ctrl-+/-/0 font size.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use jot::{EditorEngine, EditorEvent, Effect, Motion, Rgb};
use std::{
    io::{self, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

/// Upper bound on one poll sleep, so the loop stays responsive.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Run the editor until the user exits.
pub fn run(engine: EditorEngine) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen)?;

    let result = Frontend::new(engine).event_loop(&mut out);

    execute!(out, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

struct Frontend {
    engine: EditorEngine,
    /// Last notice for the status bar (save errors, match counts).
    notice: Option<String>,
    /// First document line shown in the viewport.
    top_line: usize,
    running: bool,
}

impl Frontend {
    fn new(engine: EditorEngine) -> Self {
        Self {
            engine,
            notice: None,
            top_line: 0,
            running: true,
        }
    }

    fn event_loop(&mut self, out: &mut io::Stdout) -> Result<()> {
        self.engine.autosave_mut().start();
        let title = self.engine.title();
        self.apply_effects(out, vec![Effect::SetTitle { title }])?;

        while self.running {
            self.draw(out)?;

            let wait = self
                .engine
                .autosave()
                .deadline()
                .map(|d| d.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_WAIT)
                .min(IDLE_WAIT);
            if event::poll(wait)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        self.handle_key(out, key)?;
                    },
                    // Redrawn at the top of the loop either way.
                    Event::Resize(_, _) => {},
                    _ => {},
                }
            }

            let effects = self.engine.poll_autosave(Instant::now());
            self.apply_effects(out, effects)?;
        }

        self.engine.autosave_mut().stop();
        Ok(())
    }

    fn handle_key(&mut self, out: &mut io::Stdout, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        let event = match (key.code, ctrl) {
            (KeyCode::Char('q'), true) => {
                if self.engine.is_dirty() {
                    if self.confirm(out, "Exit without saving? (y/n)")? {
                        Some(EditorEvent::ForceExit)
                    } else {
                        None
                    }
                } else {
                    Some(EditorEvent::Exit)
                }
            },
            (KeyCode::Char('n'), true) => {
                if !self.engine.is_dirty() || self.confirm(out, "Discard unsaved changes? (y/n)")? {
                    Some(EditorEvent::NewFile)
                } else {
                    None
                }
            },
            (KeyCode::Char('o'), true) => self
                .prompt(out, "Open: ")?
                .map(|p| EditorEvent::OpenFile { path: PathBuf::from(p) }),
            (KeyCode::Char('s') | KeyCode::Char('S'), true) if shift => self.prompt_save_as(out)?,
            (KeyCode::Char('s'), true) => {
                if self.engine.persist().is_bound() {
                    Some(EditorEvent::Save)
                } else {
                    self.prompt_save_as(out)?
                }
            },
            (KeyCode::Char('f'), true) => self
                .prompt(out, "Find: ")?
                .map(|keyword| EditorEvent::Search { keyword }),
            (KeyCode::Char('t'), true) => Some(EditorEvent::ToggleTheme),
            (KeyCode::Char('+') | KeyCode::Char('='), true) => Some(EditorEvent::IncreaseFont),
            (KeyCode::Char('-'), true) => Some(EditorEvent::DecreaseFont),
            (KeyCode::Char('0'), true) => Some(EditorEvent::ResetFont),

            (KeyCode::Esc, _) => Some(EditorEvent::ClearSearch),
            (KeyCode::Enter, _) => Some(EditorEvent::Insert { text: "\n".into() }),
            (KeyCode::Tab, _) => Some(EditorEvent::Insert {
                text: "    ".into(),
            }),
            (KeyCode::Backspace, _) => Some(EditorEvent::Backspace),
            (KeyCode::Delete, _) => Some(EditorEvent::DeleteForward),
            (KeyCode::Left, _) => Some(EditorEvent::Move {
                motion: Motion::Left,
            }),
            (KeyCode::Right, _) => Some(EditorEvent::Move {
                motion: Motion::Right,
            }),
            (KeyCode::Up, _) => Some(EditorEvent::Move { motion: Motion::Up }),
            (KeyCode::Down, _) => Some(EditorEvent::Move {
                motion: Motion::Down,
            }),
            (KeyCode::Home, _) => Some(EditorEvent::Move {
                motion: Motion::LineStart,
            }),
            (KeyCode::End, _) => Some(EditorEvent::Move {
                motion: Motion::LineEnd,
            }),
            (KeyCode::Char(c), false) => Some(EditorEvent::Insert {
                text: c.to_string(),
            }),
            _ => None,
        };

        if let Some(event) = event {
            // A fresh action replaces whatever notice was showing.
            self.notice = None;
            let effects = self.engine.handle_event(event);
            self.apply_effects(out, effects)?;
        }
        Ok(())
    }

    /// The effect runner: executes what the core described as data.
    fn apply_effects(&mut self, out: &mut io::Stdout, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::SetTitle { title } => execute!(out, SetTitle(title))?,
                Effect::ShowError { message } | Effect::ShowInfo { message } => {
                    self.notice = Some(message);
                },
                Effect::Exit => self.running = false,
            }
        }
        Ok(())
    }

    /// Yes/no confirmation on the status row.
    fn confirm(&mut self, out: &mut io::Stdout, question: &str) -> Result<bool> {
        self.paint_prompt_row(out, question, "")?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {},
                }
            }
        }
    }

    /// Single-line input on the status row; `None` on Esc or empty Enter.
    fn prompt(&mut self, out: &mut io::Stdout, label: &str) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.paint_prompt_row(out, label, &input)?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => return Ok((!input.is_empty()).then_some(input)),
                    KeyCode::Esc => return Ok(None),
                    KeyCode::Backspace => {
                        input.pop();
                    },
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.push(c);
                    },
                    _ => {},
                }
            }
        }
    }

    fn prompt_save_as(&mut self, out: &mut io::Stdout) -> Result<Option<EditorEvent>> {
        Ok(self
            .prompt(out, "Save as: ")?
            .map(|p| EditorEvent::SaveFileAs { path: PathBuf::from(p) }))
    }

    fn draw(&mut self, out: &mut io::Stdout) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let text_rows = rows.saturating_sub(1) as usize;
        let width = cols as usize;

        let palette = self.engine.state().view.theme.palette();
        let bg = to_color(palette.background);
        let fg = to_color(palette.foreground);
        let hl = to_color(palette.highlight);

        let (cursor_line, cursor_col) = {
            let state = self.engine.state();
            state.buffer.line_col_at(state.cursor.offset)
        };

        // Keep the cursor line inside the viewport.
        if cursor_line < self.top_line {
            self.top_line = cursor_line;
        }
        if text_rows > 0 && cursor_line >= self.top_line + text_rows {
            self.top_line = cursor_line + 1 - text_rows;
        }

        queue!(
            out,
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Clear(ClearType::All)
        )?;

        let state = self.engine.state();
        for (row, li) in (self.top_line..).take(text_rows).enumerate() {
            let Some(line) = state.buffer.line(li) else {
                break;
            };
            let visible: String = line.chars().take(width).collect();
            queue!(out, MoveTo(0, row as u16), Print(visible))?;

            // Paint search highlights over the base line.
            if let Some(search) = &state.search {
                let line_start = state.buffer.offset_at(li, 0);
                let line_len = line.chars().count();
                for span in &search.spans {
                    let s = span.start.max(line_start);
                    let e = span.end.min(line_start + line_len);
                    if s >= e {
                        continue;
                    }
                    let col = s - line_start;
                    if col >= width {
                        continue;
                    }
                    let piece: String =
                        line.chars().skip(col).take((e - s).min(width - col)).collect();
                    queue!(
                        out,
                        MoveTo(col as u16, row as u16),
                        SetBackgroundColor(hl),
                        SetForegroundColor(bg),
                        Print(piece),
                        SetBackgroundColor(bg),
                        SetForegroundColor(fg),
                    )?;
                }
            }
        }

        // Status bar, inverted, on the last row.
        let status = self.engine.status_line();
        let status = match &self.notice {
            Some(notice) => status.with_notice(notice.clone()),
            None => status,
        };
        let mut bar: String = status.to_string().chars().take(width).collect();
        let pad = width.saturating_sub(bar.chars().count());
        bar.extend(std::iter::repeat(' ').take(pad));
        queue!(
            out,
            MoveTo(0, rows - 1),
            SetBackgroundColor(fg),
            SetForegroundColor(bg),
            Print(bar),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
        )?;

        let cursor_row = cursor_line.saturating_sub(self.top_line);
        queue!(
            out,
            MoveTo(cursor_col.min(width - 1) as u16, cursor_row as u16)
        )?;
        out.flush()?;
        Ok(())
    }

    /// Take over the status row for a prompt or confirmation.
    fn paint_prompt_row(&self, out: &mut io::Stdout, label: &str, input: &str) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let width = cols as usize;
        let palette = self.engine.state().view.theme.palette();

        let mut text: String = format!("{label}{input}").chars().take(width).collect();
        let pad = width.saturating_sub(text.chars().count());
        text.extend(std::iter::repeat(' ').take(pad));

        queue!(
            out,
            MoveTo(0, rows - 1),
            SetBackgroundColor(to_color(palette.foreground)),
            SetForegroundColor(to_color(palette.background)),
            Print(text),
            SetBackgroundColor(to_color(palette.background)),
            SetForegroundColor(to_color(palette.foreground)),
        )?;
        out.flush()?;
        Ok(())
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}
