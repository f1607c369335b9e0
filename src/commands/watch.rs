//! Live clock + banner view.
//!
//! Redraws once per tick and takes line-based input standing in for the
//! panel's touch affordances:
//!
//! ```text
//! e            enter clock edit mode
//! d <y>        pointer down at y
//! m <y>        pointer move to y
//! u            pointer up
//! s [HH:MM]    submit (optionally replacing the draft first)
//! r            reset the offset
//! q            quit
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use log::debug;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use widgetshell_core::{ClockEditor, PointerSample, ticker};

use crate::commands::clock::format_offset;
use crate::panels::Panels;
use crate::render::Render;

#[derive(Debug, PartialEq)]
enum Input {
    BeginEdit,
    PointerDown(f32),
    PointerMove(f32),
    PointerUp,
    Submit(Option<String>),
    Reset,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    let y = || arg.parse::<f32>().ok();

    match cmd {
        "e" => Input::BeginEdit,
        "d" => y().map_or_else(|| Input::Unknown(line.to_string()), Input::PointerDown),
        "m" => y().map_or_else(|| Input::Unknown(line.to_string()), Input::PointerMove),
        "u" => Input::PointerUp,
        "s" if arg.is_empty() => Input::Submit(None),
        "s" => Input::Submit(Some(arg.to_string())),
        "r" => Input::Reset,
        "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

struct WatchView {
    panels: Panels,
    editor: ClockEditor,
    started: std::time::Instant,
}

impl WatchView {
    fn draw(&self) {
        let clock = &self.panels.clock;
        let time = clock.now().format("%H:%M:%S").to_string();

        let status = match self.editor.draft() {
            Some(draft) => format!("[editing {}]", draft).yellow().to_string(),
            None if clock.can_reset() => format!("({})", format_offset(clock.offset_minutes()))
                .dimmed()
                .to_string(),
            None => String::new(),
        };

        let banner = self.panels.events.preview_for(self.panels.today()).render();
        println!("{} {}  {}", time.bold(), status, banner);
    }

    fn sample(&self, y: f32) -> PointerSample {
        PointerSample {
            x: 0.0,
            y,
            timestamp_ms: self.started.elapsed().as_millis() as u64,
        }
    }

    /// Apply one input line. Returns false when the view should close.
    fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::BeginEdit => self.editor.begin_edit(&self.panels.clock),
            Input::PointerDown(y) => {
                let sample = self.sample(y);
                self.editor.pointer_down(sample);
            }
            Input::PointerMove(y) => {
                let sample = self.sample(y);
                if let Some(delta) = self.editor.pointer_move(sample, &mut self.panels.clock) {
                    debug!("drag adjusted clock by {}m", delta);
                }
            }
            Input::PointerUp => self.editor.pointer_up(),
            Input::Submit(text) => {
                if !self.editor.is_editing() {
                    println!("{}", "Not editing; press e first".dimmed());
                    return true;
                }
                if let Some(text) = text {
                    self.editor.set_draft(&text);
                }
                if let Err(e) = self.editor.submit(&mut self.panels.clock) {
                    println!("{} {}", "✗".red(), e);
                }
            }
            Input::Reset => {
                if self.editor.is_editing() || !self.panels.clock.can_reset() {
                    println!("{}", "Nothing to reset".dimmed());
                } else {
                    self.panels.clock.reset();
                }
            }
            Input::Quit => return false,
            Input::Unknown(line) => println!("{} {:?}", "Unknown input".red(), line),
        }

        self.draw();
        true
    }
}

pub fn run(panels: Panels) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = LocalSet::new().block_on(&runtime, watch(panels));
    // The stdin reader may still be parked on a blocking read.
    runtime.shutdown_background();
    result
}

async fn watch(panels: Panels) -> Result<()> {
    let period = panels.config.tick_interval();
    let editor = ClockEditor::new(panels.config.drag_threshold);
    let view = Rc::new(RefCell::new(WatchView {
        panels,
        editor,
        started: std::time::Instant::now(),
    }));

    let tick_view = view.clone();
    let _tick = ticker::schedule(period, move |_| tick_view.borrow().draw());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => {
                    if !view.borrow_mut().handle(parse_input(&line)) {
                        break;
                    }
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
