// src/session.rs
use std::io::{self, Write};
use log::{debug, error};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use crate::config::Config;
use crate::handlers::check::Checker;
use crate::handlers::probe::Prober;
use crate::handlers::status::StatusSource;
use crate::render;
use crate::utils::parse_server_address;

/// Answers to "check another server?" that keep the session going.
/// Fixed set; an empty answer counts as yes.
const AFFIRMATIVE: &[&str] = &["o", "oui", "y", "yes", ""];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Examples,
    Check(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "examples" | "ex" | "help" => Self::Examples,
            _ => Self::Check(line.to_string()),
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE.contains(&answer.trim().to_lowercase().as_str())
}

/// Where interactive input comes from. `Ok(None)` means the user interrupted
/// or closed the input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn remember(&mut self, _line: &str) {}
}

pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| {
            error!("Failed to initialise line editor: {}", e);
            io::Error::new(io::ErrorKind::Other, format!("Failed to initialise line editor: {}", e))
        })?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!("Could not add history entry: {}", e);
        }
    }
}

pub struct Session<S, P, W> {
    checker: Checker<S, P>,
    config: Config,
    out: W,
}

impl<S: StatusSource, P: Prober, W: Write> Session<S, P, W> {
    pub fn new(checker: Checker<S, P>, config: Config, out: W) -> Self {
        Self { checker, config, out }
    }

    /// Parses, checks and prints one address. Returns whether the API answered.
    fn check_input(&mut self, input: &str) -> io::Result<bool> {
        let address = match parse_server_address(input, self.config.default_port) {
            Ok(address) => address,
            Err(e) => {
                writeln!(self.out, "{}\n", render::address_error(&e))?;
                return Ok(false);
            }
        };

        writeln!(self.out, "{}", render::checking(&address))?;
        self.out.flush()?;

        let report = self.checker.check(&address);
        writeln!(self.out, "{}", render::report(&report, &self.config))?;
        Ok(report.is_success())
    }

    pub fn run_single(&mut self, input: &str) -> io::Result<()> {
        writeln!(self.out, "{}", render::header())?;
        self.check_input(input)?;
        self.out.flush()
    }

    pub fn run_interactive<L: LineSource>(&mut self, input: &mut L) -> io::Result<()> {
        writeln!(self.out, "{}", render::header())?;

        loop {
            self.out.flush()?;
            let Some(line) = input.read_line(&render::address_prompt())? else {
                writeln!(self.out, "\n\n{}\n", render::farewell())?;
                break;
            };

            let text = match Command::parse(&line) {
                Command::Quit => {
                    writeln!(self.out, "\n{}\n", render::farewell())?;
                    break;
                }
                Command::Examples => {
                    writeln!(self.out, "\n{}", render::examples())?;
                    continue;
                }
                Command::Check(text) => text,
            };

            input.remember(&text);
            writeln!(self.out)?;

            if self.check_input(&text)? {
                self.out.flush()?;
                match input.read_line(&render::continue_prompt())? {
                    Some(answer) if is_affirmative(&answer) => {}
                    Some(_) => {
                        writeln!(self.out, "\n{}\n", render::farewell())?;
                        break;
                    }
                    None => {
                        writeln!(self.out, "\n\n{}\n", render::farewell())?;
                        break;
                    }
                }
            }
            writeln!(self.out)?;
        }

        self.out.flush()
    }
}
