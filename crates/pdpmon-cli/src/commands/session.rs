//! Line-oriented driver for the settings panel.
//!
//! # Design
//! - One command per line; blank lines and `#` comments are skipped.
//! - Scripts stop at the first failing line. Interactive terminals report
//!   validation errors and keep reading.
//! - Status lines are only written in table output so JSON output stays
//!   parseable.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use anyhow::Context;
use pdpmon_config::{FeatureFlag, SettingsBinding, SettingsStore, SettingsView};
use pdpmon_events::EventSubscriber;
use pdpmon_ui::{MountedView, SettingsPanel};
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::{OutputFormat, SessionArgs};
use crate::context::{AppContext, CliError, CliResult};
use crate::output::{CliEditor, on_off, render_panel, write_events, write_failed, write_snapshot};

const PROMPT: &str = "pdpmon> ";

/// Single parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionCommand {
    Open(SettingsView),
    Back,
    Select(usize),
    Switch(usize),
    Hover(usize),
    Leave(usize),
    Set(FeatureFlag, bool),
    Edit(Value),
    Show,
    Snapshot,
    Events,
    Quit,
}

/// Parse one input line; `None` for blank lines and comments.
pub(crate) fn parse_command(line: &str) -> CliResult<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "open" => SessionCommand::Open(required(verb, rest)?.parse()?),
        "back" => no_arguments(verb, rest, SessionCommand::Back)?,
        "select" => SessionCommand::Select(parse_index(verb, rest)?),
        "switch" => SessionCommand::Switch(parse_index(verb, rest)?),
        "hover" => SessionCommand::Hover(parse_index(verb, rest)?),
        "leave" => SessionCommand::Leave(parse_index(verb, rest)?),
        "set" => {
            let (flag, value) = required(verb, rest)?
                .split_once(char::is_whitespace)
                .ok_or_else(|| CliError::validation("usage: set <flag> <on|off>"))?;
            SessionCommand::Set(flag.parse()?, parse_switch(value.trim())?)
        }
        "edit" => {
            let payload = serde_json::from_str(required(verb, rest)?).map_err(|err| {
                CliError::validation(format!("edit payload is not valid JSON: {err}"))
            })?;
            SessionCommand::Edit(payload)
        }
        "show" => no_arguments(verb, rest, SessionCommand::Show)?,
        "snapshot" => no_arguments(verb, rest, SessionCommand::Snapshot)?,
        "events" => no_arguments(verb, rest, SessionCommand::Events)?,
        "quit" | "exit" => no_arguments(verb, rest, SessionCommand::Quit)?,
        _ => {
            return Err(CliError::validation(format!(
                "unknown session command '{verb}'"
            )));
        }
    };
    Ok(Some(command))
}

fn required<'a>(verb: &str, rest: &'a str) -> CliResult<&'a str> {
    if rest.is_empty() {
        Err(CliError::validation(format!("'{verb}' requires an argument")))
    } else {
        Ok(rest)
    }
}

fn no_arguments(verb: &str, rest: &str, command: SessionCommand) -> CliResult<SessionCommand> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CliError::validation(format!("'{verb}' takes no arguments")))
    }
}

fn parse_index(verb: &str, rest: &str) -> CliResult<usize> {
    required(verb, rest)?
        .parse()
        .map_err(|_| CliError::validation(format!("'{verb}' expects an option index, got '{rest}'")))
}

fn parse_switch(value: &str) -> CliResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(CliError::validation(format!(
            "expected on or off, got '{value}'"
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive panel session over one store.
pub(crate) struct Session<W> {
    store: SettingsStore,
    panel: SettingsPanel,
    events: EventSubscriber,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Session<W> {
    pub(crate) fn new(store: SettingsStore, format: OutputFormat, out: W) -> Self {
        let panel = SettingsPanel::new(&store);
        let events = store.subscribe(None);
        Self {
            store,
            panel,
            events,
            format,
            out,
        }
    }

    /// Execute commands from `input` until it ends or `quit` is read.
    /// Returns the number of commands executed.
    pub(crate) fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> CliResult<usize> {
        let mut executed = 0;
        let mut line = String::new();
        let mut number = 0;
        loop {
            if interactive {
                write!(self.out, "{PROMPT}").map_err(write_failed)?;
                self.out.flush().map_err(write_failed)?;
            }
            line.clear();
            let read = input
                .read_line(&mut line)
                .context("failed to read session input")
                .map_err(CliError::failure)?;
            if read == 0 {
                break;
            }
            number += 1;

            let outcome = match parse_command(&line) {
                Ok(Some(command)) => {
                    executed += 1;
                    self.execute(command)
                }
                Ok(None) => Ok(Flow::Continue),
                Err(err) => Err(err),
            };
            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(CliError::Validation(message)) if interactive => {
                    writeln!(self.out, "error: {message}").map_err(write_failed)?;
                }
                Err(err) => return Err(err.at_line(number)),
            }
        }
        Ok(executed)
    }

    fn execute(&mut self, command: SessionCommand) -> CliResult<Flow> {
        debug!(?command, "session command");
        match command {
            SessionCommand::Open(view) => {
                self.store.set_view(view);
                self.panel.sync(&self.store);
                self.status(&format!("view: {}", self.panel.view()))?;
            }
            SessionCommand::Back => {
                let from_main = matches!(self.panel.mounted(), MountedView::Main(_));
                self.panel.back(&mut self.store);
                let message = if from_main {
                    format!("app view: {}", self.store.app_view())
                } else {
                    format!("view: {}", self.panel.view())
                };
                self.status(&message)?;
            }
            SessionCommand::Select(index) => {
                let label = self.option_label(index);
                if self.panel.select(&mut self.store, index)? {
                    self.status(&format!("view: {}", self.panel.view()))?;
                } else {
                    self.status(&format!("{label}: use 'switch {index}' to change it"))?;
                }
            }
            SessionCommand::Switch(index) => {
                let label = self.option_label(index);
                let value = self.panel.switch(&mut self.store, index)?;
                self.status(&format!("{label}: {}", on_off(value)))?;
            }
            SessionCommand::Hover(index) => self.panel.hover(index, true)?,
            SessionCommand::Leave(index) => self.panel.hover(index, false)?,
            SessionCommand::Set(flag, value) => {
                self.store.toggle(flag, value);
                self.panel.sync(&self.store);
                self.status(&format!("{flag}: {}", on_off(value)))?;
            }
            SessionCommand::Edit(payload) => {
                let mut editor = CliEditor::with_payload(payload);
                self.panel.edit(&mut self.store, &mut editor)?;
                let collection = match self.panel.mounted() {
                    MountedView::Editor(section) => section.collection.as_str(),
                    MountedView::Main(_) => "settings",
                };
                self.status(&format!("{collection} updated"))?;
            }
            SessionCommand::Show => {
                render_panel(&mut self.panel, &mut self.store, self.format, &mut self.out)?;
            }
            SessionCommand::Snapshot => {
                write_snapshot(&self.store.snapshot(), self.format, &mut self.out)?;
            }
            SessionCommand::Events => {
                let events = self.events.drain();
                write_events(&events, self.format, &mut self.out)?;
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn option_label(&self, index: usize) -> &'static str {
        match self.panel.mounted() {
            MountedView::Main(content) => content.row(index).map_or("", |row| row.option().label),
            MountedView::Editor(_) => "",
        }
    }

    fn status(&mut self, message: &str) -> CliResult<()> {
        if self.format == OutputFormat::Table {
            writeln!(self.out, "{message}").map_err(write_failed)?;
        }
        Ok(())
    }

    /// Store driven by the session.
    #[cfg(test)]
    pub(crate) const fn store(&self) -> &SettingsStore {
        &self.store
    }
}

pub(crate) fn handle_session<W: Write + ?Sized>(
    ctx: &AppContext,
    args: &SessionArgs,
    out: &mut W,
) -> CliResult<()> {
    let store = ctx.open_store()?;
    let mut session = Session::new(store, ctx.output, out);
    let executed = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open session script {}", path.display()))
                .map_err(CliError::failure)?;
            session.run(BufReader::new(file), false)?
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            session.run(stdin.lock(), interactive)?
        }
    };
    info!(commands = executed, "session finished");
    Ok(())
}
