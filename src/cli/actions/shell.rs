//! Interactive session: one mounted manager for the lifetime of the shell, so
//! edits, cancels and local ids persist between commands.

use crate::{
    cli::globals::GlobalArgs,
    gateway::{HttpGateway, RemoteGateway},
    manager::UserManager,
    record::{Field, RecordId, UserDraft},
    view::{self, OutputFormat},
};
use anyhow::Result;
use std::{fmt::Write as _, io::Write as _, str::FromStr};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const PROMPT: &str = "usermgr> ";

const HELP: &str = "\
commands:
  list                                          show the table
  reload                                        fetch all users again
  add <first>, <last>, <email>, <company>[, <phone>]
  edit <id>                                     start editing a user
  set <id> <field> <value>                      fields: first, last, email, company, phone
  draft <id>                                    show the draft being edited
  save <id>                                     send the draft
  cancel <id>                                   discard the draft
  delete <id>
  error                                         show the last error
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Reload,
    Add(UserDraft),
    Edit(RecordId),
    Set(RecordId, Field, String),
    Draft(RecordId),
    Save(RecordId),
    Cancel(RecordId),
    Delete(RecordId),
    Error,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        match verb.to_lowercase().as_str() {
            "list" | "ls" => Ok(Self::List),
            "reload" => Ok(Self::Reload),
            "add" => parse_add(rest).map(Self::Add),
            "edit" => parse_id(rest).map(Self::Edit),
            "set" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let id = parse_id(parts.next().unwrap_or(""))?;
                let field = parts
                    .next()
                    .filter(|field| !field.is_empty())
                    .ok_or_else(|| "usage: set <id> <field> <value>".to_string())?
                    .parse::<Field>()?;
                let value = parts.next().unwrap_or("").trim().to_string();
                Ok(Self::Set(id, field, value))
            }
            "draft" => parse_id(rest).map(Self::Draft),
            "save" => parse_id(rest).map(Self::Save),
            "cancel" => parse_id(rest).map(Self::Cancel),
            "delete" | "rm" => parse_id(rest).map(Self::Delete),
            "error" => Ok(Self::Error),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try 'help')")),
        }
    }
}

fn parse_id(value: &str) -> Result<RecordId, String> {
    if value.trim().is_empty() {
        return Err("missing user id".to_string());
    }
    value.parse()
}

fn parse_add(rest: &str) -> Result<UserDraft, String> {
    let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) {
        return Err("usage: add <first>, <last>, <email>, <company>[, <phone>]".to_string());
    }

    let mut draft = UserDraft::default();
    for (field, value) in Field::ALL.into_iter().zip(parts) {
        draft.set(field, value);
    }
    Ok(draft)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

fn table<G: RemoteGateway>(manager: &UserManager<G>, format: OutputFormat) -> String {
    view::render(&manager.rows(), manager.last_error().as_deref(), format)
        .unwrap_or_else(|err| format!("error: {err}"))
}

fn show_draft(id: RecordId, draft: &UserDraft) -> String {
    let mut out = format!("editing user {id}\n");
    for field in Field::ALL {
        let _ = writeln!(out, "  {:<10}  {}", field.label(), draft.get(field));
    }
    out
}

/// Applies one shell command to the manager and returns what to print.
pub async fn run_command<G: RemoteGateway>(
    manager: &UserManager<G>,
    command: ShellCommand,
    format: OutputFormat,
) -> Step {
    let output = match command {
        ShellCommand::List => table(manager, format),
        ShellCommand::Reload => match manager.load().await {
            Ok(count) => format!("loaded {count} users\n{}", table(manager, format)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Add(draft) => match manager.add(draft).await {
            Ok(id) => format!("added user {id}\n{}", table(manager, format)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Edit(id) => match manager.begin_edit(id) {
            Ok(draft) => show_draft(id, &draft),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Set(id, field, value) => match manager.set_field(id, field, value) {
            Ok(()) => manager
                .draft(id)
                .map_or_else(String::new, |draft| show_draft(id, &draft)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Draft(id) => match manager.draft(id) {
            Some(draft) => show_draft(id, &draft),
            None => format!("error: user {id} is not being edited"),
        },
        ShellCommand::Save(id) => match manager.save_edit(id).await {
            Ok(record) => format!("saved user {}\n{}", record.id, table(manager, format)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Cancel(id) => match manager.cancel_edit(id) {
            Ok(record) => format!("restored user {}\n{}", record.id, table(manager, format)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Delete(id) => match manager.delete(id).await {
            Ok(()) => format!("deleted user {id}\n{}", table(manager, format)),
            Err(err) => format!("error: {err}"),
        },
        ShellCommand::Error => manager
            .last_error()
            .unwrap_or_else(|| "no error".to_string()),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return Step::Quit,
    };

    Step::Continue(output)
}

/// Run the interactive session on stdin until `quit`, EOF or Ctrl-C.
///
/// # Errors
/// Returns an error if the gateway cannot be built or stdin fails.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let gateway = HttpGateway::new(&globals.gateway)?;
    let manager = UserManager::new(gateway, &globals.manager);

    let greeting = run_command(&manager, ShellCommand::Reload, globals.output).await;
    if let Step::Continue(output) = greeting {
        println!("{}", output.trim_end());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(err) => {
                println!("error: {err}");
                continue;
            }
        };

        let step = tokio::select! {
            step = run_command(&manager, command, globals.output) => step,
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted, tearing down");
                Step::Quit
            }
        };
        match step {
            Step::Continue(output) => println!("{}", output.trim_end()),
            Step::Quit => break,
        }
    }

    manager.teardown();
    Ok(())
}
