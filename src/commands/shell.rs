use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::client::Directory;
use crate::commands::endpoints;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::types::{DeleteStyle, UserId};
use crate::view::{Action, Session};

const HELP: &str = "\
Commands:
    use <NAME|URL|none>   Switch endpoint (none clears the selection)
    list                  Reload the user list
    add <NAME>            Add a user
    edit <ID>             Start editing a row
    draft <ID> <NAME>     Replace the draft name of a row being edited
    save <ID>             Save a row being edited
    cancel <ID>           Stop editing a row, keeping the original name
    delete <ID>           Delete a user
    endpoints             List configured endpoints
    help                  Show this help
    quit                  Leave the shell";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Use(Option<String>),
    List,
    Add(String),
    Edit(String),
    Draft(String, String),
    Save(String),
    Cancel(String),
    Delete(String),
    Endpoints,
    Help,
    Quit,
}

fn required<'a>(arg: &'a str, usage: &str) -> std::result::Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(arg)
    }
}

/// Parse one shell line. `Ok(None)` is a blank line.
fn parse(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "use" => {
            let target = required(rest, "use <NAME|URL|none>")?;
            if target.eq_ignore_ascii_case("none") {
                ShellCommand::Use(None)
            } else {
                ShellCommand::Use(Some(target.to_string()))
            }
        }
        "list" | "ls" | "refresh" => ShellCommand::List,
        // Blank names are passed through so the form can reject them.
        "add" | "create" => ShellCommand::Add(rest.to_string()),
        "edit" => ShellCommand::Edit(required(rest, "edit <ID>")?.to_string()),
        "draft" => {
            let (id, name) = required(rest, "draft <ID> <NAME>")?
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            ShellCommand::Draft(id.to_string(), name.trim().to_string())
        }
        "save" => ShellCommand::Save(required(rest, "save <ID>")?.to_string()),
        "cancel" => ShellCommand::Cancel(required(rest, "cancel <ID>")?.to_string()),
        "delete" | "rm" => ShellCommand::Delete(required(rest, "delete <ID>")?.to_string()),
        "endpoints" => ShellCommand::Endpoints,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };

    Ok(Some(command))
}

fn complain(message: &str) {
    eprintln!("{} {message}", "error:".red().bold());
}

/// Text for the operator that is not part of the view. Kept off stdout when
/// stdout carries JSON documents.
fn hint(text: &str) {
    if output::is_json_output() {
        eprint!("{text}");
    } else {
        print!("{text}");
    }
}

/// What the loop should do after a command ran.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The view may have changed; show notices and the view.
    Updated,
    ShowHelp,
    ShowEndpoints,
    Quit,
}

/// Map a typed id onto a displayed row.
fn displayed_id<D: Directory>(
    session: &Session<D>,
    typed: &str,
) -> std::result::Result<UserId, String> {
    session
        .state()
        .find_row(typed)
        .map(|row| row.user.id.clone())
        .ok_or_else(|| format!("no user with id {typed} is displayed"))
}

/// Like [`displayed_id`], but the row must be in edit mode.
fn editing_id<D: Directory>(
    session: &Session<D>,
    typed: &str,
) -> std::result::Result<UserId, String> {
    let id = displayed_id(session, typed)?;
    match session.state().find_row(typed) {
        Some(row) if row.is_editing() => Ok(id),
        _ => Err(format!(
            "row {typed} is not being edited; use 'edit {typed}' first"
        )),
    }
}

/// Run one command against the session. `Err` carries a complaint for the
/// operator; nothing was sent to the directory in that case.
async fn execute<D: Directory>(
    session: &mut Session<D>,
    config: &Config,
    delete_style: DeleteStyle,
    command: ShellCommand,
) -> std::result::Result<Outcome, String> {
    match command {
        ShellCommand::Quit => return Ok(Outcome::Quit),
        ShellCommand::Help => return Ok(Outcome::ShowHelp),
        ShellCommand::Endpoints => return Ok(Outcome::ShowEndpoints),
        ShellCommand::Use(None) => session.select_endpoint(None).await,
        ShellCommand::Use(Some(selection)) => {
            let endpoint = config
                .resolve_endpoint(&selection, delete_style)
                .map_err(|e| e.to_string())?;
            session.select_endpoint(Some(endpoint)).await;
        }
        ShellCommand::List => session.refresh().await,
        ShellCommand::Add(name) => session.submit_create(&name).await,
        ShellCommand::Edit(typed) => {
            let id = displayed_id(session, &typed)?;
            session.dispatch(Action::EditClicked(id)).await;
        }
        ShellCommand::Draft(typed, name) => {
            let id = editing_id(session, &typed)?;
            session.dispatch(Action::DraftChanged(id, name)).await;
        }
        ShellCommand::Save(typed) => {
            let id = editing_id(session, &typed)?;
            session.dispatch(Action::SaveClicked(id)).await;
        }
        ShellCommand::Cancel(typed) => {
            let id = editing_id(session, &typed)?;
            session.dispatch(Action::CancelClicked(id)).await;
        }
        ShellCommand::Delete(typed) => {
            let id = displayed_id(session, &typed)?;
            session.delete(id).await;
        }
    }

    Ok(Outcome::Updated)
}

pub async fn run<D: Directory>(
    session: &mut Session<D>,
    config: &Config,
    delete_style: DeleteStyle,
) -> Result<()> {
    session.refresh().await;
    output::print_notices(&session.take_notices());
    output::print_view(session.state());
    hint("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        hint("userdir> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                complain(&message);
                continue;
            }
        };

        match execute(session, config, delete_style, command).await {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::ShowHelp) => println!("{HELP}"),
            Ok(Outcome::ShowEndpoints) => endpoints::list(config)?,
            Ok(Outcome::Updated) => {
                output::print_notices(&session.take_notices());
                output::print_view(session.state());
            }
            Err(message) => complain(&message),
        }
    }

    Ok(())
}
