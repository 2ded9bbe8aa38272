//! Terminal host
//!
//! [`TerminalView`] renders the client's state as plain text. In interactive
//! mode it also shows the form and the loading indicator; one-shot commands
//! only print the table. Error banners go to the error stream and stay on
//! the shell prompt until their timeout passes; the view only keeps the
//! dismissal deadline, the message itself lives in the client's banner.

use std::io::{self, Stderr, Stdout, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::api::UsersApi;
use crate::banner::BannerTicket;
use crate::client::{Confirm, Deletion, FormSyncClient, View};
use crate::form::FormState;
use crate::table::TableView;

const HELP: &str = "\
Commands:
  list            reload the table
  show            show the form
  edit <id>       load a listed user into the form
  name <text>     set the name input
  mail <text>     set the mail input
  submit          create or update from the form
  cancel          leave edit mode
  delete <id>     delete a user (asks first)
  help            show this message
  quit            leave the shell";

/// Plain-text [`View`]
pub struct TerminalView<O = Stdout, E = Stderr> {
    out: O,
    err: E,
    interactive: bool,
    /// Pending banner dismissal
    dismissal: Option<(BannerTicket, Instant)>,
}

impl TerminalView<Stdout, Stderr> {
    /// View over stdout and stderr
    pub fn stdio(interactive: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), interactive)
    }
}

impl<O: Write, E: Write> TerminalView<O, E> {
    pub fn new(out: O, err: E, interactive: bool) -> Self {
        Self {
            out,
            err,
            interactive,
            dismissal: None,
        }
    }

    pub fn out(&self) -> &O {
        &self.out
    }

    pub fn err(&self) -> &E {
        &self.err
    }

    /// Ticket of the banner whose deadline has passed, if any
    pub fn due_dismissal(&mut self, now: Instant) -> Option<BannerTicket> {
        match self.dismissal {
            Some((ticket, deadline)) if deadline <= now => {
                self.dismissal = None;
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Print a line on the output stream
    pub fn print(&mut self, text: &str) {
        write_text(&mut self.out, &format!("{}\n", text));
    }

    fn print_prompt(&mut self, banner: Option<&str>) {
        write_text(&mut self.out, &prompt(banner));
    }
}

/// Shell prompt, carrying the banner message while it is up
pub fn prompt(banner: Option<&str>) -> String {
    match banner {
        Some(message) => format!("formsync [{}]> ", message),
        None => "formsync> ".to_string(),
    }
}

fn write_text(w: &mut impl Write, text: &str) {
    if let Err(e) = w.write_all(text.as_bytes()).and_then(|_| w.flush()) {
        tracing::warn!(error = %e, "Failed to write to terminal");
    }
}

impl<O: Write, E: Write> View for TerminalView<O, E> {
    fn render_table(&mut self, table: &TableView) {
        write_text(&mut self.out, &table.to_string());
    }

    fn render_form(&mut self, form: &FormState) {
        if !self.interactive {
            return;
        }
        let labels = form.labels();
        let mut text = format!(
            "{}\n  name: {}\n  mail: {}\n  submit: {}",
            labels.title,
            form.name(),
            form.mail(),
            labels.submit
        );
        if labels.cancel_visible {
            text.push_str("  |  cancel");
        }
        self.print(&text);
    }

    fn set_loading(&mut self, loading: bool) {
        if self.interactive && loading {
            self.print("Loading users...");
        }
    }

    fn show_banner(&mut self, message: &str, ticket: BannerTicket, ttl: Duration) {
        self.dismissal = Some((ticket, Instant::now() + ttl));
        write_text(&mut self.err, &format!("Error: {}\n", message));
    }

    fn hide_banner(&mut self) {
        self.dismissal = None;
    }
}

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        write_text(&mut io::stderr(), &format!("{} [y/N] ", message));
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Lines from stdin, read one call at a time so [`StdinConfirm`] can share it
pub fn stdin_lines() -> impl Iterator<Item = io::Result<String>> {
    std::iter::from_fn(|| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())),
            Err(e) => Some(Err(e)),
        }
    })
}

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Show,
    Edit(u64),
    Name(String),
    Mail(String),
    Submit,
    Cancel,
    Delete(u64),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid id: {0}")]
    InvalidId(String),
}

fn parse_id(arg: &str, usage: &'static str) -> Result<u64, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(ShellCommand::List),
            "show" => Ok(ShellCommand::Show),
            "edit" => parse_id(rest, "edit <id>").map(ShellCommand::Edit),
            "name" => Ok(ShellCommand::Name(rest.to_string())),
            "mail" => Ok(ShellCommand::Mail(rest.to_string())),
            "submit" => Ok(ShellCommand::Submit),
            "cancel" => Ok(ShellCommand::Cancel),
            "delete" | "rm" => parse_id(rest, "delete <id>").map(ShellCommand::Delete),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one shell command against the client
pub async fn execute<A, O, E, C>(
    client: &mut FormSyncClient<A, TerminalView<O, E>, C>,
    command: ShellCommand,
) -> Flow
where
    A: UsersApi,
    O: Write,
    E: Write,
    C: Confirm,
{
    // Failed actions are already on the banner
    match command {
        ShellCommand::List => {
            let _ = client.refresh().await;
        }
        ShellCommand::Show => {
            let form = client.form().clone();
            client.view_mut().render_form(&form);
        }
        ShellCommand::Edit(id) => {
            if !client.edit(id) {
                client.report_error(&format!("No user with id {} in the list", id));
            }
        }
        ShellCommand::Name(name) => client.set_name(name),
        ShellCommand::Mail(mail) => client.set_mail(mail),
        ShellCommand::Submit => {
            if let Ok(record) = client.submit().await {
                client.view_mut().print(&format!("Saved user {}", record.id));
            }
        }
        ShellCommand::Cancel => client.cancel(),
        ShellCommand::Delete(id) => {
            if let Ok(Deletion::Cancelled) = client.request_delete(id).await {
                client.view_mut().print("Cancelled");
            }
        }
        ShellCommand::Help => client.view_mut().print(HELP),
        ShellCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Hand a banner whose timeout passed back to the client
pub fn expire_banner<A, O, E, C>(
    client: &mut FormSyncClient<A, TerminalView<O, E>, C>,
    now: Instant,
) where
    A: UsersApi,
    O: Write,
    E: Write,
    C: Confirm,
{
    if let Some(ticket) = client.view_mut().due_dismissal(now) {
        client.dismiss_banner(ticket);
    }
}

/// Interactive session: initial load, then one command per line until
/// `quit` or end of input
pub async fn run_shell<A, O, E, C, I>(
    client: &mut FormSyncClient<A, TerminalView<O, E>, C>,
    lines: I,
) -> io::Result<()>
where
    A: UsersApi,
    O: Write,
    E: Write,
    C: Confirm,
    I: IntoIterator<Item = io::Result<String>>,
{
    let _ = client.start().await;

    let mut lines = lines.into_iter();
    loop {
        expire_banner(client, Instant::now());
        let banner = client.banner().message().map(str::to_string);
        client.view_mut().print_prompt(banner.as_deref());

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(command) => {
                tracing::debug!(?command, "Shell command");
                if execute(client, command).await == Flow::Quit {
                    break;
                }
            }
            Err(e) => client.view_mut().print(&e.to_string()),
        }
    }
    Ok(())
}
