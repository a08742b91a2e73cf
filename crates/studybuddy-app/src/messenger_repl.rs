//! Interactive loop for the demo messenger.

use std::path::PathBuf;

use studybuddy_common::StudyBuddyError;
use studybuddy_config::{MessengerConfig, Theme};
use studybuddy_messenger::{
    Attachment, Direction, Messenger, MessengerEntry, ReplySimulator, EMOJI_PALETTE,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, PartialEq, Eq)]
enum MessengerCommand {
    Text(String),
    Attach(PathBuf),
    Detach,
    /// `None` toggles the picker; `Some(n)` inserts emoji `n`.
    Emoji(Option<usize>),
    Theme,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> MessengerCommand {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return MessengerCommand::Text(line.to_string());
    }
    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (trimmed, ""),
    };
    match (name, arg) {
        ("/attach", "") => MessengerCommand::Unknown(trimmed.to_string()),
        ("/attach", path) => MessengerCommand::Attach(PathBuf::from(path)),
        ("/detach", _) => MessengerCommand::Detach,
        ("/emoji", "") => MessengerCommand::Emoji(None),
        ("/emoji", n) => match n.parse() {
            Ok(n) => MessengerCommand::Emoji(Some(n)),
            Err(_) => MessengerCommand::Unknown(trimmed.to_string()),
        },
        ("/theme", _) => MessengerCommand::Theme,
        ("/quit" | "/exit", _) => MessengerCommand::Quit,
        _ => MessengerCommand::Unknown(trimmed.to_string()),
    }
}

const PREVIEW_CHARS: usize = 48;

fn format_entry(entry: &MessengerEntry, theme: Theme) -> String {
    let (who, color) = match entry.direction {
        Direction::Sent => ("you", "\x1b[1;36m"),
        Direction::Received => ("them", "\x1b[1;32m"),
    };
    let who = match theme {
        Theme::Light => who.to_string(),
        Theme::Dark => format!("{color}{who}\x1b[0m"),
    };
    let mut line = format!("[{}] {who}: {}", entry.time_label(), entry.text);
    if let Some(attachment) = &entry.attachment {
        if !entry.text.is_empty() {
            line.push(' ');
        }
        line.push_str(&attachment.label());
    }
    line
}

/// Shortened `data:` URL plus size, for image attachments only.
fn preview_line(attachment: &Attachment) -> Option<String> {
    let url = attachment.preview_data_url()?;
    let shown: String = url.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if url.chars().count() > PREVIEW_CHARS { "..." } else { "" };
    Some(format!(
        "    preview: {shown}{ellipsis} ({} bytes)",
        attachment.data.len()
    ))
}

fn format_palette() -> String {
    EMOJI_PALETTE
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{i}:{e}"))
        .collect::<Vec<_>>()
        .join("  ")
}

pub async fn run(config: &MessengerConfig) -> Result<(), StudyBuddyError> {
    let mut messenger = Messenger::new(ReplySimulator::from_config(config));
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Messenger demo. /attach PATH, /detach, /emoji [N], /theme, /quit");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = parse_command(&line);
                if !matches!(command, MessengerCommand::Emoji(_)) {
                    messenger.picker_mut().close();
                }
                match command {
                    MessengerCommand::Quit => break,
                    MessengerCommand::Attach(path) => match Attachment::from_path(&path) {
                        Ok(attachment) => {
                            println!("  * attached {}", attachment.label());
                            if let Some(preview) = preview_line(&attachment) {
                                println!("{preview}");
                            }
                            messenger.composer_mut().attach(attachment);
                        }
                        Err(e) => {
                            warn!(path = %path.display(), "attach failed: {e}");
                            println!("  * could not attach {}: {e}", path.display());
                        }
                    },
                    MessengerCommand::Detach => {
                        messenger.composer_mut().clear_attachment();
                        println!("  * attachment removed");
                    }
                    MessengerCommand::Emoji(None) => {
                        messenger.picker_mut().toggle();
                        if messenger.picker().is_open() {
                            println!("  {}", format_palette());
                        }
                    }
                    MessengerCommand::Emoji(Some(n)) => {
                        if messenger.pick_emoji(n) {
                            println!("  * draft: {}", messenger.composer().draft());
                        } else {
                            println!("  * no emoji #{n}");
                        }
                    }
                    MessengerCommand::Theme => {
                        let theme = messenger.toggle_theme();
                        println!("  * theme: {}", match theme {
                            Theme::Light => "light",
                            Theme::Dark => "dark",
                        });
                    }
                    MessengerCommand::Unknown(cmd) => println!("  * unknown command: {cmd}"),
                    MessengerCommand::Text(text) => {
                        let draft = format!("{}{text}", messenger.composer().draft());
                        messenger.composer_mut().set_draft(draft);
                        let theme = messenger.theme();
                        if let Some(entry) = messenger.send() {
                            println!("{}", format_entry(entry, theme));
                            let simulator = messenger.simulator().clone();
                            let tx = reply_tx.clone();
                            tokio::spawn(async move {
                                let _ = tx.send(simulator.next_reply().await);
                            });
                        }
                    }
                }
            }
            Some(reply) = reply_rx.recv() => {
                let theme = messenger.theme();
                println!("{}", format_entry(messenger.record_reply(reply), theme));
            }
        }
    }
    Ok(())
}
