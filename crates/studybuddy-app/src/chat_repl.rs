//! Interactive chat loop on stdin.

use std::sync::Arc;

use studybuddy_client::{
    suggestion_fill_text, ChatSession, HttpChatApi, HttpSettings, ReplyExtension, ScheduleView,
};
use studybuddy_common::StudyBuddyError;
use studybuddy_config::{PreferenceStore, StudyBuddyConfig, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::terminal_view::TerminalView;

const HELP: &str = "\
Commands:
  /tips        show suggested prompts
  /use N       send suggestion N
  /theme       toggle light/dark
  /schedule    show or collapse the last schedule
  /hide-tips   stop loading suggestions
  /reset       start a new conversation
  /quit        exit
Anything else is sent to the assistant.";

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Send(String),
    Tips,
    Use(usize),
    Theme,
    Schedule,
    HideTips,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if !line.starts_with('/') {
        return ReplCommand::Send(line.to_string());
    }
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };
    match name {
        "/tips" => ReplCommand::Tips,
        "/use" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => ReplCommand::Use(n),
            _ => ReplCommand::Unknown(line.to_string()),
        },
        "/theme" => ReplCommand::Theme,
        "/schedule" => ReplCommand::Schedule,
        "/hide-tips" => ReplCommand::HideTips,
        "/reset" => ReplCommand::Reset,
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

fn theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

struct ChatRepl {
    session: ChatSession,
    view: Arc<TerminalView>,
    prefs: PreferenceStore,
    tips: Vec<String>,
    last_schedule: Option<ScheduleView>,
}

impl ChatRepl {
    async fn send(&mut self, text: &str) {
        // Failures were already rendered and logged by the session.
        let Ok(Some(reply)) = self.session.send_user_message(text).await else {
            return;
        };
        if let ReplyExtension::Schedule(schedule) = reply.extension {
            self.prefs.update(|p| p.schedule_expanded = true);
            self.last_schedule = Some(schedule);
        }
    }

    /// Returns false when the loop should stop.
    async fn handle(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => return false,
            ReplCommand::Send(text) => self.send(&text).await,
            ReplCommand::Tips => self.view.show_tips(&self.tips),
            ReplCommand::Use(n) => match self.tips.get(n - 1) {
                Some(tip) => {
                    let text = suggestion_fill_text(tip);
                    debug!(index = n, "using suggestion");
                    self.send(&text).await;
                }
                None => self.view.notice(&format!("No suggestion #{n}.")),
            },
            ReplCommand::Theme => {
                let prefs = self.prefs.update(|p| p.theme = p.theme.toggled());
                self.view.set_theme(prefs.theme);
                self.view
                    .notice(&format!("Theme: {}", theme_name(prefs.theme)));
            }
            ReplCommand::Schedule => {
                let prefs = self
                    .prefs
                    .update(|p| p.schedule_expanded = !p.schedule_expanded);
                match (&self.last_schedule, prefs.schedule_expanded) {
                    (Some(schedule), true) => self.view.show_schedule(schedule),
                    (None, true) => self.view.notice("No schedule yet."),
                    (_, false) => self.view.notice("Schedule collapsed."),
                }
            }
            ReplCommand::HideTips => {
                self.prefs.update(|p| p.suggestions_hidden = true);
                self.tips.clear();
                self.view.notice("Suggestions hidden.");
            }
            ReplCommand::Reset => {
                self.session.reset();
                self.last_schedule = None;
                self.view.notice("Started a new conversation.");
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Unknown(line) => {
                self.view.notice(&format!("Unknown command: {line} (try /help)"));
            }
        }
        true
    }
}

pub async fn run(
    config: &StudyBuddyConfig,
    api_base: Option<String>,
    prefs: PreferenceStore,
) -> Result<(), StudyBuddyError> {
    let mut api_config = config.api.clone();
    if let Some(base) = api_base {
        api_config.base_url = base;
    }
    let api = Arc::new(HttpChatApi::new(HttpSettings::from(&api_config))?);

    let saved = prefs.load();
    let view = Arc::new(TerminalView::new(saved.theme));
    let session = ChatSession::initialize(api, view.clone()).await;
    info!(session = %session.id(), api = %api_config.base_url, "chat ready");

    let tips = if saved.suggestions_hidden {
        Vec::new()
    } else {
        session.load_tips(config.api.tips_shown).await
    };

    let mut repl = ChatRepl {
        session,
        view,
        prefs,
        tips,
        last_schedule: None,
    };

    println!("StudyBuddy. Type /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !repl.handle(parse_command(&line)).await {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_sent() {
        assert_eq!(
            parse_command("  make me a plan  "),
            ReplCommand::Send("make me a plan".into())
        );
    }

    #[test]
    fn use_takes_one_based_index() {
        assert_eq!(parse_command("/use 2"), ReplCommand::Use(2));
        assert!(matches!(parse_command("/use 0"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_command("/use two"), ReplCommand::Unknown(_)));
    }

    #[test]
    fn known_commands() {
        assert_eq!(parse_command("/tips"), ReplCommand::Tips);
        assert_eq!(parse_command("/theme"), ReplCommand::Theme);
        assert_eq!(parse_command("/schedule"), ReplCommand::Schedule);
        assert_eq!(parse_command("/hide-tips"), ReplCommand::HideTips);
        assert_eq!(parse_command("/reset"), ReplCommand::Reset);
        assert_eq!(parse_command("/quit"), ReplCommand::Quit);
        assert_eq!(parse_command("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn unknown_slash_command() {
        assert_eq!(
            parse_command("/dance"),
            ReplCommand::Unknown("/dance".into())
        );
    }
}
