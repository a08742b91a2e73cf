//! Line-oriented rendering of chat events on stdout.

use std::io::Write;
use std::sync::RwLock;

use studybuddy_client::{ChatEvent, ChatView, ScheduleView};
use studybuddy_config::Theme;

const RESET: &str = "\x1b[0m";
const USER_DARK: &str = "\x1b[1;36m";
const ASSISTANT_DARK: &str = "\x1b[1;35m";

/// Speaker prefixes for one theme. The light theme prints plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    user: &'static str,
    assistant: &'static str,
    reset: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                user: "",
                assistant: "",
                reset: "",
            },
            Theme::Dark => Self {
                user: USER_DARK,
                assistant: ASSISTANT_DARK,
                reset: RESET,
            },
        }
    }
}

pub struct TerminalView {
    theme: RwLock<Theme>,
}

impl TerminalView {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: RwLock::new(theme),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Ok(mut current) = self.theme.write() {
            *current = theme;
        }
    }

    fn palette(&self) -> Palette {
        let theme = self.theme.read().map(|t| *t).unwrap_or_default();
        Palette::for_theme(theme)
    }

    pub fn notice(&self, text: &str) {
        println!("  * {text}");
    }

    pub fn show_tips(&self, tips: &[String]) {
        match format_tips(tips) {
            Some(block) => println!("{block}"),
            None => self.notice("No suggestions available."),
        }
    }

    pub fn show_schedule(&self, schedule: &ScheduleView) {
        println!("{}", format_schedule(schedule));
    }
}

impl ChatView for TerminalView {
    fn render(&self, event: &ChatEvent) {
        let time = chrono::Local::now().format("%H:%M").to_string();
        match event {
            ChatEvent::LoadingStarted => {
                print!("  ...\r");
                let _ = std::io::stdout().flush();
            }
            ChatEvent::LoadingFinished => {
                print!("      \r");
                let _ = std::io::stdout().flush();
            }
            other => {
                if let Some(text) = format_event(other, self.palette(), &time) {
                    println!("{text}");
                }
            }
        }
    }
}

fn format_event(event: &ChatEvent, palette: Palette, time: &str) -> Option<String> {
    let Palette {
        user,
        assistant,
        reset,
    } = palette;
    match event {
        ChatEvent::UserMessage(text) => Some(format!("[{time}] {user}you{reset}: {text}")),
        ChatEvent::AssistantMessage(text) | ChatEvent::Error(text) => {
            Some(format!("[{time}] {assistant}buddy{reset}: {text}"))
        }
        ChatEvent::ClarificationNeeded(questions) => {
            let mut out = String::from("  A few questions first:");
            for q in questions {
                out.push_str(&format!("\n    - {q}"));
            }
            Some(out)
        }
        ChatEvent::ScheduleReady(schedule) => Some(format_schedule(schedule)),
        ChatEvent::SuggestionsLoaded(tips) => format_tips(tips),
        ChatEvent::LoadingStarted | ChatEvent::LoadingFinished => None,
    }
}

fn format_tips(tips: &[String]) -> Option<String> {
    if tips.is_empty() {
        return None;
    }
    let mut out = String::from("  Try one of these (/use N):");
    for (i, tip) in tips.iter().enumerate() {
        out.push_str(&format!("\n    {}. {tip}", i + 1));
    }
    Some(out)
}

pub fn format_schedule(schedule: &ScheduleView) -> String {
    let mut out = String::from("  Study schedule");
    for day in &schedule.days {
        out.push_str(&format!(
            "\n  {} ({}h)",
            day.label,
            day.total_hours_display()
        ));
        for block in &day.blocks {
            out.push_str(&format!(
                "\n    - {} [{}] {}h",
                block.topic, block.difficulty, block.hours
            ));
        }
    }
    out.push_str(&format!("\n  Total: {:.1} hours", schedule.total_hours()));

    if let Some(meta) = &schedule.metadata {
        match (schedule.exam_date_label(), meta.days_until_exam) {
            (Some(exam), Some(days)) => {
                out.push_str(&format!("\n  Exam: {exam} ({days} days left)"))
            }
            (Some(exam), None) => out.push_str(&format!("\n  Exam: {exam}")),
            (None, Some(days)) => out.push_str(&format!("\n  Exam in {days} days")),
            (None, None) => {}
        }
        if let Some(status) = meta.status.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("\n  Status: {status}"));
        }
        for tip in &meta.tips {
            out.push_str(&format!("\n  Tip: {tip}"));
        }
    }
    out
}
