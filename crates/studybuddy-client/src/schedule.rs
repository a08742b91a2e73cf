//! Display-ready summary of a generated study schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::response::{Schedule, ScheduleMetadata, StudyBlock};

/// One schedule day with its summed study hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: String,
    /// e.g. `"Thu, May 2"`; falls back to the raw date if unparseable.
    pub label: String,
    pub blocks: Vec<StudyBlock>,
    pub total_hours: f64,
}

impl DaySummary {
    pub fn total_hours_display(&self) -> String {
        format!("{:.1}", self.total_hours)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub days: Vec<DaySummary>,
    pub metadata: Option<ScheduleMetadata>,
}

impl ScheduleView {
    pub fn new(schedule: &Schedule, metadata: Option<ScheduleMetadata>) -> Self {
        Self {
            days: summarize(schedule),
            metadata,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.days.iter().map(|d| d.total_hours).sum()
    }

    /// Exam date as `"Fri May 10 2024"`, or the raw string.
    pub fn exam_date_label(&self) -> Option<String> {
        let raw = self.metadata.as_ref()?.exam_date.as_deref()?;
        Some(
            parse_date(raw)
                .map(|d| d.format("%a %b %d %Y").to_string())
                .unwrap_or_else(|| raw.to_string()),
        )
    }
}

/// Days in lexicographic date order, each with its blocks and hour total.
pub fn summarize(schedule: &Schedule) -> Vec<DaySummary> {
    schedule
        .iter()
        .map(|(date, blocks)| DaySummary {
            date: date.clone(),
            label: day_label(date),
            total_hours: blocks.iter().map(|b| b.hours).sum(),
            blocks: blocks.clone(),
        })
        .collect()
}

fn day_label(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%a, %b %-d").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(topic: &str, hours: f64) -> StudyBlock {
        StudyBlock {
            topic: topic.into(),
            hours,
            difficulty: "medium".into(),
        }
    }

    #[test]
    fn single_day_total() {
        let mut schedule = Schedule::new();
        schedule.insert(
            "2024-05-02".into(),
            vec![StudyBlock {
                topic: "Algebra".into(),
                hours: 1.5,
                difficulty: "easy".into(),
            }],
        );
        let days = summarize(&schedule);
        assert_eq!(days[0].total_hours, 1.5);
        assert_eq!(days[0].total_hours_display(), "1.5");
        assert_eq!(days[0].label, "Thu, May 2");
    }

    #[test]
    fn days_sorted_and_summed() {
        let mut schedule = Schedule::new();
        schedule.insert("2024-05-10".into(), vec![block("Review", 3.0)]);
        schedule.insert(
            "2024-05-03".into(),
            vec![block("Geometry", 2.0), block("Calculus", 0.5)],
        );
        let days = summarize(&schedule);
        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2024-05-03", "2024-05-10"]);
        assert_eq!(days[0].total_hours, 2.5);
        assert_eq!(days[0].blocks[1].topic, "Calculus");
        assert_eq!(days[1].total_hours_display(), "3.0");
    }

    #[test]
    fn unparseable_date_keeps_raw_label() {
        let mut schedule = Schedule::new();
        schedule.insert("Day 1".into(), vec![block("Intro", 1.0)]);
        assert_eq!(summarize(&schedule)[0].label, "Day 1");
    }

    #[test]
    fn exam_date_label_formats_like_date_string() {
        let view = ScheduleView::new(
            &Schedule::new(),
            Some(ScheduleMetadata {
                exam_date: Some("2024-05-10".into()),
                ..Default::default()
            }),
        );
        assert_eq!(view.exam_date_label().as_deref(), Some("Fri May 10 2024"));
        assert_eq!(view.total_hours(), 0.0);
    }

    #[test]
    fn no_metadata_no_exam_label() {
        let view = ScheduleView::new(&Schedule::new(), None);
        assert!(view.exam_date_label().is_none());

        let view = ScheduleView::new(&Schedule::new(), Some(ScheduleMetadata::default()));
        assert!(view.exam_date_label().is_none());
    }
}
