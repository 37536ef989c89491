//! Subject lines and HTML bodies for training emails.
//!
//! Wording changes with the [`TriggerType`]; the details table is the same
//! for every trigger. askama escapes every interpolated value.

use askama::Template;
use chrono::{NaiveDate, NaiveTime};
use hrdc_core::training::TriggerType;
use hrdc_db::models::training::Training;

const DATE_FORMAT: &str = "%d %b %Y";
const TIME_FORMAT: &str = "%H:%M";

/// Subject line for a training email.
pub fn subject(trigger: TriggerType, training_title: &str) -> String {
    match trigger {
        TriggerType::Created => format!("New Training Scheduled: {training_title}"),
        TriggerType::Updated => format!("Training Updated: {training_title}"),
        TriggerType::Reminder => format!("Training Reminder: {training_title}"),
    }
}

fn heading(trigger: TriggerType) -> &'static str {
    match trigger {
        TriggerType::Created => "A new training has been scheduled",
        TriggerType::Updated => "A training has been updated",
        TriggerType::Reminder => "Reminder: upcoming training",
    }
}

fn lead(trigger: TriggerType) -> &'static str {
    match trigger {
        TriggerType::Created => "A training you are eligible for has been scheduled.",
        TriggerType::Updated => "The details of a training you are eligible for have changed.",
        TriggerType::Reminder => "This is a reminder about a training you are eligible for.",
    }
}

fn date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format(DATE_FORMAT).to_string()
    } else {
        format!("{} to {}", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
    }
}

fn time_range(start: Option<NaiveTime>, end: Option<NaiveTime>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{} - {}", s.format(TIME_FORMAT), e.format(TIME_FORMAT)),
        (Some(s), None) => format!("from {}", s.format(TIME_FORMAT)),
        (None, Some(e)) => format!("until {}", e.format(TIME_FORMAT)),
        (None, None) => "To be announced".to_string(),
    }
}

/// HTML body of a training email, rendered from `templates/training_email.html`.
#[derive(Template)]
#[template(path = "training_email.html")]
struct TrainingEmail<'a> {
    heading: &'a str,
    lead: &'a str,
    employee_name: &'a str,
    title: &'a str,
    dates: String,
    time: String,
    venue: &'a str,
    trainer: &'a str,
    mode: &'a str,
    capacity: i32,
    valid_till: Option<String>,
    description: Option<&'a str>,
}

/// Render the HTML body for one recipient.
pub fn render_training_email(
    trigger: TriggerType,
    employee_name: &str,
    training: &Training,
) -> Result<String, askama::Error> {
    TrainingEmail {
        heading: heading(trigger),
        lead: lead(trigger),
        employee_name,
        title: &training.title,
        dates: date_range(training.start_date, training.end_date),
        time: time_range(training.start_time, training.end_time),
        venue: &training.venue,
        trainer: &training.trainer,
        mode: &training.mode,
        capacity: training.capacity,
        valid_till: training
            .valid_till
            .map(|d| d.format(DATE_FORMAT).to_string()),
        description: training.description.as_deref().filter(|d| !d.is_empty()),
    }
    .render()
}
