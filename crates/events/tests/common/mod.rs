//! In-memory fakes for the event pipeline ports.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use hrdc_core::notification::NotificationTarget;
use hrdc_core::types::DbId;
use hrdc_db::models::employee::EmployeeAccount;
use hrdc_db::models::notification::Notification;
use hrdc_db::models::registration::RegistrationDetail;
use hrdc_db::models::training::Training;
use hrdc_events::{
    EmailError, LivePush, MailTransport, NotificationStore, NotificationWriter, PushError,
    TrainingDirectory,
};
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn training(id: DbId, title: &str, start: NaiveDate, eligibility: Option<&str>) -> Training {
    Training {
        id,
        title: title.to_string(),
        description: None,
        trainer: "Jane Doe".to_string(),
        venue: "Room 4".to_string(),
        mode: "offline".to_string(),
        start_date: start,
        end_date: start,
        start_time: None,
        end_time: None,
        valid_till: None,
        capacity: 50,
        eligibility: eligibility.map(str::to_string),
        status_id: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn account(id: DbId, name: &str, department: &str, designation: &str) -> EmployeeAccount {
    EmployeeAccount {
        id,
        user_id: 1000 + id,
        name: name.to_string(),
        department: department.to_string(),
        designation: designation.to_string(),
        employee_type: String::new(),
        email: format!("emp{id:02}@example.com"),
        role: "Employee".to_string(),
    }
}

pub fn registrant(id: DbId, training: &Training, user_id: DbId) -> RegistrationDetail {
    RegistrationDetail {
        id,
        training_id: training.id,
        training_title: training.title.clone(),
        start_date: training.start_date,
        end_date: training.end_date,
        employee_id: id,
        employee_name: format!("Employee {id}"),
        user_id,
        email: format!("user{user_id}@example.com"),
        confirmation_id: 2,
        decided_at: Some(Utc::now()),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// FakeDirectory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeDirectory {
    pub trainings: Vec<Training>,
    pub candidates: Vec<EmployeeAccount>,
    /// Already filtered to approved, active registrations.
    pub confirmed: Vec<RegistrationDetail>,
    /// `find_training` returns an error for this id.
    pub broken_training: Option<DbId>,
}

#[async_trait]
impl TrainingDirectory for FakeDirectory {
    async fn find_training(&self, id: DbId) -> Result<Option<Training>, sqlx::Error> {
        if self.broken_training == Some(id) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.trainings.iter().find(|t| t.id == id).cloned())
    }

    async fn active_candidates(&self) -> Result<Vec<EmployeeAccount>, sqlx::Error> {
        Ok(self.candidates.clone())
    }

    async fn trainings_starting_on(&self, date: NaiveDate) -> Result<Vec<Training>, sqlx::Error> {
        Ok(self
            .trainings
            .iter()
            .filter(|t| t.start_date == date)
            .cloned()
            .collect())
    }

    async fn confirmed_registrants(
        &self,
        training_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        Ok(self
            .confirmed
            .iter()
            .filter(|r| r.training_id == training_id)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Notification>>,
}

impl MemoryStore {
    pub fn all(&self) -> Vec<Notification> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(
        &self,
        target: &NotificationTarget,
        title: &str,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let notification = Notification {
            id: rows.len() as DbId + 1,
            user_id: target.user_id(),
            role: target.role().map(str::to_string),
            title: title.to_string(),
            message: message.to_string(),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        rows.push(notification.clone());
        Ok(notification)
    }

    async fn find(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn list_for(&self, user_id: DbId, role: &str) -> Result<Vec<Notification>, sqlx::Error> {
        let mut visible: Vec<Notification> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_visible_to(user_id, role))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(visible)
    }

    async fn unread_count(&self, user_id: DbId, role: &str) -> Result<i64, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_visible_to(user_id, role) && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|n| n.id == id).map(|n| {
            if !n.is_read {
                n.is_read = true;
                n.read_at = Some(Utc::now());
            }
            n.clone()
        }))
    }

    async fn mark_all_read(&self, user_id: DbId, role: &str) -> Result<u64, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let mut flipped = 0;
        for n in rows.iter_mut() {
            if n.is_visible_to(user_id, role) && !n.is_read {
                n.is_read = true;
                n.read_at = Some(Utc::now());
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

// ---------------------------------------------------------------------------
// RecordingPush
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Pushed {
    User(DbId, String),
    Group(String, String),
}

#[derive(Default)]
pub struct RecordingPush {
    pub pushed: Mutex<Vec<Pushed>>,
    pub fail: bool,
}

impl RecordingPush {
    pub fn failing() -> Self {
        Self {
            pushed: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<Pushed> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LivePush for RecordingPush {
    async fn publish_to_user(
        &self,
        user_id: DbId,
        event: &str,
        _payload: serde_json::Value,
    ) -> Result<usize, PushError> {
        if self.fail {
            return Err(PushError::Unavailable("test".into()));
        }
        self.pushed
            .lock()
            .unwrap()
            .push(Pushed::User(user_id, event.to_string()));
        Ok(1)
    }

    async fn publish_to_group(
        &self,
        group: &str,
        event: &str,
        _payload: serde_json::Value,
    ) -> Result<usize, PushError> {
        if self.fail {
            return Err(PushError::Unavailable("test".into()));
        }
        self.pushed
            .lock()
            .unwrap()
            .push(Pushed::Group(group.to_string(), event.to_string()));
        Ok(1)
    }
}

// ---------------------------------------------------------------------------
// RecordingMailer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub at: Instant,
}

/// Records every send attempt; addresses in `fail_for` return an error.
#[derive(Default)]
pub struct RecordingMailer {
    pub attempts: Mutex<Vec<SentMail>>,
    pub fail_for: HashSet<String>,
}

impl RecordingMailer {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            fail_for: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn attempts(&self) -> Vec<SentMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), EmailError> {
        self.attempts.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            at: Instant::now(),
        });
        if self.fail_for.contains(to) {
            return Err(EmailError::Build(format!("refused {to}")));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub fn writer(store: &Arc<MemoryStore>, push: &Arc<RecordingPush>) -> NotificationWriter {
    NotificationWriter::new(store.clone(), push.clone())
}
