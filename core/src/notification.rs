use crate::error::FarmError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

impl NotificationKind {
    pub fn icon(&self) -> NotificationIcon {
        match self {
            NotificationKind::Info => NotificationIcon::Info,
            NotificationKind::Warning => NotificationIcon::AlertTriangle,
            NotificationKind::Success => NotificationIcon::CheckCircle,
            NotificationKind::Error => NotificationIcon::XCircle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationIcon {
    Info,
    AlertTriangle,
    CheckCircle,
    XCircle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, message: String) -> Self {
        Notification {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.to_owned(),
            message,
            timestamp: Utc::now(),
            read: false,
        }
    }
}

/// Most-recent-first notification list. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    pub fn new(entries: Vec<Notification>) -> Self {
        NotificationLog { entries }
    }

    pub fn entries(&self) -> &Vec<Notification> {
        &self.entries
    }

    pub fn push(&mut self, notification: Notification) {
        self.entries.insert(0, notification);
    }

    pub fn mark_read(&mut self, id: &str) -> Result<&Notification, FarmError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| FarmError::UnknownNotification(id.to_owned()))?;
        entry.read = true;
        Ok(entry)
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seeded(id: &str, read: bool) -> Notification {
        Notification {
            id: id.to_owned(),
            read,
            ..Notification::new(NotificationKind::Info, "t", String::new())
        }
    }

    fn build_log() -> NotificationLog {
        NotificationLog::new(vec![
            seeded("1", false),
            seeded("2", false),
            seeded("3", true),
        ])
    }

    #[test]
    fn test_push_prepends_unread() {
        let mut log = build_log();

        log.push(Notification::new(
            NotificationKind::Success,
            "Sold",
            "msg".to_owned(),
        ));

        assert_eq!(log.entries().len(), 4);
        assert_eq!(log.entries()[0].title, "Sold");
        assert!(!log.entries()[0].read);
        assert_eq!(log.unread_count(), 3);
    }

    #[test]
    fn test_mark_read_only_target() {
        // prepare
        let mut log = build_log();
        log.entries[2].read = false;

        // execute
        log.mark_read("3").unwrap();

        // validate
        let flags: Vec<bool> = log.entries().iter().map(|n| n.read).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_mark_read_idempotent() {
        let mut log = build_log();

        log.mark_read("3").unwrap();
        let once = log.clone();
        log.mark_read("3").unwrap();

        assert_eq!(log, once);
    }

    #[test]
    fn test_mark_read_unknown() {
        let mut log = build_log();
        let before = log.clone();

        let res = log.mark_read("42");

        assert!(res.is_err());
        assert_eq!(log, before);
    }

    #[test]
    fn test_kind_icons() {
        assert_eq!(NotificationKind::Success.icon(), NotificationIcon::CheckCircle);
        assert_eq!(NotificationKind::Error.icon(), NotificationIcon::XCircle);
    }
}
