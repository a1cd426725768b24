use chrono::Utc;

use crate::domain::model::{new_record_id, NewNotification, Notification};
use crate::domain::ports::NotificationSink;

/// Per-user notification inbox, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn add(&mut self, input: NewNotification) -> Notification {
        let notification = Notification {
            id: new_record_id("notif"),
            user_id: input.user_id,
            title: input.title,
            message: input.message,
            kind: input.kind,
            read: input.read,
            created_at: Utc::now(),
            action_url: input.action_url,
        };
        tracing::debug!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Queued notification '{}'",
            notification.title
        );
        self.notifications.insert(0, notification.clone());
        notification
    }

    /// Returns false when the id is unknown.
    pub fn mark_as_read(&mut self, notification_id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == notification_id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Returns how many notifications changed from unread to read.
    pub fn mark_all_as_read(&mut self, user_id: &str) -> usize {
        let mut changed = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    pub fn delete(&mut self, notification_id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != notification_id);
        self.notifications.len() != before
    }

    pub fn user_notifications(&self, user_id: &str) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .collect()
    }

    pub fn unread_count(&self, user_id: &str) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&mut self, notification: NewNotification) {
        self.add(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NotificationKind;

    fn message(user_id: &str, title: &str) -> NewNotification {
        NewNotification {
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: format!("{} happened", title),
            kind: NotificationKind::Order,
            read: false,
            action_url: Some("/orders".to_string()),
        }
    }

    #[test]
    fn test_add_prepends_and_assigns_id() {
        let mut center = NotificationCenter::new();
        let first = center.add(message("v1", "first"));
        let second = center.add(message("v1", "second"));

        assert!(first.id.starts_with("notif-"));
        assert_ne!(first.id, second.id);
        let titles: Vec<&str> = center
            .user_notifications("v1")
            .into_iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_read_tracking() {
        let mut center = NotificationCenter::new();
        let a = center.add(message("v1", "a"));
        center.add(message("v1", "b"));
        center.add(message("v2", "c"));

        assert_eq!(center.unread_count("v1"), 2);
        assert!(center.mark_as_read(&a.id));
        assert!(!center.mark_as_read("notif-missing"));
        assert_eq!(center.unread_count("v1"), 1);

        assert_eq!(center.mark_all_as_read("v1"), 1);
        assert_eq!(center.unread_count("v1"), 0);
        assert_eq!(center.unread_count("v2"), 1);
    }

    #[test]
    fn test_delete() {
        let mut center = NotificationCenter::new();
        let a = center.add(message("v1", "a"));
        assert!(center.delete(&a.id));
        assert!(!center.delete(&a.id));
        assert!(center.user_notifications("v1").is_empty());
    }
}
