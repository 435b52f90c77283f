// src/screens/notifications.rs

// Os "toasts" da tela
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[derive(Debug, Default)]
pub struct Notifier {
    queue: Vec<Notification>,
}

impl Notifier {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push(notification);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.queue
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}
