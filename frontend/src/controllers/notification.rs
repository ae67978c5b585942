pub const AUTO_DISMISS_MS: u32 = 5_000;
pub const SLIDE_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
}

impl Severity {
    pub fn palette(self) -> Palette {
        match self {
            Severity::Success => Palette {
                background: "#e8f6ee",
                border: "#2e9d5b",
            },
            Severity::Error => Palette {
                background: "#fdecea",
                border: "#d64541",
            },
            Severity::Info => Palette {
                background: "#e8f1fb",
                border: "#006cc4",
            },
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Severity::Success => "notification-success",
            Severity::Error => "notification-error",
            Severity::Info => "notification-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub leaving: bool,
}

/// Holds at most one notification. Timers carry the id they were started
/// for, so a timer belonging to a replaced notification never touches the
/// one that replaced it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationSlot {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationSlot {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        self.current = Some(Notification {
            id: self.next_id,
            message: message.into(),
            severity,
            leaving: false,
        });
        self.next_id
    }

    /// Starts the slide-out. Returns false when `id` is no longer shown.
    pub fn begin_exit(&mut self, id: u64) -> bool {
        match self.current.as_mut() {
            Some(n) if n.id == id && !n.leaving => {
                n.leaving = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        if self.current.as_ref().map(|n| n.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_replaces_the_current_notification() {
        let mut slot = NotificationSlot::default();
        let first = slot.show("first", Severity::Info);
        let second = slot.show("second", Severity::Error);

        assert_ne!(first, second);
        let current = slot.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn stale_timers_do_not_dismiss_the_successor() {
        let mut slot = NotificationSlot::default();
        let first = slot.show("first", Severity::Info);
        let second = slot.show("second", Severity::Success);

        assert!(!slot.begin_exit(first));
        assert!(!slot.remove(first));
        assert_eq!(slot.current().map(|n| n.id), Some(second));
    }

    #[test]
    fn exit_then_remove() {
        let mut slot = NotificationSlot::default();
        let id = slot.show("bye", Severity::Info);

        assert!(slot.begin_exit(id));
        assert!(slot.current().unwrap().leaving);
        assert!(!slot.begin_exit(id));
        assert!(slot.remove(id));
        assert!(slot.current().is_none());
    }

    #[test]
    fn severities_have_distinct_palettes() {
        let borders: Vec<_> = [Severity::Success, Severity::Error, Severity::Info]
            .iter()
            .map(|s| s.palette().border)
            .collect();
        assert_eq!(borders.len(), 3);
        assert_ne!(borders[0], borders[1]);
        assert_ne!(borders[1], borders[2]);
        assert_ne!(borders[0], borders[2]);
    }
}
