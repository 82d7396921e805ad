/// Control a notice is shown next to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NoticeSource {
    /// The image upload control.
    Upload,
    /// The export/download control.
    Export,
}

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NoticeLevel {
    /// Something the user asked for did not happen.
    Error,
    /// Informational.
    Info,
}

/// Transient inline message.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Notice {
    /// Owning control.
    pub source: NoticeSource,
    /// Severity.
    pub level: NoticeLevel,
    /// User-facing text.
    pub message: String,
}

/// At most one notice per control. A new notice replaces the old one for the same control.
#[derive(Clone, Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    /// Show an error next to `source`.
    pub fn error(&mut self, source: NoticeSource, message: impl Into<String>) {
        self.push(Notice {
            source,
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }

    /// Show an informational message next to `source`.
    pub fn info(&mut self, source: NoticeSource, message: impl Into<String>) {
        self.push(Notice {
            source,
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    fn push(&mut self, notice: Notice) {
        self.clear(notice.source);
        self.items.push(notice);
    }

    /// Dismiss whatever is shown next to `source`.
    pub fn clear(&mut self, source: NoticeSource) {
        self.items.retain(|n| n.source != source);
    }

    /// Current notice for `source`.
    pub fn get(&self, source: NoticeSource) -> Option<&Notice> {
        self.items.iter().find(|n| n.source == source)
    }

    /// All current notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> + '_ {
        self.items.iter()
    }

    /// No notices shown.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/notice.rs"]
mod tests;
