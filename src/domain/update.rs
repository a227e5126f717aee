//! Partial note updates.

/// Fields to change on an existing note.
///
/// A field is applied when it is `Some`, including `Some(String::new())`
/// and `Some(false)`; `None` leaves the current value alone.
///
/// # Examples
///
/// ```
/// use notekeep::domain::NoteUpdate;
///
/// let update = NoteUpdate::new().title("").pinned(false);
/// assert_eq!(update.title.as_deref(), Some(""));
/// assert_eq!(update.content, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub is_encrypted: Option<bool>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.is_pinned = Some(pinned);
        self
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.is_encrypted = Some(encrypted);
        self
    }

    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.is_pinned.is_none()
            && self.is_encrypted.is_none()
    }
}
