//! Editing session for a single note with debounced auto-save and analysis.
//!
//! The session holds a draft. Every edit re-schedules a save and, for
//! unencrypted notes, an analysis pass; a later edit supersedes whatever is
//! still pending. Nothing fires on its own: the host calls
//! [`EditorSession::tick`] with the current time.

use crate::domain::{NoteId, NoteUpdate};
use crate::infra::{Analyzer, Clock, Debouncer, Insights, KeywordAnalyzer, plain_text};
use crate::state::{NoteStore, Outcome, Rejection};
use chrono::{DateTime, Duration, Utc};

/// Delay before an edit is written back to the store.
pub const DEFAULT_AUTOSAVE_DELAY_MS: i64 = 2000;
/// Delay before an edit is re-analysed.
pub const DEFAULT_ANALYSIS_DELAY_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub autosave_delay: Duration,
    pub analysis_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::milliseconds(DEFAULT_AUTOSAVE_DELAY_MS),
            analysis_delay: Duration::milliseconds(DEFAULT_ANALYSIS_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
struct Draft {
    title: String,
    content: String,
}

/// Something a [`EditorSession::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The draft was written to the store.
    Saved(NoteId),
    /// A pending save found nothing different from the stored note.
    Unchanged(NoteId),
    /// The save was rejected by the engine.
    SaveRejected(NoteId, Outcome),
    Analyzed(NoteId, Insights),
}

pub struct EditorSession<A = KeywordAnalyzer> {
    id: NoteId,
    draft: Draft,
    encrypted: bool,
    saves: Debouncer<NoteId, Draft>,
    analyses: Debouncer<NoteId, String>,
    analyzer: A,
    insights: Option<Insights>,
}

impl EditorSession<KeywordAnalyzer> {
    /// Opens a session on an existing note. Returns `None` for unknown IDs.
    pub fn open<C: Clock>(store: &NoteStore<C>, id: &NoteId, config: SessionConfig) -> Option<Self> {
        Self::with_analyzer(store, id, config, KeywordAnalyzer::default())
    }
}

impl<A: Analyzer> EditorSession<A> {
    pub fn with_analyzer<C: Clock>(
        store: &NoteStore<C>,
        id: &NoteId,
        config: SessionConfig,
        analyzer: A,
    ) -> Option<Self> {
        let note = store.note(id)?;
        tracing::debug!(id = %id, "editor session opened");
        Some(Self {
            id: id.clone(),
            draft: Draft {
                title: note.title().to_string(),
                content: note.content().to_string(),
            },
            encrypted: note.is_encrypted(),
            saves: Debouncer::new(config.autosave_delay),
            analyses: Debouncer::new(config.analysis_delay),
            analyzer,
            insights: None,
        })
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    pub fn content(&self) -> &str {
        &self.draft.content
    }

    /// Most recent analysis result, if any has completed.
    pub fn insights(&self) -> Option<&Insights> {
        self.insights.as_ref()
    }

    pub fn has_pending_save(&self) -> bool {
        self.saves.is_pending(&self.id)
    }

    pub fn has_pending_analysis(&self) -> bool {
        self.analyses.is_pending(&self.id)
    }

    pub fn edit_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.draft.title = title.into();
        self.schedule_save(now);
    }

    pub fn edit_content(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        self.draft.content = content.into();
        self.schedule_save(now);
        if !self.encrypted {
            let text = plain_text(&self.draft.content);
            self.analyses.schedule(self.id.clone(), text, now);
        }
    }

    fn schedule_save(&mut self, now: DateTime<Utc>) {
        if self.saves.schedule(self.id.clone(), self.draft.clone(), now) {
            tracing::trace!(id = %self.id, "pending save superseded");
        }
    }

    /// Earliest time at which [`EditorSession::tick`] has work to do.
    pub fn next_deadline(&mut self) -> Option<DateTime<Utc>> {
        match (self.saves.next_deadline(), self.analyses.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs every task whose delay has elapsed by `now`.
    pub fn tick<C: Clock>(&mut self, store: &mut NoteStore<C>, now: DateTime<Utc>) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for (id, draft) in self.saves.drain_due(now) {
            events.push(save(store, &id, draft));
        }
        for (id, text) in self.analyses.drain_due(now) {
            let insights = self.analyzer.analyze(&text);
            self.insights = Some(insights.clone());
            events.push(SessionEvent::Analyzed(id, insights));
        }
        events
    }

    /// Ends the session, writing any pending save immediately.
    pub fn close<C: Clock>(mut self, store: &mut NoteStore<C>) -> Option<SessionEvent> {
        self.analyses.cancel(&self.id);
        let draft = self.saves.cancel(&self.id)?;
        tracing::debug!(id = %self.id, "flushing pending save on close");
        Some(save(store, &self.id, draft))
    }

    /// Ends the session after its note was deleted, dropping pending work.
    pub fn discard(mut self) {
        if self.saves.cancel(&self.id).is_some() {
            tracing::debug!(id = %self.id, "pending save dropped");
        }
        self.analyses.cancel(&self.id);
    }
}

fn save<C: Clock>(store: &mut NoteStore<C>, id: &NoteId, draft: Draft) -> SessionEvent {
    let Some(note) = store.note(id) else {
        return SessionEvent::SaveRejected(id.clone(), Outcome::Rejected(Rejection::UnknownNote));
    };
    if note.title() == draft.title && note.content() == draft.content {
        return SessionEvent::Unchanged(id.clone());
    }

    let update = NoteUpdate::new().title(draft.title).content(draft.content);
    match store.update(id, update) {
        Outcome::Applied => SessionEvent::Saved(id.clone()),
        rejected => SessionEvent::SaveRejected(id.clone(), rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ManualClock;
    use crate::state::CollectionState;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    fn setup(content: &str, encrypted: bool) -> (NoteStore<ManualClock>, NoteId) {
        let mut store = NoteStore::with_clock(CollectionState::new(), ManualClock::new(t0()));
        let id = store.create("Draft", content, false, encrypted).unwrap();
        (store, id)
    }

    #[test]
    fn saves_after_autosave_delay() {
        let (mut store, id) = setup("<p>old</p>", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();

        session.edit_content("<p>new</p>", t0());
        assert!(session.tick(&mut store, t0() + ms(1999)).iter().all(|e| !matches!(e, SessionEvent::Saved(_))));
        assert_eq!(store.note(&id).unwrap().content(), "<p>old</p>");

        let events = session.tick(&mut store, t0() + ms(2000));
        assert!(events.contains(&SessionEvent::Saved(id.clone())));
        assert_eq!(store.note(&id).unwrap().content(), "<p>new</p>");
    }

    #[test]
    fn rapid_edits_produce_one_save() {
        let (mut store, id) = setup("a", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();

        session.edit_content("ab", t0());
        session.edit_content("abc", t0() + ms(1500));
        session.edit_content("abcd", t0() + ms(3000));

        // the first two deadlines were superseded
        session.tick(&mut store, t0() + ms(4999));
        assert_eq!(store.note(&id).unwrap().content(), "a");

        session.tick(&mut store, t0() + ms(5000));
        let note = store.note(&id).unwrap();
        assert_eq!(note.content(), "abcd");
        assert_eq!(note.versions().len(), 1);
    }

    #[test]
    fn unchanged_draft_is_not_written() {
        let (mut store, id) = setup("same", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();

        session.edit_title("Draft", t0());
        let events = session.tick(&mut store, t0() + ms(2000));

        assert!(events.contains(&SessionEvent::Unchanged(id.clone())));
        assert!(store.note(&id).unwrap().versions().is_empty());
    }

    #[test]
    fn analysis_runs_on_shorter_delay() {
        let (mut store, id) = setup("", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();

        session.edit_content("<p>Gardening notes about tomatoes and tomatoes again.</p>", t0());
        assert_eq!(session.next_deadline(), Some(t0() + ms(1000)));

        let events = session.tick(&mut store, t0() + ms(1000));
        assert!(matches!(events.as_slice(), [SessionEvent::Analyzed(_, _)]));
        let insights = session.insights().unwrap();
        assert_eq!(insights.key_terms[0].term, "tomatoes");
        assert!(session.has_pending_save());
    }

    #[test]
    fn encrypted_notes_are_not_analysed() {
        let (store, id) = setup("nk1:abc", true);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();

        session.edit_content("nk1:def", t0());

        assert!(!session.has_pending_analysis());
        assert!(session.has_pending_save());
    }

    #[test]
    fn close_flushes_pending_save() {
        let (mut store, id) = setup("before", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();
        session.edit_content("after", t0());

        let event = session.close(&mut store);

        assert_eq!(event, Some(SessionEvent::Saved(id.clone())));
        assert_eq!(store.note(&id).unwrap().content(), "after");
    }

    #[test]
    fn close_without_edits_does_nothing() {
        let (mut store, id) = setup("x", false);
        let session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();
        assert_eq!(session.close(&mut store), None);
    }

    #[test]
    fn discard_drops_pending_save() {
        let (mut store, id) = setup("keep", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();
        session.edit_content("lost", t0());

        store.delete(&id);
        session.discard();

        assert_eq!(store.note(&id).unwrap().content(), "keep");
    }

    #[test]
    fn save_after_purge_is_rejected() {
        let (mut store, id) = setup("x", false);
        let mut session = EditorSession::open(&store, &id, SessionConfig::default()).unwrap();
        session.edit_content("y", t0());
        store.permanently_delete(&id);

        let events = session.tick(&mut store, t0() + ms(2000));

        assert!(events.contains(&SessionEvent::SaveRejected(
            id.clone(),
            Outcome::Rejected(Rejection::UnknownNote)
        )));
    }

    #[test]
    fn open_unknown_note_fails() {
        let (store, _) = setup("x", false);
        assert!(EditorSession::open(&store, &NoteId::new(), SessionConfig::default()).is_none());
    }
}
