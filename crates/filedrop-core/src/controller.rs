//! The file input state machine.
//!
//! [`FileInputController`] owns the drag counters and the current
//! [`Selection`]. Every transition is a plain method call; the ones that
//! correspond to a caller-visible event return a [`Notice`] which the UI
//! layer forwards to the caller's handlers.
//!
//! # Ingestion
//!
//! Files arrive from a drop or from the native picker and go through the
//! same routine:
//!
//! - a non-image is committed immediately;
//! - an image is held as a provisional value together with a preview
//!   source, and only committed once the image editor finishes.
//!
//! Thumbnailers that can answer synchronously use [`ingest`]. Async ones
//! use [`begin_ingest`] followed by [`resolve_preview`]; each ingestion
//! bumps a generation counter so a preview resolving after a newer file
//! arrived is discarded.
//!
//! [`ingest`]: FileInputController::ingest
//! [`begin_ingest`]: FileInputController::begin_ingest
//! [`resolve_preview`]: FileInputController::resolve_preview

use crate::classify::is_image_name;
use crate::drag::DragCounters;
use crate::types::{Committed, EditedImage, FileInputConfig, SourceFile, WidgetState};

/// Maps a file to a display source for its preview.
pub trait Thumbnailer<F> {
    /// Produce a renderable source (e.g. a URL) previewing `file`.
    fn preview_source(&self, file: &F) -> String;
}

impl<F, T> Thumbnailer<F> for T
where
    T: Fn(&F) -> String,
{
    fn preview_source(&self, file: &F) -> String {
        self(file)
    }
}

/// Identifies one image ingestion waiting for its preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewTicket(u64);

/// What the widget currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<F> {
    /// Nothing selected yet.
    Empty,
    /// An image was accepted; its preview is still being generated.
    AwaitingPreview {
        /// The provisional image.
        file: F,
        /// Ticket the preview must present to be accepted.
        ticket: PreviewTicket,
    },
    /// An image is waiting for the editor to finish.
    PendingEdit {
        /// The provisional image.
        file: F,
        /// Preview source handed to the editor.
        preview: String,
        /// Ticket the editor's result must present to be accepted.
        ticket: PreviewTicket,
    },
    /// A final value has been committed.
    Committed {
        /// The committed file or edit result.
        value: Committed<F>,
        /// Display source for the committed value, if it is an image.
        image: Option<String>,
        /// Whether `value` came out of the image editor.
        edited: bool,
    },
}

/// A caller-visible event produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice<F> {
    /// The pointer entered the drop region (first enter of an episode).
    DragEntered(WidgetState<F>),
    /// The pointer left the drop region (last leave of an episode).
    DragLeft(WidgetState<F>),
    /// A final value was committed.
    Committed(Committed<F>),
}

/// Outcome of [`FileInputController::begin_ingest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingest<F> {
    /// The file was not an image and has been committed.
    Committed(Committed<F>),
    /// The file is an image; generate a preview for it and hand it to
    /// [`FileInputController::resolve_preview`] with this ticket.
    NeedsPreview {
        /// Ticket identifying this ingestion.
        ticket: PreviewTicket,
        /// The image to preview.
        file: F,
    },
}

impl<F> Ingest<F> {
    /// The notice to dispatch right away, if any.
    #[must_use]
    pub fn into_notice(self) -> Option<Notice<F>> {
        match self {
            Self::Committed(value) => Some(Notice::Committed(value)),
            Self::NeedsPreview { .. } => None,
        }
    }
}

/// State machine behind one file input widget.
#[derive(Debug, Clone)]
pub struct FileInputController<F> {
    counters: DragCounters,
    selection: Selection<F>,
    image_extensions: Vec<String>,
    generation: u64,
}

impl<F> Default for FileInputController<F> {
    fn default() -> Self {
        Self::new(&FileInputConfig::default())
    }
}

impl<F> FileInputController<F> {
    /// Create a controller in the initial, empty state.
    #[must_use]
    pub fn new(config: &FileInputConfig) -> Self {
        Self {
            counters: DragCounters::default(),
            selection: Selection::Empty,
            image_extensions: config
                .image_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            generation: 0,
        }
    }

    /// Current drag counters.
    #[must_use]
    pub const fn counters(&self) -> DragCounters {
        self.counters
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection<F> {
        &self.selection
    }

    /// Preview source of the image being edited, if an edit is pending.
    #[must_use]
    pub fn editing_source(&self) -> Option<&str> {
        match &self.selection {
            Selection::PendingEdit { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Ticket identifying the pending edit, if any.
    ///
    /// The editor's result is handed back with it to
    /// [`finish_edit`](FileInputController::finish_edit).
    #[must_use]
    pub const fn editing_ticket(&self) -> Option<PreviewTicket> {
        match &self.selection {
            Selection::PendingEdit { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// Current preview source, whether pending edit or committed.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        match &self.selection {
            Selection::PendingEdit { preview, .. } => Some(preview),
            Selection::Committed { image, .. } => image.as_deref(),
            Selection::Empty | Selection::AwaitingPreview { .. } => None,
        }
    }

    /// Record a document-level `dragenter`.
    pub const fn on_document_drag_enter(&mut self) {
        self.counters.document_enter();
    }

    /// Record a document-level `dragleave`.
    pub const fn on_document_drag_leave(&mut self) {
        self.counters.document_leave();
    }

    /// Record a drag ending anywhere in the document (`drop` or `dragend`).
    ///
    /// A drop fires no `dragleave`, so this is what returns the counters
    /// to zero when the file lands outside this widget's drop area.
    pub const fn on_document_drag_end(&mut self) {
        self.counters.reset();
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

impl<F: SourceFile + Clone> FileInputController<F> {
    /// Snapshot of the observable state.
    #[must_use]
    pub fn state(&self) -> WidgetState<F> {
        let mut state = WidgetState {
            entered_in_document: self.counters.entered_in_document,
            is_over: self.counters.is_over,
            ..WidgetState::default()
        };
        match &self.selection {
            Selection::Empty => {}
            Selection::AwaitingPreview { file, .. } => {
                state.temp_value = Some(file.clone());
            }
            Selection::PendingEdit { file, preview, .. } => {
                state.temp_value = Some(file.clone());
                state.image = Some(preview.clone());
            }
            Selection::Committed {
                value,
                image,
                edited,
            } => {
                state.value = Some(value.clone());
                state.image.clone_from(image);
                state.has_been_edited = *edited;
            }
        }
        state
    }

    /// Whether `file` is classified as an image.
    #[must_use]
    pub fn is_image(&self, file: &F) -> bool {
        is_image_name(file.name(), &self.image_extensions)
    }

    /// Record a drop-region `dragenter`.
    ///
    /// Returns [`Notice::DragEntered`] only for the first enter of an
    /// episode; nested enters from child elements return `None`.
    pub fn on_region_drag_enter(&mut self) -> Option<Notice<F>> {
        if self.counters.region_enter() {
            log::debug!("drag entered drop area");
            Some(Notice::DragEntered(self.state()))
        } else {
            None
        }
    }

    /// Record a drop-region `dragleave`.
    ///
    /// Returns [`Notice::DragLeft`] only when the last outstanding enter
    /// is matched.
    pub fn on_region_drag_leave(&mut self) -> Option<Notice<F>> {
        if self.counters.region_leave() {
            log::debug!("drag left drop area");
            Some(Notice::DragLeft(self.state()))
        } else {
            None
        }
    }

    /// Handle a drop: reset the drag counters and ingest the first file.
    pub fn on_drop<I, T>(&mut self, files: I, thumbnailer: &T) -> Option<Notice<F>>
    where
        I: IntoIterator<Item = F>,
        T: Thumbnailer<F> + ?Sized,
    {
        let file = self.take_first(files)?;
        self.ingest(file, thumbnailer)
    }

    /// Handle a selection from the native file dialog.
    ///
    /// Behaves exactly like [`on_drop`](Self::on_drop).
    pub fn on_dialog_select<I, T>(&mut self, files: I, thumbnailer: &T) -> Option<Notice<F>>
    where
        I: IntoIterator<Item = F>,
        T: Thumbnailer<F> + ?Sized,
    {
        self.on_drop(files, thumbnailer)
    }

    /// Async counterpart of [`on_drop`](Self::on_drop).
    ///
    /// Returns `None` when `files` is empty.
    pub fn begin_drop<I>(&mut self, files: I) -> Option<Ingest<F>>
    where
        I: IntoIterator<Item = F>,
    {
        let file = self.take_first(files)?;
        Some(self.begin_ingest(file))
    }

    /// Ingest a file with a thumbnailer that answers synchronously.
    ///
    /// Non-images are committed and reported with
    /// [`Notice::Committed`]. Images become a pending edit and produce no
    /// notice until [`finish_edit`](Self::finish_edit).
    pub fn ingest<T>(&mut self, file: F, thumbnailer: &T) -> Option<Notice<F>>
    where
        T: Thumbnailer<F> + ?Sized,
    {
        match self.begin_ingest(file) {
            Ingest::Committed(value) => Some(Notice::Committed(value)),
            Ingest::NeedsPreview { ticket, file } => {
                let preview = thumbnailer.preview_source(&file);
                self.resolve_preview(ticket, preview);
                None
            }
        }
    }

    /// First half of ingestion for thumbnailers that suspend.
    ///
    /// Anything previously selected, including a pending edit, is
    /// replaced.
    pub fn begin_ingest(&mut self, file: F) -> Ingest<F> {
        self.log_discarded();
        let generation = self.next_generation();

        if self.is_image(&file) {
            log::debug!("holding image {:?} for edit", file.name());
            let ticket = PreviewTicket(generation);
            self.selection = Selection::AwaitingPreview {
                file: file.clone(),
                ticket,
            };
            Ingest::NeedsPreview { ticket, file }
        } else {
            log::debug!("committing {:?}", file.name());
            let value = Committed::File(file);
            self.selection = Selection::Committed {
                value: value.clone(),
                image: None,
                edited: false,
            };
            Ingest::Committed(value)
        }
    }

    /// Attach a generated preview to the image waiting for it.
    ///
    /// Returns `false` (and drops `preview`) if `ticket` no longer names
    /// the current ingestion.
    pub fn resolve_preview(&mut self, ticket: PreviewTicket, preview: String) -> bool {
        if !self.is_awaiting(ticket) {
            log::debug!("discarding stale preview {ticket:?}");
            return false;
        }
        let waiting = std::mem::replace(&mut self.selection, Selection::Empty);
        if let Selection::AwaitingPreview { file, .. } = waiting {
            self.selection = Selection::PendingEdit {
                file,
                preview,
                ticket,
            };
        }
        true
    }

    /// Give up on the image waiting for `ticket` after its preview failed.
    ///
    /// Returns `false` if `ticket` is stale.
    pub fn fail_preview(&mut self, ticket: PreviewTicket) -> bool {
        if !self.is_awaiting(ticket) {
            return false;
        }
        log::warn!("preview failed, clearing provisional image");
        self.selection = Selection::Empty;
        true
    }

    /// Commit the image editor's result for the edit named by `ticket`.
    ///
    /// Ignored (returns `None`) unless that edit is still pending. A
    /// result from an editor whose image was since replaced is dropped.
    pub fn finish_edit(
        &mut self,
        ticket: PreviewTicket,
        result: EditedImage,
    ) -> Option<Notice<F>> {
        if self.editing_ticket() != Some(ticket) {
            log::warn!("discarding edit of {:?}: not the pending edit", result.name);
            return None;
        }
        log::debug!("committing edited image {:?}", result.name);
        let image = Some(result.source.clone());
        let value = Committed::Edited(result);
        self.selection = Selection::Committed {
            value: value.clone(),
            image,
            edited: true,
        };
        Some(Notice::Committed(value))
    }

    fn take_first<I>(&mut self, files: I) -> Option<F>
    where
        I: IntoIterator<Item = F>,
    {
        self.counters.reset();
        files.into_iter().next()
    }

    fn is_awaiting(&self, ticket: PreviewTicket) -> bool {
        matches!(
            self.selection,
            Selection::AwaitingPreview { ticket: current, .. } if current == ticket
        )
    }

    fn log_discarded(&self) {
        match &self.selection {
            Selection::AwaitingPreview { file, .. } | Selection::PendingEdit { file, .. } => {
                log::debug!("discarding pending edit of {:?}", file.name());
            }
            Selection::Empty | Selection::Committed { .. } => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MockFile {
        name: String,
        size: u64,
    }

    impl MockFile {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_owned(),
                size: 5000,
            }
        }
    }

    impl SourceFile for MockFile {
        fn name(&self) -> &str {
            &self.name
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    fn thumbnail(file: &MockFile) -> String {
        file.name.clone()
    }

    fn controller() -> FileInputController<MockFile> {
        FileInputController::new(&FileInputConfig::with_label("Test"))
    }

    fn edited(source: &str) -> EditedImage {
        EditedImage {
            name: "MockFile.png".into(),
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
            source: source.into(),
        }
    }

    #[test]
    fn starts_empty() {
        let c = controller();
        assert_eq!(c.state(), WidgetState::default());
        assert_eq!(c.selection(), &Selection::Empty);
    }

    #[test]
    fn drag_enter_notifies_once_with_state() {
        let mut c = controller();

        let notice = c.on_region_drag_enter();
        assert_eq!(notice, Some(Notice::DragEntered(c.state())));
        assert_eq!(c.state().is_over, 1);

        assert_eq!(c.on_region_drag_enter(), None);
        assert_eq!(c.state().is_over, 2);
    }

    #[test]
    fn drag_leave_below_zero_keeps_state() {
        let mut c = controller();
        let before = c.state();

        assert_eq!(c.on_region_drag_leave(), None);
        assert_eq!(c.state(), before);
    }

    #[test]
    fn drag_leave_notifies_on_last_leave() {
        let mut c = controller();
        c.on_region_drag_enter();

        let notice = c.on_region_drag_leave();
        assert_eq!(notice, Some(Notice::DragLeft(c.state())));
        assert_eq!(c.on_region_drag_leave(), None);
    }

    #[test]
    fn drop_commits_non_image() {
        let mut c = controller();
        c.on_document_drag_enter();
        c.on_document_drag_enter();
        c.on_region_drag_enter();
        c.on_region_drag_enter();

        let file = MockFile::new("MockFile.mkv");
        let notice = c.on_drop(vec![file.clone()], &thumbnail);

        assert_eq!(notice, Some(Notice::Committed(Committed::File(file.clone()))));
        let state = c.state();
        assert_eq!(state.entered_in_document, 0);
        assert_eq!(state.is_over, 0);
        assert_eq!(state.value, Some(Committed::File(file)));
        assert_eq!(state.temp_value, None);
        assert_eq!(state.image, None);
        assert!(!state.has_been_edited);
    }

    #[test]
    fn drop_holds_image_for_edit() {
        let mut c = controller();
        c.on_region_drag_enter();
        c.on_region_drag_enter();

        let file = MockFile::new("MockFile.jpeg");
        let notice = c.on_drop(vec![file.clone()], &thumbnail);

        assert_eq!(notice, None);
        let state = c.state();
        assert_eq!(state.entered_in_document, 0);
        assert_eq!(state.is_over, 0);
        assert_eq!(state.value, None);
        assert_eq!(state.temp_value, Some(file.clone()));
        assert_eq!(state.image, Some(thumbnail(&file)));
        assert_eq!(c.editing_source(), Some("MockFile.jpeg"));
    }

    #[test]
    fn empty_drop_only_resets_counters() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("notes.txt")], &thumbnail);
        c.on_document_drag_enter();
        c.on_region_drag_enter();

        let notice = c.on_drop(Vec::new(), &thumbnail);

        assert_eq!(notice, None);
        let state = c.state();
        assert_eq!(state.is_over, 0);
        assert_eq!(state.entered_in_document, 0);
        assert_eq!(state.value, Some(Committed::File(MockFile::new("notes.txt"))));
    }

    #[test]
    fn only_first_dropped_file_is_used() {
        let mut c = controller();
        let files = vec![MockFile::new("first.pdf"), MockFile::new("second.pdf")];
        c.on_drop(files, &thumbnail);
        assert_eq!(
            c.state().value,
            Some(Committed::File(MockFile::new("first.pdf")))
        );
    }

    #[test]
    fn dialog_select_matches_drop() {
        let mut dropped = controller();
        let mut selected = controller();
        let file = MockFile::new("MockFile.jpeg");

        dropped.on_drop(vec![file.clone()], &thumbnail);
        selected.on_dialog_select(vec![file], &thumbnail);

        assert_eq!(dropped.state(), selected.state());
    }

    #[test]
    fn finishing_edit_commits_result() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("MockFile.jpeg")], &thumbnail);
        let ticket = c.editing_ticket().unwrap();

        let result = edited("blob:edited");
        let notice = c.finish_edit(ticket, result.clone());

        assert_eq!(notice, Some(Notice::Committed(Committed::Edited(result.clone()))));
        let state = c.state();
        assert_eq!(state.value, Some(Committed::Edited(result)));
        assert_eq!(state.temp_value, None);
        assert_eq!(state.image.as_deref(), Some("blob:edited"));
        assert!(state.has_been_edited);
        assert_eq!(c.editing_source(), None);
        assert_eq!(c.editing_ticket(), None);
    }

    #[test]
    fn finishing_edit_without_pending_image_is_ignored() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("clip.mkv")], &thumbnail);
        let before = c.state();

        assert_eq!(c.finish_edit(PreviewTicket(0), edited("blob:late")), None);
        assert_eq!(c.state(), before);
    }

    #[test]
    fn new_drop_discards_pending_edit() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("first.png")], &thumbnail);
        let first = c.editing_ticket().unwrap();
        let notice = c.on_drop(vec![MockFile::new("report.pdf")], &thumbnail);

        assert!(matches!(notice, Some(Notice::Committed(_))));
        let state = c.state();
        assert_eq!(state.temp_value, None);
        assert_eq!(state.image, None);
        assert_eq!(c.finish_edit(first, edited("blob:stale")), None);
    }

    #[test]
    fn late_edit_result_does_not_replace_newer_image() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("a.png")], &thumbnail);
        let first = c.editing_ticket().unwrap();
        c.on_drop(vec![MockFile::new("b.png")], &thumbnail);
        let second = c.editing_ticket().unwrap();
        assert_ne!(first, second);

        let late = EditedImage {
            name: "a.png".into(),
            ..edited("blob:a")
        };
        assert_eq!(c.finish_edit(first, late), None);

        let state = c.state();
        assert_eq!(state.value, None);
        assert_eq!(state.temp_value, Some(MockFile::new("b.png")));
        assert_eq!(c.editing_source(), Some("b.png"));

        let result = edited("blob:b");
        let notice = c.finish_edit(second, result.clone());
        assert_eq!(notice, Some(Notice::Committed(Committed::Edited(result))));
    }

    #[test]
    fn document_drag_end_clears_counters() {
        let mut c = controller();
        c.on_document_drag_enter();
        c.on_document_drag_enter();
        assert_eq!(c.counters().entered_in_document, 2);

        c.on_document_drag_end();

        assert_eq!(c.counters(), DragCounters::default());
        assert_eq!(c.state(), WidgetState::default());
    }

    #[test]
    fn async_preview_moves_to_pending_edit() {
        let mut c = controller();
        let file = MockFile::new("photo.webp");

        let ingest = c.begin_drop(vec![file.clone()]).unwrap();
        let Ingest::NeedsPreview { ticket, file: to_preview } = ingest else {
            panic!("expected an image ingestion");
        };
        assert_eq!(to_preview, file);

        let waiting = c.state();
        assert_eq!(waiting.temp_value, Some(file.clone()));
        assert_eq!(waiting.image, None);

        assert!(c.resolve_preview(ticket, "blob:photo".into()));
        assert_eq!(c.editing_source(), Some("blob:photo"));
    }

    #[test]
    fn stale_preview_is_discarded() {
        let mut c = controller();

        let Ingest::NeedsPreview { ticket: old, .. } = c.begin_ingest(MockFile::new("a.png"))
        else {
            panic!("expected an image ingestion");
        };
        let Ingest::NeedsPreview { ticket: new, .. } = c.begin_ingest(MockFile::new("b.png"))
        else {
            panic!("expected an image ingestion");
        };

        assert!(!c.resolve_preview(old, "blob:a".into()));
        assert_eq!(c.editing_source(), None);
        assert!(c.resolve_preview(new, "blob:b".into()));
        assert_eq!(c.editing_source(), Some("blob:b"));
        assert_eq!(c.state().temp_value, Some(MockFile::new("b.png")));
    }

    #[test]
    fn preview_after_non_image_commit_is_discarded() {
        let mut c = controller();
        let Ingest::NeedsPreview { ticket, .. } = c.begin_ingest(MockFile::new("a.png")) else {
            panic!("expected an image ingestion");
        };
        c.begin_ingest(MockFile::new("b.zip"));

        assert!(!c.resolve_preview(ticket, "blob:a".into()));
        assert_eq!(c.state().value, Some(Committed::File(MockFile::new("b.zip"))));
    }

    #[test]
    fn failed_preview_clears_provisional_image() {
        let mut c = controller();
        let Ingest::NeedsPreview { ticket, .. } = c.begin_ingest(MockFile::new("a.png")) else {
            panic!("expected an image ingestion");
        };

        assert!(c.fail_preview(ticket));
        assert_eq!(c.state(), WidgetState::default());
        assert!(!c.fail_preview(ticket));
    }

    #[test]
    fn custom_extensions_change_classification() {
        let config = FileInputConfig {
            image_extensions: vec!["CR2".into()],
            ..FileInputConfig::with_label("Raw")
        };
        let mut c = FileInputController::new(&config);

        assert!(c.is_image(&MockFile::new("IMG_0001.cr2")));
        let notice = c.on_drop(vec![MockFile::new("photo.jpeg")], &thumbnail);
        assert!(matches!(notice, Some(Notice::Committed(Committed::File(_)))));
    }

    #[test]
    fn drag_during_pending_edit_keeps_the_edit() {
        let mut c = controller();
        c.on_drop(vec![MockFile::new("MockFile.jpeg")], &thumbnail);

        c.on_region_drag_enter();
        c.on_region_drag_leave();

        assert_eq!(c.editing_source(), Some("MockFile.jpeg"));
    }
}
