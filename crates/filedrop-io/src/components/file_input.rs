//! The file input widget.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::html::FileData;
use dioxus::prelude::*;
use filedrop_core::{
    Committed, EditedImage, FileInputConfig, FileInputController, FileMetadata, Ingest, Notice,
    Overrides, Renderer, SourceFile, WidgetState, present,
};

use super::drop_area::DropArea;
use super::image_editor::ImageEditor;
use super::metadata::{FileInputMetadata, FileInputMetadataProps};
use super::thumbnail::{ImageThumbnail, ImageThumbnailProps};
use crate::dialog;
use crate::document_drag::DocumentDragListeners;
use crate::file::{PickedFile, picked_files};
use crate::preview;

/// Props for the [`FileInput`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileInputProps {
    /// Label text rendered above the drop area.
    label: String,
    /// Called with the widget state when a drag enters the drop area.
    on_drag_enter: Option<EventHandler<WidgetState<PickedFile>>>,
    /// Called with the widget state when a drag leaves the drop area.
    on_drag_leave: Option<EventHandler<WidgetState<PickedFile>>>,
    /// Called with the committed file or edited image.
    on_drop: Option<EventHandler<Committed<PickedFile>>>,
    /// Replaces the default metadata view.
    custom_metadata: Option<Callback<FileInputMetadataProps, Element>>,
    /// Replaces the default image thumbnail view.
    custom_image_thumbnail: Option<Callback<ImageThumbnailProps, Element>>,
    /// Whether to render metadata for the committed file.
    #[props(default = true)]
    display_metadata: bool,
    /// Whether to render a thumbnail for the current image.
    #[props(default = true)]
    display_image_thumbnail: bool,
    /// `accept` attribute for the native picker.
    accept: Option<String>,
    /// Extensions treated as images instead of the built-in list.
    image_extensions: Option<Vec<String>>,
}

/// Caller handlers, dispatched after the controller borrow is released.
#[derive(Clone, Copy)]
struct Handlers {
    on_drag_enter: Option<EventHandler<WidgetState<PickedFile>>>,
    on_drag_leave: Option<EventHandler<WidgetState<PickedFile>>>,
    on_drop: Option<EventHandler<Committed<PickedFile>>>,
}

impl Handlers {
    fn dispatch(self, notice: Option<Notice<PickedFile>>) {
        match notice {
            Some(Notice::DragEntered(state)) => {
                if let Some(handler) = self.on_drag_enter {
                    handler.call(state);
                }
            }
            Some(Notice::DragLeft(state)) => {
                if let Some(handler) = self.on_drag_leave {
                    handler.call(state);
                }
            }
            Some(Notice::Committed(value)) => {
                if let Some(handler) = self.on_drop {
                    handler.call(value);
                }
            }
            None => {}
        }
    }
}

/// A labelled drop area with a hidden native file input.
///
/// Non-image files are committed as soon as they are dropped or picked.
/// Images open the [`ImageEditor`] and are committed once the user
/// confirms. Preview Blob URLs owned by the widget are revoked when
/// they are replaced or the widget unmounts.
#[allow(clippy::too_many_lines)]
#[component]
pub fn FileInput(props: FileInputProps) -> Element {
    let config = FileInputConfig {
        label: props.label.clone(),
        display_metadata: props.display_metadata,
        display_image_thumbnail: props.display_image_thumbnail,
        image_extensions: props
            .image_extensions
            .clone()
            .unwrap_or_else(|| FileInputConfig::default().image_extensions),
    };

    let mut controller = use_signal(|| FileInputController::<PickedFile>::new(&config));
    let mut error = use_signal(|| Option::<String>::None);
    let input_id = use_hook(dialog::next_input_id);

    let handlers = Handlers {
        on_drag_enter: props.on_drag_enter,
        on_drag_leave: props.on_drag_leave,
        on_drop: props.on_drop,
    };

    // --- Document-level drag tracking ---
    use_hook(move || {
        let listeners = DocumentDragListeners::attach(
            move || controller.write().on_document_drag_enter(),
            move || controller.write().on_document_drag_leave(),
            move || controller.write().on_document_drag_end(),
        );
        match listeners {
            Ok(listeners) => Some(Rc::new(listeners)),
            Err(e) => {
                log::warn!("document drag tracking unavailable: {e}");
                None
            }
        }
    });

    // --- Preview URL hygiene ---
    let shown = use_hook(|| Rc::new(RefCell::new(Option::<String>::None)));
    {
        let shown = Rc::clone(&shown);
        use_effect(move || {
            let current = controller.read().image().map(str::to_owned);
            let previous = shown.replace(current.clone());
            if let Some(previous) = previous
                && current.as_deref() != Some(previous.as_str())
            {
                preview::revoke_blob_url(&previous);
            }
        });
    }
    use_drop(move || {
        if let Some(url) = shown.borrow().as_deref() {
            preview::revoke_blob_url(url);
        }
    });

    // --- Ingestion (drop and dialog) ---
    let mut ingest = move |files: Vec<FileData>| {
        let started = controller.write().begin_drop(picked_files(files));
        match started {
            None => {}
            Some(started @ Ingest::Committed(_)) => {
                error.set(None);
                handlers.dispatch(started.into_notice());
            }
            Some(Ingest::NeedsPreview { ticket, file }) => {
                error.set(None);
                spawn(async move {
                    match preview::file_preview_url(&file).await {
                        Ok(url) => {
                            if !controller.write().resolve_preview(ticket, url.clone()) {
                                preview::revoke_blob_url(&url);
                            }
                        }
                        Err(e) => {
                            log::warn!("could not preview {:?}: {e}", file.name());
                            if controller.write().fail_preview(ticket) {
                                error.set(Some(format!("{e}")));
                            }
                        }
                    }
                });
            }
        }
    };

    let on_region_enter = move |()| {
        let notice = controller.write().on_region_drag_enter();
        handlers.dispatch(notice);
    };
    let on_region_leave = move |()| {
        let notice = controller.write().on_region_drag_leave();
        handlers.dispatch(notice);
    };
    let on_files_dropped = move |files: Vec<FileData>| ingest(files);

    let dialog_id = input_id.clone();
    let open_file_dialog = move |()| dialog::open_file_dialog(&dialog_id);

    let change_id = input_id.clone();
    let on_dialog_change = move |evt: FormEvent| {
        ingest(evt.files());
        dialog::reset_input(&change_id);
    };

    // Bound to the edit on screen now; a result for a replaced image is
    // rejected by the controller.
    let editing = controller.read().editing_ticket();
    let on_finish = move |result: EditedImage| {
        let Some(ticket) = editing else {
            return;
        };
        let notice = controller.write().finish_edit(ticket, result);
        handlers.dispatch(notice);
    };

    // --- Presentation ---
    let state = controller.read().state();
    let overrides = Overrides {
        metadata: props.custom_metadata.is_some(),
        thumbnail: props.custom_image_thumbnail.is_some(),
    };
    let view = present(&state, &config, overrides);

    let metadata_view = view.metadata.zip(state.value.as_ref()).map(|(renderer, value)| {
        let metadata = FileMetadata::of_committed(value);
        match (renderer, props.custom_metadata) {
            (Renderer::Custom, Some(custom)) => custom.call(FileInputMetadataProps { metadata }),
            _ => rsx! { FileInputMetadata { metadata } },
        }
    });

    let alt = state
        .value
        .as_ref()
        .map_or_else(String::new, |value| value.name().to_owned());
    let thumbnail_view = view.thumbnail.zip(state.image.clone()).map(|(renderer, image)| {
        match (renderer, props.custom_image_thumbnail) {
            (Renderer::Custom, Some(custom)) => custom.call(ImageThumbnailProps { image, alt }),
            _ => rsx! { ImageThumbnail { image, alt } },
        }
    });

    let editing_name = state
        .temp_value
        .as_ref()
        .map_or_else(String::new, |file| file.name().to_owned());
    let editor_view = view.editor.map(|image_source| {
        // A new image mounts a fresh editor, dropping the old one's edits
        // and any finish still in flight.
        let editor_key = image_source.clone();
        rsx! {
            ImageEditor {
                key: "{editor_key}",
                image_source,
                file_name: editing_name,
                on_finish,
            }
        }
    });

    rsx! {
        div { class: "filedrop",
            label { class: "filedrop__label", r#for: "{input_id}", "{props.label}" }

            input {
                id: "{input_id}",
                r#type: "file",
                class: "filedrop__input--hidden",
                accept: props.accept.clone(),
                onchange: on_dialog_change,
            }

            DropArea {
                status: view.drop_area,
                on_drag_enter: on_region_enter,
                on_drag_leave: on_region_leave,
                on_drop: on_files_dropped,
                open_file_dialog,
            }

            {editor_view}
            {thumbnail_view}
            {metadata_view}

            if let Some(ref err) = error() {
                p { class: "filedrop__error", "{err}" }
            }
        }
    }
}
