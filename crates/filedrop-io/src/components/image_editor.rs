//! Image editor shown while an image is held for editing.
//!
//! Rotation and flips are previewed with a CSS transform. Confirming
//! fetches the preview bytes, applies the edits off the `<img>` and
//! reports an [`EditedImage`]. When nothing was changed the original
//! bytes and preview source are handed back untouched.

use dioxus::prelude::*;
use filedrop_core::{EditOps, EditedImage, png_file_name};

use crate::preview::{self, PreviewError};

/// Props for the [`ImageEditor`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageEditorProps {
    /// Preview source of the image being edited.
    image_source: String,
    /// Name of the file being edited.
    file_name: String,
    /// Called once with the edited result.
    on_finish: EventHandler<EditedImage>,
}

/// Errors surfaced inside the editor.
#[derive(Debug, thiserror::Error)]
enum FinishError {
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error(transparent)]
    Edit(#[from] filedrop_core::EditError),
}

#[allow(clippy::future_not_send)] // WASM is single-threaded
async fn finish(
    source: String,
    file_name: String,
    ops: EditOps,
) -> Result<EditedImage, FinishError> {
    let bytes = preview::fetch_bytes(&source).await?;

    if ops.is_identity() {
        return Ok(EditedImage {
            mime_type: preview::guess_image_mime(&file_name).to_owned(),
            name: file_name,
            bytes,
            source,
        });
    }

    let png = ops.apply(&bytes)?;
    let url = preview::bytes_to_blob_url(&png, "image/png")?;
    Ok(EditedImage {
        name: png_file_name(&file_name),
        mime_type: "image/png".to_owned(),
        bytes: png,
        source: url,
    })
}

/// Rotate/flip editor with a confirm button.
#[component]
pub fn ImageEditor(props: ImageEditorProps) -> Element {
    let mut ops = use_signal(EditOps::default);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let transform = ops().css_transform();
    let flipped_h = ops().flip_horizontal;
    let flipped_v = ops().flip_vertical;

    let image_source = props.image_source.clone();
    let file_name = props.file_name.clone();
    let on_finish = props.on_finish;
    let confirm = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        let source = image_source.clone();
        let file_name = file_name.clone();
        let edits = ops();
        spawn(async move {
            // Yield so the "Applying..." state paints before decoding.
            gloo_timers::future::TimeoutFuture::new(0).await;

            match finish(source, file_name, edits).await {
                Ok(result) => on_finish.call(result),
                Err(e) => {
                    log::warn!("image edit failed: {e}");
                    error.set(Some(format!("{e}")));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "filedrop__editor",
            div { class: "filedrop__editor-canvas",
                img {
                    src: "{props.image_source}",
                    alt: "{props.file_name}",
                    style: "transform: {transform}",
                }
            }

            div { class: "filedrop__editor-tools",
                button {
                    r#type: "button",
                    aria_label: "Rotate left",
                    onclick: move |_| ops.write().rotate_counter_clockwise(),
                    "⟲"
                }
                button {
                    r#type: "button",
                    aria_label: "Rotate right",
                    onclick: move |_| ops.write().rotate_clockwise(),
                    "⟳"
                }
                button {
                    r#type: "button",
                    aria_label: "Flip horizontally",
                    "aria-pressed": "{flipped_h}",
                    onclick: move |_| ops.write().toggle_flip_horizontal(),
                    "⇆"
                }
                button {
                    r#type: "button",
                    aria_label: "Flip vertically",
                    "aria-pressed": "{flipped_v}",
                    onclick: move |_| ops.write().toggle_flip_vertical(),
                    "⇅"
                }
                button {
                    r#type: "button",
                    class: "filedrop__editor-confirm",
                    disabled: busy(),
                    onclick: confirm,
                    if busy() { "Applying..." } else { "Use image" }
                }
            }

            if let Some(ref err) = error() {
                p { class: "filedrop__error", "{err}" }
            }
        }
    }
}
