//! The region accepting dragged files.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use filedrop_core::DropAreaStatus;

/// Props for the [`DropArea`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropAreaProps {
    /// Drag status used for styling.
    status: DropAreaStatus,
    /// Fired for every `dragenter` on the area or one of its children.
    on_drag_enter: EventHandler<()>,
    /// Fired for every `dragleave` on the area or one of its children.
    on_drag_leave: EventHandler<()>,
    /// Fired with the dropped files.
    on_drop: EventHandler<Vec<FileData>>,
    /// Opens the native file dialog.
    open_file_dialog: EventHandler<()>,
}

/// A drop zone that also opens the file dialog when clicked.
///
/// Forwards every raw enter/leave event; deduplicating nested events is
/// the job of the controller's counters.
#[component]
pub fn DropArea(props: DropAreaProps) -> Element {
    let modifier = props
        .status
        .modifier()
        .map_or(String::new(), |m| format!("filedrop__drop-area--{m}"));

    rsx! {
        div {
            class: "filedrop__drop-area {modifier}",
            role: "button",
            tabindex: "0",
            ondragenter: move |evt| {
                evt.prevent_default();
                props.on_drag_enter.call(());
            },
            ondragover: move |evt| {
                evt.prevent_default();
            },
            ondragleave: move |_| {
                props.on_drag_leave.call(());
            },
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                props.on_drop.call(evt.files());
            },
            onclick: move |_| props.open_file_dialog.call(()),
            onkeydown: move |evt: KeyboardEvent| {
                let activate = match evt.key() {
                    Key::Enter => true,
                    Key::Character(ref c) => c == " ",
                    _ => false,
                };
                if activate {
                    evt.prevent_default();
                    props.open_file_dialog.call(());
                }
            },

            p { class: "filedrop__hint",
                "Drop a file here or "
                span { class: "filedrop__browse", "browse" }
            }
        }
    }
}
