//! Default metadata view for the committed file.

use dioxus::prelude::*;
use filedrop_core::FileMetadata;

/// Props for [`FileInputMetadata`] and custom metadata renderers.
#[derive(Props, Clone, PartialEq)]
pub struct FileInputMetadataProps {
    /// Description of the committed file.
    pub metadata: FileMetadata,
}

/// Shows name, extension and size of the committed file.
#[component]
pub fn FileInputMetadata(props: FileInputMetadataProps) -> Element {
    let meta = &props.metadata;
    let size = meta.display_size();

    rsx! {
        div { class: "filedrop__metadata",
            span { class: "filedrop__metadata-name", title: "{meta.name}", "{meta.filename}" }
            if let Some(ref ext) = meta.extension {
                span { class: "filedrop__metadata-extension", ".{ext}" }
            }
            span { class: "filedrop__metadata-size", "{size}" }
        }
    }
}
