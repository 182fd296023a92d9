//! Default thumbnail view.

use dioxus::prelude::*;

/// Props for [`ImageThumbnail`] and custom thumbnail renderers.
#[derive(Props, Clone, PartialEq)]
pub struct ImageThumbnailProps {
    /// Display source of the image.
    pub image: String,
    /// Alternative text, usually the file name.
    pub alt: String,
}

#[component]
pub fn ImageThumbnail(props: ImageThumbnailProps) -> Element {
    rsx! {
        div { class: "filedrop__thumbnail",
            img { src: "{props.image}", alt: "{props.alt}" }
        }
    }
}
