use dioxus::prelude::*;
use filedrop_core::{Committed, FileInputConfig, WidgetState, format_size};
use filedrop_io::components::STYLESHEET;
use filedrop_io::{FileInput, FileInputMetadataProps, PickedFile};

/// Widget configuration baked into the demo. Missing keys fall back to
/// [`FileInputConfig::default`].
const CONFIG_JSON: &str = include_str!("../assets/config.json");

fn main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
    dioxus::launch(app);
}

fn load_config() -> FileInputConfig {
    match serde_json::from_str(CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("invalid demo config, using defaults: {e}");
            FileInputConfig::default()
        }
    }
}

fn describe(value: &Committed<PickedFile>) -> String {
    let kind = match value {
        Committed::File(_) => "file",
        Committed::Edited(_) => "edited image",
    };
    format!("{} ({kind}, {})", value.name(), format_size(value.size()))
}

/// What the demo shows about the cover widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CoverStatus {
    /// A drag is over the drop area.
    dragging: bool,
    /// Description of the last committed value.
    last: Option<String>,
}

impl CoverStatus {
    const fn drag_entered(&mut self) {
        self.dragging = true;
    }

    const fn drag_left(&mut self) {
        self.dragging = false;
    }

    /// A drop ends the drag without a `DragLeft`, so committing clears
    /// `dragging` too.
    fn committed(&mut self, text: String) {
        self.dragging = false;
        self.last = Some(text);
    }
}

/// Root application component.
///
/// Mounts one widget with the default renderers and one with a custom
/// metadata renderer, and shows what each last committed.
fn app() -> Element {
    let config = use_hook(load_config);
    let mut cover = use_signal(CoverStatus::default);
    let mut last_attachment = use_signal(|| Option::<String>::None);

    let on_drag_enter = move |state: WidgetState<PickedFile>| {
        log::debug!("drag entered (document drags: {})", state.entered_in_document);
        cover.write().drag_entered();
    };
    let on_drag_leave = move |_state: WidgetState<PickedFile>| {
        cover.write().drag_left();
    };

    let compact_metadata = Callback::new(|props: FileInputMetadataProps| {
        let meta = props.metadata;
        let size = meta.display_size();
        rsx! {
            p { class: "filedrop__metadata", "Attached {meta.name} · {size}" }
        }
    });

    rsx! {
        style { dangerous_inner_html: STYLESHEET }

        main { class: "demo",
            h1 { "filedrop" }

            section {
                FileInput {
                    label: config.label.clone(),
                    display_metadata: config.display_metadata,
                    display_image_thumbnail: config.display_image_thumbnail,
                    image_extensions: config.image_extensions.clone(),
                    accept: "image/*",
                    on_drag_enter,
                    on_drag_leave,
                    on_drop: move |value: Committed<PickedFile>| {
                        let text = describe(&value);
                        log::info!("cover committed: {text}");
                        cover.write().committed(text);
                    },
                }
                if cover().dragging {
                    p { class: "demo__status", "Release to drop" }
                }
                if let Some(ref text) = cover().last {
                    p { class: "demo__status", "Committed {text}" }
                }
            }

            section {
                FileInput {
                    label: "Attachment",
                    custom_metadata: compact_metadata,
                    on_drop: move |value: Committed<PickedFile>| {
                        last_attachment.set(Some(describe(&value)));
                    },
                }
                if let Some(ref text) = last_attachment() {
                    p { class: "demo__status", "Committed {text}" }
                }
            }
        }
    }
}
