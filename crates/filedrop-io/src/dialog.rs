//! Native file dialog via a hidden `<input type="file">`.
//!
//! Browsers only open the picker from a click on a file input, so the
//! widget renders a visually hidden input and clicks it on demand.

use std::sync::atomic::{AtomicU64, Ordering};

use wasm_bindgen::JsCast;

static NEXT_INPUT: AtomicU64 = AtomicU64::new(0);

/// A document-unique id for one widget's hidden input.
#[must_use]
pub fn next_input_id() -> String {
    let n = NEXT_INPUT.fetch_add(1, Ordering::Relaxed);
    format!("filedrop-input-{n}")
}

fn find_input(input_id: &str) -> Option<web_sys::HtmlInputElement> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document object");
        return None;
    };
    let Some(element) = document.get_element_by_id(input_id) else {
        log::error!("File input #{input_id} is not mounted");
        return None;
    };
    match element.dyn_into::<web_sys::HtmlInputElement>() {
        Ok(input) => Some(input),
        Err(_) => {
            log::error!("#{input_id} is not an input element");
            None
        }
    }
}

/// Open the native file dialog by clicking the hidden input.
pub fn open_file_dialog(input_id: &str) {
    if let Some(input) = find_input(input_id) {
        log::debug!("opening file dialog for #{input_id}");
        input.click();
    }
}

/// Clear the input's selection so picking the same file again still
/// fires `change`.
pub fn reset_input(input_id: &str) {
    if let Some(input) = find_input(input_id) {
        input.set_value("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_ids_are_unique() {
        let a = next_input_id();
        let b = next_input_id();
        assert_ne!(a, b);
        assert!(a.starts_with("filedrop-input-"));
    }
}
