//! Transient notifications rendered straight into the document body.

use common::mutation::{Notice, NoticeLevel, Notifier};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::helpers::escape_html;

const SUCCESS_MS: u32 = 3000;
const ERROR_MS: u32 = 4000;

pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        show_toast(&notice);
    }
}

/// Displays `notice` at the top-right corner and removes it after a few
/// seconds; errors stay a little longer.
pub fn show_toast(notice: &Notice) {
    let (accent, duration) = match notice.level {
        NoticeLevel::Success => ("#4ade80", SUCCESS_MS),
        NoticeLevel::Error => ("#ef4444", ERROR_MS),
    };

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_inner_html(&escape_html(&notice.message));
                toast.set_attribute("role", "status").ok();
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("top", "20px").ok();
                style.set_property("right", "20px").ok();
                style.set_property("background", "#363636").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("border-left", &format!("4px solid {}", accent)).ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "system-ui, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(duration).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
