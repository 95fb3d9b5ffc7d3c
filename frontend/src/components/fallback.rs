//! Last-resort screen for unrecoverable failures.
//!
//! A panic anywhere in the client replaces the page with a generic message and
//! a reload button. Nothing is retried automatically.

use log::error;

use super::helpers::escape_html;

pub fn install_panic_fallback() {
    std::panic::set_hook(Box::new(|info| {
        error!("Unrecoverable error: {}", info);
        render_fallback(&info.to_string());
    }));
}

fn render_fallback(detail: &str) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    body.set_inner_html(&format!(
        r#"<div class="fallback">
             <div class="fallback-card">
               <div class="fallback-icon">⚠️</div>
               <h1>Oops! Something went wrong</h1>
               <p>We encountered an unexpected error. Please try refreshing the page.</p>
               <p class="fallback-detail">{}</p>
               <button class="btn btn-primary" onclick="window.location.reload()">Refresh Page</button>
             </div>
           </div>"#,
        escape_html(detail)
    ));
}
