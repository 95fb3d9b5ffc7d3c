use yew::prelude::*;

use super::messages::Msg;
use super::state::UploadComponent;
use crate::components::helpers::{format_file_size, format_mib};

pub fn view(component: &UploadComponent, ctx: &Context<UploadComponent>) -> Html {
    let link = ctx.link();
    let max_upload_bytes = ctx.props().services.max_upload_bytes;

    let onchange = link.batch_callback(|e: Event| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(Msg::FileSelected)
    });
    let ondragover = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::DragOver(true)
    });
    let ondragleave = link.callback(|_: DragEvent| Msg::DragOver(false));
    let ondrop = link.batch_callback(|e: DragEvent| {
        e.prevent_default();
        let file = e
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        match file {
            Some(file) => vec![Msg::FileSelected(file)],
            None => vec![Msg::DragOver(false)],
        }
    });

    let can_submit = component.selected.is_some() && !component.uploading;

    html! {
        <div class="upload-page">
            <h1 class="page-title">{"Upload Cat Image"}</h1>
            <p class="page-subtitle">{"Share your favorite cat photo with the world"}</p>

            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="image/jpeg,image/png,image/gif,image/webp"
                class="hidden-input"
                {onchange}
            />

            {
                match (&component.selected, &component.preview) {
                    (Some(file), Some(preview)) => html! {
                        <div class="preview">
                            <img src={preview.to_string()} alt="Selected cat" />
                            <div class="preview-meta">
                                <span class="file-name">{ file.0.name() }</span>
                                <span class="file-size">{ format_file_size(file.0.size() as u64) }</span>
                            </div>
                            if !component.uploading {
                                <button class="link-btn" onclick={link.callback(|_| Msg::ClearSelection)}>
                                    {"Choose a different image"}
                                </button>
                            }
                        </div>
                    },
                    _ => html! {
                        <div
                            class={classes!("dropzone", component.dragging.then_some("dragging"))}
                            onclick={link.callback(|_| Msg::OpenFileDialog)}
                            {ondragover}
                            {ondragleave}
                            {ondrop}
                        >
                            <div class="dropzone-icon">{"📷"}</div>
                            <p>{"Click to choose an image or drop it here"}</p>
                            <p class="hint">
                                { format!("JPEG, PNG, GIF or WebP, up to {}", format_mib(max_upload_bytes)) }
                            </p>
                        </div>
                    },
                }
            }

            if let Some(message) = &component.validation_error {
                <p class="form-error" role="alert">{ message.clone() }</p>
            }
            if let Some(message) = &component.upload_error {
                <p class="form-error" role="alert">{ message.clone() }</p>
            }

            <div class="form-actions">
                <button
                    class="btn btn-secondary"
                    disabled={component.uploading}
                    onclick={link.callback(|_| Msg::Cancel)}
                >
                    {"Cancel"}
                </button>
                <button
                    class="btn btn-primary"
                    disabled={!can_submit}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    if component.uploading {
                        <span class="spinner small"></span>{"Uploading..."}
                    } else {
                        {"Upload Cat"}
                    }
                </button>
            </div>
        </div>
    }
}
