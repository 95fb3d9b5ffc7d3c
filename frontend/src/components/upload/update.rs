use common::mutation::{validate_upload, Route, UPLOAD_FAILED};
use common::GalleryError;
use gloo_file::{Blob, ObjectUrl};
use log::{debug, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::UploadComponent;
use crate::gateway::SelectedFile;

/// Returns `true` when the view should re-render.
pub fn update(component: &mut UploadComponent, ctx: &Context<UploadComponent>, msg: Msg) -> bool {
    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            if component.uploading {
                return false;
            }
            let selected = SelectedFile(file);
            component.upload_error = None;
            component.dragging = false;
            match validate_upload(&selected, ctx.props().services.max_upload_bytes) {
                Ok(()) => {
                    component.validation_error = None;
                    component.preview = Some(ObjectUrl::from(Blob::from(selected.0.clone())));
                    component.selected = Some(selected);
                }
                Err(rejection) => {
                    info!("Rejected {}: {}", selected.0.name(), rejection);
                    component.validation_error = Some(rejection.to_string());
                    component.preview = None;
                    component.selected = None;
                }
            }
            true
        }
        Msg::DragOver(dragging) => {
            let changed = component.dragging != dragging;
            component.dragging = dragging;
            changed
        }
        Msg::ClearSelection => {
            clear(component);
            true
        }
        Msg::Submit => {
            let Some(file) = component.selected.clone() else {
                return false;
            };
            if component.uploading {
                return false;
            }
            component.uploading = true;
            component.upload_error = None;

            let mutations = ctx.props().services.mutations.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                // Success navigates away, which unmounts this page.
                match mutations.upload(&file).await {
                    Ok(uploaded) => debug!("Uploaded image {}", uploaded.id),
                    Err(GalleryError::Busy(_)) => link.send_message(Msg::UploadFailed(None)),
                    Err(GalleryError::Validation(rejection)) => {
                        link.send_message(Msg::UploadFailed(Some(rejection.to_string())))
                    }
                    Err(e) => link.send_message(Msg::UploadFailed(Some(e.user_message(UPLOAD_FAILED)))),
                }
            });
            true
        }
        Msg::UploadFailed(message) => {
            component.uploading = false;
            component.upload_error = message;
            true
        }
        Msg::Cancel => {
            clear(component);
            ctx.props().on_navigate.emit(Route::Gallery);
            false
        }
    }
}

/// Drops the selection and its preview URL; the file input is reset so the
/// same file can be picked again.
fn clear(component: &mut UploadComponent) {
    component.selected = None;
    component.preview = None;
    component.validation_error = None;
    component.upload_error = None;
    if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
        input.set_value("");
    }
}
