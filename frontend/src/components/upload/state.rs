use gloo_file::ObjectUrl;
use yew::NodeRef;

use crate::gateway::SelectedFile;

#[derive(Default)]
pub struct UploadComponent {
    pub selected: Option<SelectedFile>,
    /// Blob URL for the preview; revoked when dropped.
    pub preview: Option<ObjectUrl>,
    /// Client-side rejection of the selected file.
    pub validation_error: Option<String>,
    /// Failure reported by the API for the last attempt.
    pub upload_error: Option<String>,
    pub uploading: bool,
    pub dragging: bool,
    pub file_input_ref: NodeRef,
}
