pub enum Msg {
    OpenFileDialog,
    FileSelected(web_sys::File),
    DragOver(bool),
    ClearSelection,
    Submit,
    /// Carries the message shown under the form, or `None` when nothing
    /// should be shown (the click was ignored because an upload is running).
    UploadFailed(Option<String>),
    Cancel,
}
