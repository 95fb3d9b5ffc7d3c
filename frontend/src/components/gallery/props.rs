use common::mutation::Route;
use yew::prelude::*;

use crate::services::Services;

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryProps {
    pub services: Services,
    /// Used by the empty state to send the user to the upload form.
    pub on_navigate: Callback<Route>,
}
