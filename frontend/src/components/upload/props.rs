use common::mutation::Route;
use yew::prelude::*;

use crate::services::Services;

#[derive(Properties, PartialEq, Clone)]
pub struct UploadProps {
    pub services: Services,
    pub on_navigate: Callback<Route>,
}
