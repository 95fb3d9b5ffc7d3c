pub mod card;
pub mod empty_state;
pub mod fallback;
pub mod gallery;
pub mod helpers;
pub mod layout;
pub mod skeleton;
pub mod toast;
pub mod upload;
