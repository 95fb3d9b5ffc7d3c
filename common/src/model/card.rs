use serde::Serialize;

use crate::model::image::Image;

/// View record for one gallery item: the image plus its favourite and vote
/// state for the current client.
///
/// Built fresh by [`crate::merge::merge_cat_data`] on every refresh and never
/// edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatCard {
    pub image: Image,
    pub is_favourited: bool,
    /// Id of the favourite record to delete when un-favouriting. `None` when
    /// the image is not favourited or the record came back without an id.
    pub favourite_id: Option<u64>,
    pub upvotes: u32,
    pub downvotes: u32,
    /// `upvotes - downvotes`, unclamped.
    pub score: i64,
}

impl CatCard {
    pub fn id(&self) -> &str {
        &self.image.id
    }

    /// Score as displayed on a card: positive values carry an explicit `+`.
    pub fn score_label(&self) -> String {
        if self.score > 0 {
            format!("+{}", self.score)
        } else {
            self.score.to_string()
        }
    }
}
