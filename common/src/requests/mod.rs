use serde::{Deserialize, Serialize};

use crate::model::vote::VoteValue;

/// Body of `POST /favourites`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFavourite {
    pub image_id: String,
    pub sub_id: String,
}

/// Body of `POST /votes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVote {
    pub image_id: String,
    pub sub_id: String,
    pub value: VoteValue,
}

/// Acknowledgement returned by the create endpoints.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vote_carries_signed_value() {
        let body = NewVote {
            image_id: "a".to_string(),
            sub_id: "cat-app-user-1".to_string(),
            value: VoteValue::Down,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"image_id": "a", "sub_id": "cat-app-user-1", "value": -1})
        );
    }
}
