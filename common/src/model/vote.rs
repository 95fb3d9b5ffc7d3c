use serde::{Deserialize, Serialize};

/// One ballot on an image. A client may cast several over time and every one
/// of them counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vote {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image_id: String,
    #[serde(default)]
    pub sub_id: Option<String>,
    /// `1` for an upvote. Anything else, including a missing or `null` value, is read as a downvote.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub value: i32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Vote {
    pub fn is_upvote(&self) -> bool {
        self.value == 1
    }
}

/// The value a user can cast. Serialized as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i32(self) -> i32 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl From<VoteValue> for i32 {
    fn from(value: VoteValue) -> Self {
        value.as_i32()
    }
}

impl TryFrom<i32> for VoteValue {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(format!("vote value must be 1 or -1, got {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_value_serializes_as_signed_integer() {
        assert_eq!(serde_json::to_string(&VoteValue::Up).unwrap(), "1");
        assert_eq!(serde_json::to_string(&VoteValue::Down).unwrap(), "-1");
        assert!(serde_json::from_str::<VoteValue>("0").is_err());
    }

    #[test]
    fn vote_with_missing_value_decodes_as_downvote() {
        let vote: Vote = serde_json::from_str(r#"{"id": 3, "image_id": "a"}"#).unwrap();
        assert_eq!(vote.value, 0);
        assert!(!vote.is_upvote());
    }

    #[test]
    fn null_value_decodes_as_downvote_without_failing_the_list() {
        let votes: Vec<Vote> = serde_json::from_str(
            r#"[{"id": 1, "image_id": "a", "value": 1}, {"id": 2, "image_id": "a", "value": null}]"#,
        )
        .unwrap();

        assert!(votes[0].is_upvote());
        assert_eq!(votes[1].value, 0);
        assert!(!votes[1].is_upvote());
    }
}
