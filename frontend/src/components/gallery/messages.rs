use common::model::vote::VoteValue;

pub enum Msg {
    /// A cache listener fired: re-derive the view, refetch what was invalidated.
    CacheChanged,
    /// Window regained focus: refetch stale collections.
    Refocused,
    Retry,
    ToggleFavourite {
        image_id: String,
        is_favourited: bool,
        favourite_id: Option<u64>,
    },
    Vote {
        image_id: String,
        value: VoteValue,
    },
    /// A favourite or vote mutation reached a terminal state.
    MutationSettled,
}
