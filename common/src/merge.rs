//! Combines the three independently fetched collections into the view model
//! the gallery renders.
//!
//! The merge is a pure function over borrowed slices: it builds one index of
//! favourites and one tally of votes keyed by image id, then walks the images
//! once in their original order. Cost is `O(images + favourites + votes)`.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::model::card::CatCard;
use crate::model::favourite::Favourite;
use crate::model::image::Image;
use crate::model::vote::Vote;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    upvotes: u32,
    downvotes: u32,
}

/// Produces one [`CatCard`] per image, in the order of `images`.
///
/// - An image is favourited when at least one favourite references it. When
///   several do, the earliest by `created_at` is exposed (see
///   [`favourite_precedence`]).
/// - Every vote counts as a separate ballot; `value == 1` is an upvote and any
///   other value is a downvote.
/// - Images without favourites or votes yield a zero-score, non-favourited card.
pub fn merge_cat_data(images: &[Image], favourites: &[Favourite], votes: &[Vote]) -> Vec<CatCard> {
    let favourites_by_image = index_favourites(favourites);
    let tallies = tally_votes(votes);

    images
        .iter()
        .map(|image| {
            let tally = tallies.get(image.id.as_str()).copied().unwrap_or_default();
            let favourite = favourites_by_image.get(image.id.as_str());

            CatCard {
                image: image.clone(),
                is_favourited: favourite.is_some(),
                favourite_id: favourite.and_then(|fav| fav.id),
                upvotes: tally.upvotes,
                downvotes: tally.downvotes,
                score: i64::from(tally.upvotes) - i64::from(tally.downvotes),
            }
        })
        .collect()
}

fn index_favourites(favourites: &[Favourite]) -> HashMap<&str, &Favourite> {
    let mut index: HashMap<&str, &Favourite> = HashMap::with_capacity(favourites.len());
    for favourite in favourites {
        index
            .entry(favourite.image_id.as_str())
            .and_modify(|current| {
                if favourite_precedence(favourite, current) == Ordering::Less {
                    *current = favourite;
                }
            })
            .or_insert(favourite);
    }
    index
}

fn tally_votes(votes: &[Vote]) -> HashMap<&str, Tally> {
    votes.iter().fold(HashMap::new(), |mut tallies, vote| {
        let tally: &mut Tally = tallies.entry(vote.image_id.as_str()).or_default();
        if vote.is_upvote() {
            tally.upvotes += 1;
        } else {
            tally.downvotes += 1;
        }
        tallies
    })
}

/// Orders duplicate favourites of one image; the smallest one is exposed.
///
/// Earliest parseable `created_at` first, records without a timestamp after
/// those, then the lowest id, with id-less records last. The result does not
/// depend on the order the remote API returned the records in.
pub fn favourite_precedence(a: &Favourite, b: &Favourite) -> Ordering {
    let created = |fav: &Favourite| -> Option<DateTime<FixedOffset>> {
        fav.created_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    };

    none_last(created(a), created(b)).then_with(|| none_last(a.id, b.id))
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
