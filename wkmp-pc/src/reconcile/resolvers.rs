//! Field precedence tables
//!
//! Each field is resolved by walking an ordered table of resolvers and
//! taking the first value found. Reordering a table changes precedence
//! and nothing else.

use super::indices::TitleIndex;
use crate::models::track::Track;
use crate::sources::BuiltinSource;

/// What a single resolver sees: the base track and the album indices
pub struct ResolveInput<'a> {
    pub track: &'a Track,
    /// Normalized title of the base track ("" when it has none)
    pub key: &'a str,
    pub index: &'a TitleIndex<'a>,
}

pub type Resolver<T> = fn(&ResolveInput<'_>) -> Option<T>;

/// Walk a table until a resolver yields a value
pub fn first_resolved<T>(table: &[Resolver<T>], input: &ResolveInput<'_>) -> Option<T> {
    table.iter().find_map(|resolve| resolve(input))
}

/// Where a resolved rating came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOrigin {
    Explicit,
    Consolidated,
    Community,
    AcclaimList,
}

impl RatingOrigin {
    /// Source to credit when the rating was derived rather than supplied
    pub fn derived_from(self) -> Option<BuiltinSource> {
        match self {
            RatingOrigin::Explicit => None,
            RatingOrigin::Consolidated => Some(BuiltinSource::Consolidated),
            RatingOrigin::Community => Some(BuiltinSource::Community),
            RatingOrigin::AcclaimList => Some(BuiltinSource::AcclaimList),
        }
    }
}

pub const CANONICAL_RANK: &[Resolver<u32>] =
    &[explicit_canonical_rank, explicit_rank, consolidated_final_position];

pub const RATING: &[Resolver<(f64, RatingOrigin)>] = &[
    explicit_rating,
    consolidated_rating,
    community_rating,
    acclaim_list_rating,
];

/// Falls back to the resolved rating, applied by the caller
pub const ACCLAIM_SCORE: &[Resolver<f64>] = &[explicit_acclaim_score, consolidated_score];

pub const DURATION: &[Resolver<u32>] = &[explicit_duration, indexed_duration];

/// Falls back to a generated id, applied by the caller
pub const ID: &[Resolver<String>] = &[explicit_id, indexed_id];

fn explicit_canonical_rank(i: &ResolveInput<'_>) -> Option<u32> {
    i.track.canonical_rank
}

fn explicit_rank(i: &ResolveInput<'_>) -> Option<u32> {
    i.track.rank
}

fn consolidated_final_position(i: &ResolveInput<'_>) -> Option<u32> {
    i.index.consolidated(i.key)?.final_position
}

fn explicit_rating(i: &ResolveInput<'_>) -> Option<(f64, RatingOrigin)> {
    finite(i.track.rating).map(|r| (r, RatingOrigin::Explicit))
}

fn consolidated_rating(i: &ResolveInput<'_>) -> Option<(f64, RatingOrigin)> {
    finite(i.index.consolidated(i.key)?.rating).map(|r| (r, RatingOrigin::Consolidated))
}

fn community_rating(i: &ResolveInput<'_>) -> Option<(f64, RatingOrigin)> {
    finite(i.index.evidence(i.key)?.rating).map(|r| (r, RatingOrigin::Community))
}

fn acclaim_list_rating(i: &ResolveInput<'_>) -> Option<(f64, RatingOrigin)> {
    finite(i.index.acclaim_rating(i.key)).map(|r| (r, RatingOrigin::AcclaimList))
}

fn explicit_acclaim_score(i: &ResolveInput<'_>) -> Option<f64> {
    finite(i.track.acclaim_score)
}

fn consolidated_score(i: &ResolveInput<'_>) -> Option<f64> {
    finite(i.index.consolidated(i.key)?.normalized_score)
}

fn explicit_duration(i: &ResolveInput<'_>) -> Option<u32> {
    i.track.duration
}

fn indexed_duration(i: &ResolveInput<'_>) -> Option<u32> {
    i.index.track_hint(i.key)?.duration
}

fn explicit_id(i: &ResolveInput<'_>) -> Option<String> {
    non_blank(i.track.id.as_deref())
}

fn indexed_id(i: &ResolveInput<'_>) -> Option<String> {
    non_blank(i.index.track_hint(i.key)?.id.as_deref())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::album::{Album, ConsolidatedEntry, EvidenceEntry};

    fn album() -> Album {
        Album {
            ranking_consolidated: vec![ConsolidatedEntry {
                track_title: Some("Come Together".to_string()),
                final_position: Some(3),
                rating: Some(8.0),
                normalized_score: Some(0.9),
                ..Default::default()
            }],
            best_ever_evidence: vec![EvidenceEntry {
                track_title: Some("Something".to_string()),
                rating: Some(91.0),
            }],
            tracks: vec![Track {
                id: Some("trk-7".to_string()),
                title: Some("Come Together".to_string()),
                duration: Some(259),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_values_win() {
        let album = album();
        let index = TitleIndex::build(&album);
        let track = Track {
            rating: Some(2.0),
            canonical_rank: Some(9),
            rank: Some(1),
            ..Default::default()
        };
        let input = ResolveInput {
            track: &track,
            key: "come together",
            index: &index,
        };

        assert_eq!(first_resolved(CANONICAL_RANK, &input), Some(9));
        assert_eq!(
            first_resolved(RATING, &input),
            Some((2.0, RatingOrigin::Explicit))
        );
    }

    #[test]
    fn test_tables_fall_through_in_order() {
        let album = album();
        let index = TitleIndex::build(&album);
        let track = Track::default();
        let input = ResolveInput {
            track: &track,
            key: "come together",
            index: &index,
        };

        assert_eq!(first_resolved(CANONICAL_RANK, &input), Some(3));
        assert_eq!(
            first_resolved(RATING, &input),
            Some((8.0, RatingOrigin::Consolidated))
        );
        assert_eq!(first_resolved(ACCLAIM_SCORE, &input), Some(0.9));
        assert_eq!(first_resolved(DURATION, &input), Some(259));
        assert_eq!(first_resolved(ID, &input).as_deref(), Some("trk-7"));
    }

    #[test]
    fn test_community_rating_and_unresolved_fields() {
        let album = album();
        let index = TitleIndex::build(&album);
        let track = Track {
            rating: Some(f64::NAN),
            id: Some("   ".to_string()),
            ..Default::default()
        };
        let input = ResolveInput {
            track: &track,
            key: "something",
            index: &index,
        };

        assert_eq!(
            first_resolved(RATING, &input),
            Some((91.0, RatingOrigin::Community))
        );
        assert_eq!(first_resolved(CANONICAL_RANK, &input), None);
        assert_eq!(first_resolved(ID, &input), None);
        assert_eq!(RatingOrigin::Community.derived_from(), Some(BuiltinSource::Community));
        assert_eq!(RatingOrigin::Explicit.derived_from(), None);
    }
}
