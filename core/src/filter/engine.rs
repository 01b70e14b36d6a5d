use crate::filter::facets::FacetFilter;
use crate::model::{MapLayer, Track};
use std::collections::BTreeSet;

/// Returns the tracks that pass every inclusion rule, in their original order.
///
/// Rules: the category's layer (if it has one) must be active; category,
/// source, and confidence must be allowed by `facets`; a non-empty `query`
/// must occur in the callsign, ignoring case.
pub fn visible<'a>(
    tracks: &'a [Track],
    active_layers: &BTreeSet<MapLayer>,
    facets: &FacetFilter,
    query: &str,
) -> Vec<&'a Track> {
    let needle = query.to_lowercase();
    tracks
        .iter()
        .filter(|track| is_visible(track, active_layers, facets, &needle))
        .collect()
}

fn is_visible(
    track: &Track,
    active_layers: &BTreeSet<MapLayer>,
    facets: &FacetFilter,
    needle: &str,
) -> bool {
    if let Some(layer) = track.track_type.layer() {
        if !active_layers.contains(&layer) {
            return false;
        }
    }

    facets.types.contains(&track.track_type)
        && facets.sources.contains(&track.source)
        && facets.confidences.contains(&track.confidence)
        && (needle.is_empty() || track.callsign.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::facets::FacetValue;
    use crate::model::seed::initial_tracks;
    use crate::model::{TrackConfidence, TrackSource, TrackType};
    use crate::prelude::Position;

    fn all_layers() -> BTreeSet<MapLayer> {
        MapLayer::ALL.into_iter().collect()
    }

    fn ids(tracks: Vec<&Track>) -> Vec<&str> {
        tracks.into_iter().map(|t| t.id.as_str()).collect()
    }

    fn contact(id: &str, track_type: TrackType) -> Track {
        Track::new(
            id,
            id.to_uppercase(),
            "contact",
            track_type,
            TrackSource::Tak,
            TrackConfidence::High,
            Position::new(0.0, 0.0),
            0,
            1_000,
            2_000,
        )
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(visible(&[], &all_layers(), &FacetFilter::default(), "ghost").is_empty());
    }

    #[test]
    fn inactive_layer_excludes_even_with_permissive_facets() {
        let tracks = initial_tracks(0);
        let mut layers = all_layers();
        layers.remove(&MapLayer::Air);
        let result = visible(&tracks, &layers, &FacetFilter::permissive(), "");
        assert!(result.iter().all(|t| t.track_type != TrackType::Air));
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn unmapped_categories_ignore_layer_toggles() {
        let tracks = vec![contact("n1", TrackType::Neutral), contact("u1", TrackType::Unknown)];
        let result = visible(&tracks, &BTreeSet::new(), &FacetFilter::permissive(), "");
        assert_eq!(ids(result), vec!["n1", "u1"]);
    }

    #[test]
    fn each_facet_excludes_independently() {
        let tracks = initial_tracks(0);
        let layers = all_layers();

        let mut facets = FacetFilter::default();
        facets.toggle(FacetValue::Source(TrackSource::Manual));
        assert_eq!(
            ids(visible(&tracks, &layers, &facets, "")),
            vec!["uas-1", "uas-2", "f1", "f2", "f3"]
        );

        let mut facets = FacetFilter::default();
        facets.toggle(FacetValue::Confidence(TrackConfidence::Low));
        assert!(!ids(visible(&tracks, &layers, &facets, "")).contains(&"e2"));

        let mut facets = FacetFilter::default();
        facets.toggle(FacetValue::Type(TrackType::Friendly));
        assert_eq!(
            ids(visible(&tracks, &layers, &facets, "")),
            vec!["uas-1", "uas-2", "e1", "e2"]
        );
    }

    #[test]
    fn default_facets_hide_unknown_category() {
        let tracks = vec![contact("n1", TrackType::Neutral), contact("u1", TrackType::Unknown)];
        let result = visible(&tracks, &all_layers(), &FacetFilter::default(), "");
        assert_eq!(ids(result), vec!["n1"]);
    }

    #[test]
    fn query_matches_callsign_case_insensitively() {
        let tracks = initial_tracks(0);
        let result = visible(&tracks, &all_layers(), &FacetFilter::default(), "griFFin");
        assert_eq!(ids(result), vec!["uas-1", "uas-2"]);

        let result = visible(&tracks, &all_layers(), &FacetFilter::default(), "reaper");
        assert!(result.is_empty(), "labels are not searched");
    }

    #[test]
    fn output_preserves_input_order() {
        let mut tracks = initial_tracks(0);
        tracks.reverse();
        let result = visible(&tracks, &all_layers(), &FacetFilter::default(), "");
        assert_eq!(
            ids(result),
            vec!["e2", "e1", "f3", "f2", "f1", "uas-2", "uas-1"]
        );
    }
}
