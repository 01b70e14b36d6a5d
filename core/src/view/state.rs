use crate::filter::facets::{toggle_member, FacetFilter, FacetValue};
use crate::model::{FmvFeed, GeospatialFilter, MapLayer, Track};
use crate::prelude::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Commander,
    BattleCaptain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Operator-driven view configuration. Serializable so a host can persist or
/// ship a snapshot; only [`ViewState::apply`] produces new states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub role: UserRole,
    pub theme: Theme,
    pub is_online: bool,
    pub active_layers: BTreeSet<MapLayer>,
    pub selected_track_id: Option<String>,
    pub fmv_pip_enabled: bool,
    pub active_fmv_feed: Option<String>,
    pub focus_mode: bool,
    pub zoom: f64,
    pub map_offset: Position,
    pub geospatial_filter: GeospatialFilter,
    pub filter_config: FacetFilter,
    pub search_query: String,
}

/// Typed operations on the view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ViewAction {
    ToggleLayer(MapLayer),
    ToggleFacet(FacetValue),
    SelectTrack(String),
    ClearSelection,
    SetTheme(Theme),
    ToggleTheme,
    ToggleRole,
    SetRole(UserRole),
    ToggleFocus,
    SetOnline(bool),
    SetFmvPip(bool),
    SelectFmvFeed(String),
    SetSearch(String),
    SetZoom(f64),
    Pan { dx: f64, dy: f64 },
}

impl ViewState {
    /// Opening configuration with the given first FMV feed preselected.
    pub fn initial(first_feed: Option<&str>) -> Self {
        Self {
            role: UserRole::BattleCaptain,
            theme: Theme::Dark,
            is_online: true,
            active_layers: [
                MapLayer::Friendly,
                MapLayer::Enemy,
                MapLayer::Air,
                MapLayer::Footprint,
                MapLayer::ControlMeasures,
            ]
            .into_iter()
            .collect(),
            selected_track_id: None,
            fmv_pip_enabled: true,
            active_fmv_feed: first_feed.map(str::to_string),
            focus_mode: false,
            zoom: 1.0,
            map_offset: Position::default(),
            geospatial_filter: GeospatialFilter::None,
            filter_config: FacetFilter::default(),
            search_query: String::new(),
        }
    }

    pub fn is_commander(&self) -> bool {
        self.role == UserRole::Commander
    }

    /// Pure transition. Layer and facet toggles are locked while in the
    /// commander role; role changes always clear the selection.
    pub fn apply(mut self, action: ViewAction) -> Self {
        match action {
            ViewAction::ToggleLayer(layer) => {
                if !self.is_commander() {
                    toggle_member(&mut self.active_layers, layer);
                }
            }
            ViewAction::ToggleFacet(value) => {
                if !self.is_commander() {
                    self.filter_config.toggle(value);
                }
            }
            ViewAction::SelectTrack(id) => self.selected_track_id = Some(id),
            ViewAction::ClearSelection => self.selected_track_id = None,
            ViewAction::SetTheme(theme) => self.theme = theme,
            ViewAction::ToggleTheme => self.theme = self.theme.toggled(),
            ViewAction::ToggleRole => {
                let next = match self.role {
                    UserRole::BattleCaptain => UserRole::Commander,
                    UserRole::Commander => UserRole::BattleCaptain,
                };
                return self.apply(ViewAction::SetRole(next));
            }
            ViewAction::SetRole(role) => {
                self.role = role;
                self.focus_mode = role == UserRole::Commander;
                self.selected_track_id = None;
            }
            ViewAction::ToggleFocus => {
                if !self.is_commander() {
                    self.focus_mode = !self.focus_mode;
                }
            }
            ViewAction::SetOnline(online) => self.is_online = online,
            ViewAction::SetFmvPip(enabled) => self.fmv_pip_enabled = enabled,
            ViewAction::SelectFmvFeed(id) => self.active_fmv_feed = Some(id),
            ViewAction::SetSearch(query) => self.search_query = query,
            ViewAction::SetZoom(zoom) => {
                if zoom.is_finite() && zoom > 0.0 {
                    self.zoom = zoom;
                }
            }
            ViewAction::Pan { dx, dy } => {
                self.map_offset.x += dx;
                self.map_offset.y += dy;
            }
        }
        self
    }

    /// The selected feed, or the first feed when the selection is unset or stale.
    pub fn active_feed<'a>(&self, feeds: &'a [FmvFeed]) -> Option<&'a FmvFeed> {
        self.active_fmv_feed
            .as_deref()
            .and_then(|id| feeds.iter().find(|feed| feed.id == id))
            .or_else(|| feeds.first())
    }

    /// Track flying the active feed, if any, for the HUD overlay.
    pub fn hud_track<'a>(&self, tracks: &'a [Track]) -> Option<&'a Track> {
        let id = self.active_fmv_feed.as_deref()?;
        tracks.iter().find(|track| track.id == id)
    }

    /// Selected track, regardless of whether filters currently hide it.
    pub fn selected_track<'a>(&self, tracks: &'a [Track]) -> Option<&'a Track> {
        let id = self.selected_track_id.as_deref()?;
        tracks.iter().find(|track| track.id == id)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::{fmv_feeds, initial_tracks};
    use crate::model::{TrackSource, TrackType};

    fn captain() -> ViewState {
        ViewState::initial(Some("uas-1"))
    }

    #[test]
    fn initial_state_matches_opening_picture() {
        let state = captain();
        assert_eq!(state.role, UserRole::BattleCaptain);
        assert!(state.is_online && state.fmv_pip_enabled && !state.focus_mode);
        assert!(!state.active_layers.contains(&MapLayer::Fires));
        assert_eq!(state.active_layers.len(), 5);
        assert_eq!(state.theme, Theme::Dark);
    }

    #[test]
    fn entering_commander_mode_sets_focus_and_clears_selection() {
        let state = captain()
            .apply(ViewAction::SelectTrack("f1".into()))
            .apply(ViewAction::ToggleRole);
        assert_eq!(state.role, UserRole::Commander);
        assert!(state.focus_mode);
        assert_eq!(state.selected_track_id, None);

        let back = state
            .apply(ViewAction::SelectTrack("e1".into()))
            .apply(ViewAction::ToggleRole);
        assert_eq!(back.role, UserRole::BattleCaptain);
        assert!(!back.focus_mode);
        assert_eq!(back.selected_track_id, None);
    }

    #[test]
    fn commander_cannot_toggle_layers_facets_or_focus() {
        let commander = captain().apply(ViewAction::ToggleRole);
        let after = commander
            .clone()
            .apply(ViewAction::ToggleLayer(MapLayer::Air))
            .apply(ViewAction::ToggleFacet(FacetValue::Type(TrackType::Enemy)))
            .apply(ViewAction::ToggleFocus);
        assert_eq!(after, commander);
    }

    #[test]
    fn captain_toggles_are_symmetric() {
        let start = captain();
        let once = start
            .clone()
            .apply(ViewAction::ToggleLayer(MapLayer::Fires))
            .apply(ViewAction::ToggleFacet(FacetValue::Source(TrackSource::Ais)));
        assert!(once.active_layers.contains(&MapLayer::Fires));
        assert!(once.filter_config.sources.contains(&TrackSource::Ais));

        let twice = once
            .apply(ViewAction::ToggleLayer(MapLayer::Fires))
            .apply(ViewAction::ToggleFacet(FacetValue::Source(TrackSource::Ais)));
        assert_eq!(twice, start);
    }

    #[test]
    fn theme_zoom_and_pan_update() {
        let state = captain()
            .apply(ViewAction::ToggleTheme)
            .apply(ViewAction::SetZoom(2.5))
            .apply(ViewAction::SetZoom(-1.0))
            .apply(ViewAction::Pan { dx: 10.0, dy: -5.0 });
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.zoom, 2.5);
        assert_eq!(state.map_offset, Position::new(10.0, -5.0));
    }

    #[test]
    fn active_feed_falls_back_to_first() {
        let feeds = fmv_feeds();
        let state = captain().apply(ViewAction::SelectFmvFeed("watchman-01".into()));
        assert_eq!(state.active_feed(&feeds).unwrap().id, "watchman-01");

        let unknown = captain().apply(ViewAction::SelectFmvFeed("missing".into()));
        assert_eq!(unknown.active_feed(&feeds).unwrap().id, "uas-1");
    }

    #[test]
    fn hud_track_follows_feed_id() {
        let tracks = initial_tracks(0);
        let state = captain();
        assert_eq!(state.hud_track(&tracks).unwrap().callsign, "GRIFFIN 01");

        let ground_camera = state.apply(ViewAction::SelectFmvFeed("watchman-01".into()));
        assert!(ground_camera.hud_track(&tracks).is_none());
    }

    #[test]
    fn action_serializes_with_tag() {
        let json = serde_json::to_value(ViewAction::ToggleLayer(MapLayer::Air)).unwrap();
        assert_eq!(json["action"], "toggle_layer");
        assert_eq!(json["value"], "air");
    }
}
