use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace, warn};

use crate::{
    view::path::{decode, encode},
    Converter, GeoCoord, Imagery, LocalCoord, ViewConfig,
};

/// The rendering engine, as seen by the controller.
pub trait MapView {
    /// Current view center, if the view has one yet.
    fn center(&self) -> Option<LocalCoord>;
    fn set_center(&mut self, center: LocalCoord);
    fn animate_zoom(&mut self, zoom: f64, duration: Duration);
    fn set_imagery(&mut self, imagery: Imagery);
}

/// The browser location, or anything standing in for it.
pub trait UrlHistory {
    /// Current path, including the leading slash.
    fn path(&self) -> String;
    /// Replaces the current path without adding a history entry or
    /// reloading.
    fn replace_path(&mut self, path: &str);
}

/// Free-text place lookup returning the best match, if any.
#[async_trait]
pub trait PlaceSearch {
    async fn search(&self, query: &str) -> Option<GeoCoord>;
}

/// Keeps the map center and the URL path in step.
///
/// The host wires [`ViewController::on_settled`] to the engine's
/// move-end event and calls [`ViewController::restore_from_url`] once after
/// creating the map with [`ViewConfig`]'s defaults.
pub struct ViewController<'c, V, H> {
    converter: &'c Converter,
    view: V,
    history: H,
    config: ViewConfig,
    imagery: Imagery,
}

impl<'c, V, H> ViewController<'c, V, H>
where
    V: MapView,
    H: UrlHistory,
{
    pub fn new(converter: &'c Converter, view: V, history: H, config: ViewConfig) -> Self {
        let imagery = config.imagery;
        Self {
            converter,
            view,
            history,
            config,
            imagery,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn imagery(&self) -> Imagery {
        self.imagery
    }

    /// Centers the view on the position in the URL path. Returns whether
    /// the center changed; a missing or malformed path leaves the default
    /// view untouched.
    pub fn restore_from_url(&mut self) -> bool {
        let path = self.history.path();
        let path = path.strip_prefix('/').unwrap_or(&path);

        match decode(self.converter, path) {
            Some(center) => {
                debug!("Restoring center {center} from URL");
                self.view.set_center(center);
                true
            }
            None => false,
        }
    }

    /// Writes the settled view center to the URL path. Call only once a
    /// pan, zoom or animation has finished.
    pub fn on_settled(&mut self) {
        let Some(center) = self.view.center() else {
            return;
        };

        match encode(self.converter, center) {
            Ok(path) => {
                trace!("Replacing URL path with {path}");
                self.history.replace_path(&path);
            }
            Err(err) => warn!("Not updating URL path: {err}"),
        }
    }

    /// Centers the view on a geographic position. URL and search driven
    /// centering both go through here.
    pub fn center_on(&mut self, geo: GeoCoord) -> bool {
        match self.converter.to_local(geo) {
            Ok(center) => {
                self.view.set_center(center);
                true
            }
            Err(err) => {
                warn!("Not centering on {geo}: {err}");
                false
            }
        }
    }

    /// Looks `query` up with `searcher` and centers on the match. No match
    /// is a no-op.
    pub async fn search<S>(&mut self, searcher: &S, query: &str) -> bool
    where
        S: PlaceSearch + ?Sized,
    {
        match searcher.search(query).await {
            Some(geo) => self.center_on(geo),
            None => {
                debug!("No place found for {query:?}");
                false
            }
        }
    }

    /// Animates to the `index`-th zoom step. Unknown steps are ignored.
    pub fn zoom_to_step(&mut self, index: usize) -> bool {
        let Some(&zoom) = self.config.zoom_steps.get(index) else {
            return false;
        };

        let zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.view.animate_zoom(zoom, self.config.zoom_duration());
        true
    }

    /// Switches between standard and high resolution imagery.
    pub fn toggle_imagery(&mut self) -> Imagery {
        self.imagery = self.imagery.toggled();
        self.view.set_imagery(self.imagery);
        self.imagery
    }

    pub fn into_parts(self) -> (V, H) {
        (self.view, self.history)
    }
}
