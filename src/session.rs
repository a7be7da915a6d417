//! Text command surface over the farm editor
//!
//! Plays the role of the add-farm screen: it owns the editor, the map
//! center, the in-flight locate flag and the last geolocation error, and
//! renders the same information the screen shows.

use std::fmt::Write as _;
use thiserror::Error;

use crate::domain::GeoPoint;
use crate::editor::RegionEditor;
use crate::locate::{Geolocator, PositionOptions};
use crate::view::{
    Controls, DEFAULT_CENTER, DEFAULT_ZOOM, MapOverlay, complete_label, coordinate_rows,
    format::EMPTY_COORDINATES, format_area, status_message,
};

pub const HELP: &str = "\
Commands:
  add <lat> <lon>   Add a boundary point (also: add <lat>,<lon>)
  undo              Remove the last point
  clear             Remove all points
  complete          Lock the selection (needs 3+ points)
  name <text>       Set the farm name
  save [<text>]     Save the locked selection, optionally naming it
  locate            Center the map on your location
  show              Print the current state
  help              Show this help
  quit              Exit";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("Usage: add <lat> <lon>")]
    MissingCoordinates,
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Usage: name <text>")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(GeoPoint),
    Undo,
    Clear,
    Complete,
    Name(String),
    Save(Option<String>),
    Locate,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "add" => Command::Add(parse_point(rest)?),
            "undo" => Command::Undo,
            "clear" => Command::Clear,
            "complete" => Command::Complete,
            "name" if rest.is_empty() => return Err(CommandError::MissingName),
            "name" => Command::Name(rest.to_string()),
            "save" if rest.is_empty() => Command::Save(None),
            "save" => Command::Save(Some(rest.to_string())),
            "locate" => Command::Locate,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Parse "lat lon" or "lat,lon"
pub fn parse_point(text: &str) -> Result<GeoPoint, CommandError> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MissingCoordinates);
    };

    let parse = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::InvalidCoordinate(s.to_string()))
    };

    Ok(GeoPoint::new(parse(lat)?, parse(lon)?))
}

pub struct Session<L> {
    editor: RegionEditor,
    locator: L,
    options: PositionOptions,
    center: GeoPoint,
    zoom: u8,
    locating: bool,
    geo_error: Option<String>,
}

impl<L: Geolocator> Session<L> {
    pub fn new(locator: L, options: PositionOptions) -> Self {
        Self {
            editor: RegionEditor::new(),
            locator,
            options,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            locating: false,
            geo_error: None,
        }
    }

    pub fn with_view(mut self, center: GeoPoint, zoom: u8) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    pub fn editor(&self) -> &RegionEditor {
        &self.editor
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn geo_error(&self) -> Option<&str> {
        self.geo_error.as_deref()
    }

    pub fn overlay(&self) -> MapOverlay {
        MapOverlay::for_editor(&self.editor, self.center, self.zoom)
    }

    pub fn controls(&self) -> Controls {
        Controls::for_editor(&self.editor, self.locating)
    }

    /// Apply a command. Returns `false` once the session should end.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Add(point) => {
                self.overlay().tap(&mut self.editor, point);
            }
            Command::Undo => self.editor.undo(),
            Command::Clear => self.editor.clear(),
            Command::Complete => self.editor.complete(),
            Command::Name(name) => self.editor.set_name(name),
            Command::Save(name) => {
                let name = name.unwrap_or_else(|| self.editor.name().to_string());
                self.editor.save(&name);
            }
            Command::Locate => self.locate(),
            Command::Show | Command::Help => {}
            Command::Quit => return false,
        }
        true
    }

    /// Single-shot position request. A fix recenters the map and sets the
    /// current location; a failure is kept as a display message.
    pub fn locate(&mut self) {
        if self.locating {
            return;
        }

        self.geo_error = None;
        self.locating = true;

        match self.locator.current_position(&self.options) {
            Ok(point) => {
                log::info!("Located at {}", point);
                self.center = point;
                self.editor.set_current_location(point);
            }
            Err(e) => {
                log::warn!("Geolocation failed: {}", e);
                self.geo_error = Some(e.to_string());
            }
        }

        self.locating = false;
    }

    /// Render the screen contents as plain text
    pub fn render(&self) -> String {
        let editor = &self.editor;
        let controls = self.controls();
        let mut out = String::new();

        let name = if editor.name().trim().is_empty() {
            "(unnamed)"
        } else {
            editor.name()
        };
        let _ = writeln!(out, "Farm name: {}", name);
        let _ = writeln!(out, "Vertices: {}", editor.vertices().len());
        let _ = writeln!(out, "Area: {}", format_area(editor.compute_area()));
        let _ = writeln!(out, "Center: {} (zoom {})", self.center, self.zoom);
        if let Some(location) = editor.current_location() {
            let _ = writeln!(out, "Current location: {}", location);
        }

        let _ = writeln!(out, "Coordinates:");
        if editor.vertices().is_empty() {
            let _ = writeln!(out, "  {}", EMPTY_COORDINATES);
        }
        for row in coordinate_rows(editor.vertices()) {
            let _ = writeln!(out, "  {}: {}", row.label, row.value);
        }

        let _ = writeln!(
            out,
            "[{}] {}  [{}] Save farm",
            if controls.complete { "x" } else { " " },
            complete_label(editor.is_locked()),
            if controls.save { "x" } else { " " },
        );
        let _ = writeln!(out, "{}", status_message(editor.is_saved()));

        if let Some(error) = &self.geo_error {
            let _ = writeln!(out, "{}", error);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::{FixedLocator, GeolocationError, Unsupported};

    struct Failing;

    impl Geolocator for Failing {
        fn current_position(&mut self, _: &PositionOptions) -> Result<GeoPoint, GeolocationError> {
            Err(GeolocationError::PermissionDenied(String::new()))
        }
    }

    fn session() -> Session<Unsupported> {
        Session::new(Unsupported, PositionOptions::default())
    }

    fn run<L: Geolocator>(session: &mut Session<L>, script: &str) {
        for line in script.lines() {
            if let Some(command) = Command::parse(line).unwrap() {
                session.apply(command);
            }
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("add 33.6982 -117.9472"),
            Ok(Some(Command::Add(GeoPoint::new(33.6982, -117.9472))))
        );
        assert_eq!(
            Command::parse("ADD 33.6982,-117.9472"),
            Ok(Some(Command::Add(GeoPoint::new(33.6982, -117.9472))))
        );
        assert_eq!(Command::parse("  undo "), Ok(Some(Command::Undo)));
        assert_eq!(Command::parse("save"), Ok(Some(Command::Save(None))));
        assert_eq!(
            Command::parse("save Riverside Orchard"),
            Ok(Some(Command::Save(Some("Riverside Orchard".to_string()))))
        );
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("# comment"), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("plant corn"),
            Err(CommandError::Unknown("plant".to_string()))
        );
        assert_eq!(
            Command::parse("add 33.7"),
            Err(CommandError::MissingCoordinates)
        );
        assert_eq!(
            Command::parse("add 1 2 3"),
            Err(CommandError::MissingCoordinates)
        );
        assert_eq!(
            Command::parse("add north 2"),
            Err(CommandError::InvalidCoordinate("north".to_string()))
        );
        assert_eq!(
            Command::parse("add NaN 2"),
            Err(CommandError::InvalidCoordinate("NaN".to_string()))
        );
        assert_eq!(Command::parse("name"), Err(CommandError::MissingName));
    }

    #[test]
    fn test_script_to_saved() {
        let mut session = session();
        run(
            &mut session,
            "add 33.6982 -117.9472
             add 33.6974 -117.9458
             add 33.6961 -117.9462
             add 33.6967 -117.9475
             complete
             add 0 0
             name Riverside Orchard
             save",
        );

        let editor = session.editor();
        assert_eq!(editor.vertices().len(), 4);
        assert!(editor.is_saved());

        let text = session.render();
        assert!(text.contains("Vertices: 4"));
        assert!(text.contains("Area: 2196"));
        assert!(text.contains(" m²"));
        assert!(text.contains("Point 4: 33.69670, -117.94750"));
        assert!(text.contains("Farm region saved locally."));
    }

    #[test]
    fn test_quit_ends_session() {
        let mut session = session();
        assert!(session.apply(Command::Show));
        assert!(!session.apply(Command::Quit));
    }

    #[test]
    fn test_render_empty() {
        let text = session().render();
        assert!(text.contains("Area: —"));
        assert!(text.contains("No points selected yet."));
        assert!(text.contains("Complete the polygon and provide a name"));
    }

    #[test]
    fn test_locate_success_recenters() {
        let here = GeoPoint::new(33.66, -118.0);
        let mut session = Session::new(FixedLocator::new(here), PositionOptions::default());
        session.apply(Command::Add(GeoPoint::new(1.0, 1.0)));
        session.locate();

        assert_eq!(session.center(), here);
        assert_eq!(session.editor().current_location(), Some(here));
        assert_eq!(session.editor().vertices(), &[GeoPoint::new(1.0, 1.0)]);
        assert!(session.geo_error().is_none());
        assert!(session.controls().locate);
    }

    #[test]
    fn test_locate_failure_sets_message() {
        let mut session = session();
        session.locate();
        assert_eq!(
            session.geo_error(),
            Some("Geolocation is not supported on this device.")
        );
        assert_eq!(session.center(), DEFAULT_CENTER);

        let mut session = Session::new(Failing, PositionOptions::default());
        session.locate();
        assert_eq!(session.geo_error(), Some("Unable to fetch your location."));
        assert!(session.render().contains("Unable to fetch your location."));
    }
}
