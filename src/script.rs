//! TOML edit scripts replayed against a grid.
//!
//! ```toml
//! keys = "c3"
//!
//! [[edit]]
//! x = 0.25
//! y = -0.5
//! stencil = "circle"
//! radius = 2
//! mode = "fill"
//! ```

use std::fs;
use std::path::Path;

use contour_edit::{EditSession, FillMode, Stencil, StencilKind};
use contour_geom::Vec2;
use contour_map::{Grid, MapError};
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditScript {
    /// Session hotkeys replayed before any `--point` edits.
    pub keys: Option<String>,
    #[serde(rename = "edit")]
    pub edits: Vec<ScriptEdit>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEdit {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub stencil: StencilKind,
    #[serde(default)]
    pub radius: i32,
    #[serde(default)]
    pub mode: FillMode,
}

impl ScriptEdit {
    pub fn stencil(&self) -> Result<Stencil, MapError> {
        Ok(Stencil::new(self.stencil, self.mode.value(), self.radius)?)
    }
}

impl EditScript {
    pub fn from_toml_str(s: &str) -> Result<Self, MapError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Applies every edit in order, then replays `keys` into `session`.
    /// Returns the number of cells changed. Stencils are validated up front so
    /// a bad entry leaves the grid untouched.
    pub fn apply(&self, grid: &mut Grid, session: &mut EditSession) -> Result<usize, MapError> {
        let stencils = self
            .edits
            .iter()
            .map(ScriptEdit::stencil)
            .collect::<Result<Vec<_>, _>>()?;
        let mut changed = 0;
        for (edit, stencil) in self.edits.iter().zip(stencils) {
            changed += grid.apply_stencil(Vec2::new(edit.x, edit.y), stencil).changed_cells;
        }
        if let Some(keys) = &self.keys {
            let applied = session.handle_keys(keys);
            log::debug!(target: "edit", "replayed {} session keys", applied);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_map::MapConfig;

    const SCRIPT: &str = r#"
keys = "e2s"

[[edit]]
x = 0.0
y = 0.0
stencil = "circle"
radius = 2
mode = "fill"

[[edit]]
x = 0.0
y = 0.0
"#;

    #[test]
    fn parses_entries_with_defaults() {
        let script = EditScript::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.keys.as_deref(), Some("e2s"));
        assert_eq!(script.edits.len(), 2);
        assert_eq!(script.edits[0].stencil, StencilKind::Circle);
        assert_eq!(script.edits[0].radius, 2);
        assert_eq!(script.edits[1].stencil, StencilKind::Square);
        assert_eq!(script.edits[1].radius, 0);
        assert_eq!(script.edits[1].mode, FillMode::Fill);
    }

    #[test]
    fn unknown_fields_and_names_rejected() {
        assert!(matches!(
            EditScript::from_toml_str("[[edit]]\nx = 0.0\ny = 0.0\nstencil = \"hex\"\n"),
            Err(MapError::Toml(_))
        ));
        assert!(matches!(
            EditScript::from_toml_str("[[edit]]\nx = 0.0\ny = 0.0\nsize = 3\n"),
            Err(MapError::Toml(_))
        ));
    }

    #[test]
    fn apply_edits_then_keys() {
        let mut grid = Grid::new(&MapConfig::default()).unwrap();
        let mut session = EditSession::new();
        let script = EditScript::from_toml_str(SCRIPT).unwrap();
        // Circle of radius 2 is 13 cells; the second edit lands inside it.
        assert_eq!(script.apply(&mut grid, &mut session).unwrap(), 13);
        assert!(grid.total_triangles() > 0);
        assert_eq!(session.fill_mode(), FillMode::Erase);
        assert_eq!(session.radius_step(), 1);
        assert_eq!(session.kind(), StencilKind::Square);
    }

    #[test]
    fn negative_radius_leaves_grid_untouched() {
        let mut grid = Grid::new(&MapConfig::default()).unwrap();
        let mut session = EditSession::new();
        let script = EditScript::from_toml_str(
            "[[edit]]\nx = 0.0\ny = 0.0\n\n[[edit]]\nx = 0.0\ny = 0.0\nradius = -1\n",
        )
        .unwrap();
        assert!(matches!(
            script.apply(&mut grid, &mut session),
            Err(MapError::Stencil(_))
        ));
        assert_eq!(grid.total_vertices(), 0);
    }
}
