use serde::Deserialize;

use crate::stencil::{Stencil, StencilKind};

/// Largest selectable radius step; steps map 1:1 to stencil radii.
pub const MAX_RADIUS_STEP: u8 = 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Fill,
    Erase,
}

impl FillMode {
    #[inline]
    pub fn value(self) -> bool {
        matches!(self, FillMode::Fill)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    SelectKind(StencilKind),
    SelectRadiusStep(u8),
    SelectFillMode(FillMode),
}

impl SessionCommand {
    /// Brush hotkeys: `1`-`6` radius, `f`/`e` fill/erase, `s`/`c` square/circle.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            k @ '1'..='6' => Some(SessionCommand::SelectRadiusStep(k as u8 - b'1')),
            'f' => Some(SessionCommand::SelectFillMode(FillMode::Fill)),
            'e' => Some(SessionCommand::SelectFillMode(FillMode::Erase)),
            's' => Some(SessionCommand::SelectKind(StencilKind::Square)),
            'c' => Some(SessionCommand::SelectKind(StencilKind::Circle)),
            _ => None,
        }
    }
}

/// Transient brush selection owned by the host input layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    kind: StencilKind,
    radius_step: u8,
    mode: FillMode,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn kind(&self) -> StencilKind {
        self.kind
    }

    #[inline]
    pub fn radius_step(&self) -> u8 {
        self.radius_step
    }

    #[inline]
    pub fn fill_mode(&self) -> FillMode {
        self.mode
    }

    pub fn select_kind(&mut self, kind: StencilKind) {
        self.kind = kind;
    }

    /// Clamps to `0..=MAX_RADIUS_STEP`.
    pub fn select_radius_step(&mut self, step: u8) {
        self.radius_step = step.min(MAX_RADIUS_STEP);
    }

    pub fn select_fill_mode(&mut self, mode: FillMode) {
        self.mode = mode;
    }

    pub fn handle(&mut self, cmd: SessionCommand) {
        log::debug!(target: "edit", "session command {:?}", cmd);
        match cmd {
            SessionCommand::SelectKind(kind) => self.select_kind(kind),
            SessionCommand::SelectRadiusStep(step) => self.select_radius_step(step),
            SessionCommand::SelectFillMode(mode) => self.select_fill_mode(mode),
        }
    }

    /// Replays every recognised hotkey in `keys`; returns how many were applied.
    pub fn handle_keys(&mut self, keys: &str) -> usize {
        let mut applied = 0;
        for cmd in keys.chars().filter_map(SessionCommand::from_key) {
            self.handle(cmd);
            applied += 1;
        }
        applied
    }

    /// Stencil for the current selection, centered at the origin.
    pub fn stencil(&self) -> Stencil {
        Stencil::from_step(self.kind, self.mode.value(), self.radius_step)
    }
}
