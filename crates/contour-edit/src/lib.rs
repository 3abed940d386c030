//! Brush stencils and the edit-session state that selects them.
#![forbid(unsafe_code)]

mod session;
mod stencil;

pub use session::{EditSession, FillMode, MAX_RADIUS_STEP, SessionCommand};
pub use stencil::{Stencil, StencilError, StencilKind};
