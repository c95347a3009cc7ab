//! Line-oriented render collaborator for the wizard.

mod driver;
mod input;
mod render;

pub use driver::drive;
pub use input::{parse_line, Input, InputError};
pub use render::Renderer;
