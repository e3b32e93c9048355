pub mod atom;
pub mod electron;
pub mod nucleus;
pub mod orbit;
