pub mod assets;
pub mod logging;
pub mod text;
