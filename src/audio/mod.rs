pub mod earcon;
pub mod media;
pub mod renderer;
