/// GPU side of the viewer: one shader program drawing one textured quad
/// through egui's glow paint callbacks.

pub mod quad;
pub mod shader;
