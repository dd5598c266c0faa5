pub mod scale;
pub mod transform;
