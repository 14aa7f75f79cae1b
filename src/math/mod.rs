mod aabb;
mod hash;
mod spline;

pub use aabb::AABB;
pub use hash::{label_hash, label_jitter};
pub use spline::{catmull_rom, sample_closed};
