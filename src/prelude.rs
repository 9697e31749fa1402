//! Commonly used types, re-exported for convenient `use crate::prelude::*`.

pub use crate::math::{Mat4, Vec2, Vec3, Vec4};
