pub mod aabb2;
pub mod distances2;
