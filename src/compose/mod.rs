/// Layer placement, alpha blending, and mask painting.
pub mod compositor;
