pub mod descriptor;
pub mod normalize;
