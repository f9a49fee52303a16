pub mod localizer;
pub mod random;
pub mod resource;
