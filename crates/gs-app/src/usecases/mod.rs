pub mod actions;
pub mod applications;
pub mod wizard;
