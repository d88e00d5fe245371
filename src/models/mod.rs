pub mod campaign;
pub mod gallery;
pub mod menu;
