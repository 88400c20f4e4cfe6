pub mod gallery;
pub mod tabs;
