mod common;
mod event;
mod files;
mod group_info;
mod image;
mod project;
mod upload;

pub use common::*;
pub use event::*;
pub use files::*;
pub use group_info::*;
pub use image::*;
pub use project::*;
pub use upload::*;
