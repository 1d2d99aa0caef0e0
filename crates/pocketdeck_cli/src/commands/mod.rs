pub mod alarm;
pub mod bookmark;
pub mod cache;
pub mod note;
pub mod run;
pub mod task;
pub mod theme;
