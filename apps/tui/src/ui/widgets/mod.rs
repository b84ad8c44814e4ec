pub mod popup;
pub mod scroll;
