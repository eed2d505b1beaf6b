pub mod audio;
pub mod bullet;
pub mod colors;
pub mod common;
pub mod elements;
pub mod image;
pub mod layout;
pub mod page;
pub mod placeholder;
pub mod presentation;
pub mod properties;
pub mod shape;
pub mod text;
pub mod text_element;
pub mod transition;
