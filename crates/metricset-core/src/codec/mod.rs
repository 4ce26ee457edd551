//! Text exposition codec.
//!
//! `render` turns a prepared [`crate::model::Representation`] into text;
//! parsing goes through [`crate::model::Collection::load`]. For any text
//! produced by `render`, loading it and rendering again gives the same bytes.

pub mod escape;
mod parse;
pub mod render;

pub use escape::{
    decode_comment, decode_oneliner, encode_comment, encode_oneliner, escape_label_value,
};
pub(crate) use parse::load_into;
pub use render::render;
