//! Scenarios over whole object graphs, using derived types.

mod callbacks;
mod codecs;
mod conversions;
mod dynamic;
mod errors;
mod fields;
