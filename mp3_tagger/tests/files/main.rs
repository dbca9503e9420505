#![allow(missing_docs)]

mod id3v1;
mod id3v2;
mod padding;
mod scenarios;
pub(crate) mod util;
