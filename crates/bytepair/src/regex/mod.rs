//! # Regex Utilities
//!
//! Mixes `regex` and `fancy_regex` behind one compiled type;
//! look-around patterns need `fancy_regex`.

mod regex_pattern;
mod regex_wrapper;

#[doc(inline)]
pub use regex_pattern::RegexPattern;
#[doc(inline)]
pub use regex_wrapper::{ErrorWrapper, RegexWrapper};
