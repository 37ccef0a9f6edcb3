//! siterun: drives a content preprocessor and a static site generator.
//!
//! `siterun build` preprocesses content, runs the generator once and copies
//! static assets into the output. `siterun develop` preprocesses, then keeps
//! a watcher and the generator's dev server running side by side.

pub mod args;
pub mod assets;
pub mod config;
pub mod locator;
pub mod logging;
pub mod supervisor;
