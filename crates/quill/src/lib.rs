//! quill: full-text search for a Markdown blog.
//!
//! quill reads posts laid out as `<posts>/<category>/<slug>/post.md`, builds an in-memory
//! prefix index over titles, tags and bodies, and answers free-text queries with ranked,
//! snippeted results. The index is built lazily on the first query and shared for the
//! life of the process.
//!
//! The binary exposes the search core on the command line (`quill search`) and over HTTP
//! (`quill serve`). This library half holds the pieces the binary and its tests share:
//! the HTTP [`server`] and [`logging`] setup.

#![warn(missing_docs)]

pub mod logging;
pub mod server;
