//! Library side of the `datafile` terminal editor.
//!
//! A [`Workspace`](workspace::Workspace) holds the open tables; a
//! [`Session`](session::Session) walks the user through scenes that read and
//! change them.

pub mod chooser;
pub mod logging;
pub mod session;
pub mod workspace;
