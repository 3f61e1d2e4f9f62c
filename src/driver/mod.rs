//! Frame scheduling loop and the host interfaces it talks to.

pub(crate) mod frame;
pub(crate) mod host;
