//! Progress state machine and its clock integration.
//!
//! Every transition here is a pure function from one [`AnimState`](machine::AnimState)
//! snapshot to the next.

pub(crate) mod clock;
pub(crate) mod machine;
