pub(crate) mod animator;
