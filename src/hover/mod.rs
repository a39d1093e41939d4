pub(crate) mod edge;
pub(crate) mod wipe;
