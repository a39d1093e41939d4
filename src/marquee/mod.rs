pub(crate) mod repeat;
pub(crate) mod runner;
