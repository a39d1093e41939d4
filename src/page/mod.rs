pub(crate) mod mount;
pub(crate) mod scroll;
