pub(crate) mod observer;
pub(crate) mod section;
