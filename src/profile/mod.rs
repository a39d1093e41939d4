pub(crate) mod responsive;
