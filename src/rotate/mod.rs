pub(crate) mod swap;
