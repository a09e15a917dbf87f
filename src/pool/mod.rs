pub(crate) mod reserve;
