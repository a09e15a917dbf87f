pub(crate) mod calc;
