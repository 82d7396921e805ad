pub(crate) mod config;
pub(crate) mod fields;
pub(crate) mod kind;
pub(crate) mod layout;
