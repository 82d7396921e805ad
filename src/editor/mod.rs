pub(crate) mod context;
pub(crate) mod export;
pub(crate) mod notice;
pub(crate) mod runtime;
pub(crate) mod selector;
pub(crate) mod transform;
pub(crate) mod upload;
