pub(crate) mod dashboard;
pub(crate) mod entries;
pub(crate) mod session;
