pub(crate) mod evaluator;
pub(crate) mod layout;
pub(crate) mod model;
