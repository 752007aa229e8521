pub(crate) mod binary_tree;
pub(crate) mod composite;
pub(crate) mod letters;
pub(crate) mod list;
