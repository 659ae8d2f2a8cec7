pub(crate) mod collaborators;
