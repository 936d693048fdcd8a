mod inherit;
mod layout;
mod structure;
