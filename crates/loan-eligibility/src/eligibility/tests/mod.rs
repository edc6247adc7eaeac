mod artifacts;
mod common;
mod domain;
