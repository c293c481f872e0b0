pub mod cat;
