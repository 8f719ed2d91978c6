pub mod board;
pub mod dispatcher;
pub mod game;
pub mod generator;
pub mod letter_classifier;
pub mod migration;
pub mod predicates;
pub mod word_loader;
