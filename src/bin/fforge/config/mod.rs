mod recipe;

pub use recipe::{Encoding, Model, Recipe, load_recipe};
