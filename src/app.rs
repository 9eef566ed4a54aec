mod keys;
mod model;

pub use keys::action_for;
pub use model::{Action, App};

#[cfg(test)]
mod tests;
