pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::KeyTokenRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockKeyTokenRepository;

#[cfg(test)]
mod tests;
