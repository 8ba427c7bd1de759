pub mod key_token;

pub use key_token::KeyTokenRepository;

#[cfg(test)]
pub use key_token::MockKeyTokenRepository;
