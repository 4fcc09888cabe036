pub mod token;

pub use self::token::TokenClaims;
