//! Identity assignment: key cleaning, collision-safe minting and
//! author/reviewer resolution.

mod clean;
mod minter;
mod resolver;

pub use clean::{UNSAFE_CHARS, clean_key, is_unsafe};
pub use minter::{Identifier, IdentifierMinter, IdentityIndex};
pub use resolver::{AuthorRoles, Membership, classify};
