// Service exports
pub mod appwrite;
pub mod rides;
pub mod store;

pub use appwrite::AppwriteClient;
pub use rides::{MatchError, RideMatchService, DEFAULT_LIMIT};
pub use store::{RideStore, StoreError};
