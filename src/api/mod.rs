pub mod response;

pub use response::{has_next_page, ApiResponse, Paginated};
