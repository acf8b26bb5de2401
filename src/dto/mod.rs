pub mod api_response;
pub mod filtros;

pub use api_response::ApiResponse;
pub use filtros::ListFilters;
