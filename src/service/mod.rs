//! Services: CRUD over the safe SQL builder, request validation, applications.

mod applications;
mod crud;
mod executor;
mod validation;
pub use applications::ApplicationService;
pub use crud::CrudService;
pub use executor::QueryExecutor;
pub use validation::*;
