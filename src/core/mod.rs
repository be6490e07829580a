//! Core module containing the traits and types shared by storage and server

pub mod auth;
pub mod error;
pub mod field;
pub mod jwt;
pub mod password;
pub mod query;
pub mod sequence;
pub mod service;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, NoAuthProvider};
pub use error::{RestroError, RestroResult};
pub use field::{FieldValue, Filterable};
pub use jwt::{Claims, JwtAuthProvider};
pub use query::{PageRequest, PaginationMeta, PaginationParams};
pub use sequence::{DisplayId, DisplayIdSequencer};
pub use service::{
    BookingService, CategoryService, CounterService, MenuService, OrderService, SearchPage,
    UserService,
};
