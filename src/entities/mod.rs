//! Domain records and the request payloads that produce them

pub mod booking;
pub mod category;
pub mod menu;
pub mod order;
pub mod user;

pub use booking::{Booking, CreateBookingRequest};
pub use category::{Category, CreateCategoryRequest};
pub use menu::{CreateMenuRequest, MenuItem, NewMenuItem, UpdateMenuItemRequest};
pub use order::{
    Address, CreateOrderRequest, Order, OrderItem, OrderStatus, OrderType, PaymentMethodRequest,
    StatusUpdateRequest, UpdateOrderRequest,
};
pub use user::{LoginRequest, User};
