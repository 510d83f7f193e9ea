//! The four record types of the storefront
//!
//! Each record is owned by its own collection. Cross-record links are stored
//! only as ids (`Product::category_id`, `Order::user_id`,
//! `Order::product_ids`) and carry no existence guarantee.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use category::{Category, CategoryPatch, NewCategory};
pub use order::{NewOrder, Order, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserPatch};
