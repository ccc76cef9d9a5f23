pub mod errors;
pub mod db;
pub mod object_id;
pub mod shop;
pub mod shop_document;

pub use object_id::ObjectId;
pub use shop::{Comment, NewShop, ShopRecord, UserId};
