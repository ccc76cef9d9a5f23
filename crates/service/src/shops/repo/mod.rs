pub mod json_file;
pub mod seaorm;

pub use json_file::JsonFileShopRepository;
pub use seaorm::SeaOrmShopRepository;
