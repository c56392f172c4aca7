//! 应用层：用户、产品、系统接口

pub mod products;
pub mod state;
pub mod system;
pub mod users;
