pub mod analyze;
pub mod cases;
pub mod dispatch;
pub mod init;
pub mod predict;
pub mod retrain;
pub mod schema;
pub mod session;
pub mod symptoms;

mod shared;
