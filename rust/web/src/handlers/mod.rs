pub mod health;
pub mod tables;

pub use health::health;
pub use tables::{
    create_table, delete_table, get_table, request_advice, reset_table, setup_table,
    AdviceRequest, AdviceResponse, ResetResponse, SetupRequest, SetupResponse,
};
