mod health;
mod upload;

pub use health::{ROOT_MESSAGE, health_handler, root_handler};
pub use upload::{
    FILE_FIELD, INVALID_FILE_TYPE_DETAIL, OUTPUT_NOT_FOUND_DETAIL, upload_handler,
};
