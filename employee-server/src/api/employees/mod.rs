//! Employee API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/employees/create | POST | 创建员工 (multipart 或 JSON) |
//! | /api/employees/get | GET | 列表 `?search=&sorton=&sortdir=` |
//! | /api/employees/get/{id} | GET | 按编号查询 |
//! | /api/employees/update/{id} | PUT | 部分更新 |
//! | /api/employees/delete/{id} | DELETE | 删除员工及其文件 |
//!
//! `{id}` is the employee's `customId` (`BWEB001`, or `employee:BWEB001`).
//! Responses carry no separate record id; clients key rows by `customId`.

mod form;
mod handler;

pub use form::{EmployeeSubmission, UploadedFile};

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/create", post(handler::create))
        .route("/get", get(handler::list))
        .route("/get/{id}", get(handler::get_by_id))
        .route("/update/{id}", put(handler::update))
        .route("/delete/{id}", delete(handler::delete))
}
