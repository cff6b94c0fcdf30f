//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口
//! - [`uploads`] - 上传文件访问

pub mod employees;
pub mod health;
pub mod uploads;
