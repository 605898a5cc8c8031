//! Rust Course Roster - 课程用户与角色管理服务
//!
//! 基于 Actix Web 构建的用户管理与助教名单后端。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `jobs`: 进程内后台任务（名单批量上传）
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型与静态权限表
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `views`: 管理页面 HTML 模板

pub mod config;
pub mod entity;
pub mod errors;
pub mod jobs;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;
