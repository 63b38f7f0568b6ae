//! # 取色模块（extractor）
//!
//! ## 设计思路
//!
//! 该模块将“文件加载校验 → 解码缩放采样 → k-means 聚类 → Tauri 命令暴露”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `service`：承载可注入状态（`ExtractorServiceState`）与当前采样数据
//! - `handler`：编排整条处理流水线
//! - `loader`：负责本地文件加载与安全校验
//! - `pipeline`：负责解码、像素限制、定尺寸采样
//! - `cluster`：负责 k-means 聚类与占比统计
//! - `swatch/config/error`：数据模型、配置、错误
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配）
//!    ↓
//! service.rs（State 注入、spawn_blocking 移出 async 运行时）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（扩展名白名单 + 体积/签名校验）
//!    ├─ pipeline.rs（解码 + 像素限制 + 150×150 采样）
//!    └─ cluster.rs（k-means + 占比 + 排序）
//!    ↓
//! 返回 AppError 给前端
//! ```

pub mod commands;
mod cluster;
mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod service;
mod swatch;

pub use cluster::{MAX_CLUSTER_COUNT, MIN_CLUSTER_COUNT};
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use service::ExtractorServiceState;
pub use swatch::{parse_hex, Swatch};

pub(crate) use cluster::validate_cluster_count;
pub(crate) use handler::ExtractorHandler;
