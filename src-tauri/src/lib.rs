//! # 图片取色工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                前端 (静态 HTML + JavaScript)              │
//! │                                                          │
//! │  滑块(1~15) ── 加载按钮 ── 重置按钮 ── 色板网格(3 列)      │
//! │       │  (统一 invoke + 错误反馈)                         │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError>)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ extractor ── 加载·采样·k-means 取色                   │
//! │  │   ├─ loader    扩展名白名单 + 体积/签名校验            │
//! │  │   ├─ pipeline  解码 + 150×150 采样                    │
//! │  │   └─ cluster   k-means + 占比统计 + 排序              │
//! │  │                                                       │
//! │  ├─ clipboard ── 颜色值写入剪贴板（含重试）               │
//! │  ├─ layout ───── 网格行数·窗口高度计算                   │
//! │  └─ settings ─── 聚类数量持久化 (返回 Result)             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`extractor`] | 图片加载、定尺寸采样、k-means 聚类与色板输出 |
//! | [`clipboard`] | 颜色值写入系统剪贴板，含退避重试 |
//! | [`layout`] | 色板网格行数与窗口高度的纯函数计算及窗口命令 |
//! | [`settings`] | 聚类数量等设置的读写持久化 |

pub mod error;
pub mod clipboard;
pub mod extractor;
pub mod layout;
pub mod settings;
