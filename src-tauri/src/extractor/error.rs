//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载取色链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 取色流程统一错误类型。
///
/// 该类型会在命令层被上转为 `AppError`，最终透传给前端。
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("尚未加载图片，无法取色")]
    NoImage,

    #[error("聚类数量无效：{0}（允许范围：{1}~{2}）")]
    InvalidClusterCount(u32, u32, u32),

    #[error("聚类失败：{0}")]
    Cluster(String),
}

impl From<ExtractError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: ExtractError) -> Self {
        error.to_string()
    }
}
