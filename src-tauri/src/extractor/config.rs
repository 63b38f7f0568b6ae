//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ExtractorConfig`，保证运行时行为可观测、可测试。
//! 聚类参数不对外暴露调节入口（聚类数量由界面滑块决定，其余参数固定），
//! 自定义配置仅用于测试注入。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置：150×150 采样、平衡型降采样滤镜。
//! - 文件与解码上限沿用保守阈值，提前拒绝恶意或异常输入。

use image::imageops::FilterType;

/// 取色流程配置。
///
/// 字段覆盖了加载、解码缩放、聚类与剪贴板写入重试四个阶段。
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 聚类采样图宽度（像素）。
    pub sample_width: u32,
    /// 聚类采样图高度（像素）。
    pub sample_height: u32,
    /// 降采样滤镜策略。
    pub resize_filter: FilterType,
    /// k-means 最大迭代次数。
    pub kmeans_max_iterations: usize,
    /// k-means 收敛阈值。
    pub kmeans_converge: f32,
    /// k-means 随机种子（固定值保证同一图片拖动滑块时结果可复现）。
    pub kmeans_seed: u64,
    /// 写入剪贴板失败时最大重试次数。
    pub clipboard_retries: u32,
    /// 重试间隔（毫秒）。
    pub clipboard_retry_delay: u64,
    /// 单次写入流程允许的总重试预算（毫秒）。
    pub clipboard_retry_max_total_ms: u64,
    /// 单次退避延迟上限（毫秒）。
    pub clipboard_retry_max_delay_ms: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            sample_width: 150,
            sample_height: 150,
            resize_filter: FilterType::Triangle,
            kmeans_max_iterations: 20,
            kmeans_converge: 1e-4,
            kmeans_seed: 0,
            clipboard_retries: 3,
            clipboard_retry_delay: 100,
            clipboard_retry_max_total_ms: 1_800,
            clipboard_retry_max_delay_ms: 900,
        }
    }
}
