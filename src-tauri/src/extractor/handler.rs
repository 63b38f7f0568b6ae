//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ExtractorHandler` 只负责流程编排与配置持有，不直接与 Tauri 绑定。
//! 处理链路固定为：
//! 1. 按路径加载原始字节
//! 2. 解码并缩放为采样数据
//! 3. 对采样数据执行聚类
//!
//! ## 实现思路
//!
//! - 配置在构造时固定（聚类参数不提供运行期调节入口），
//!   测试可通过 `with_config` 注入自定义配置。
//! - 记录 `load/decode/cluster/total` 阶段耗时，便于性能诊断。

use std::time::Instant;

use super::cluster;
use super::pipeline::PixelSamples;
use super::swatch::Swatch;
use super::{ExtractError, ExtractorConfig};

/// 取色处理器。
///
/// 持有配置并编排各子模块实现完整流程。
pub struct ExtractorHandler {
    config: ExtractorConfig,
}

impl ExtractorHandler {
    /// 根据配置创建处理器。
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// 当前生效配置。
    pub(crate) fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 加载阶段主入口：从本地文件到聚类就绪的采样数据。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use color_extractor::extractor::{ExtractorConfig, ExtractorHandler};
    ///
    /// let handler = ExtractorHandler::new(ExtractorConfig::default());
    /// let samples = handler.load_and_sample("/tmp/photo.png")?;
    /// let swatches = handler.cluster(&samples, 9)?;
    /// ```
    pub fn load_and_sample(&self, path: &str) -> Result<PixelSamples, ExtractError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(path, &self.config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let samples = self.decode_and_sample(raw, &self.config)?;
        let decode_elapsed = decode_start.elapsed();

        log::info!(
            "✅ 图片加载完成 - 采样={}x{} load={}ms decode={}ms total={}ms",
            samples.width,
            samples.height,
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(samples)
    }

    /// 聚类阶段主入口：对采样数据执行 k-means 并返回排序后的色板。
    pub fn cluster(
        &self,
        samples: &PixelSamples,
        cluster_count: u32,
    ) -> Result<Vec<Swatch>, ExtractError> {
        let cluster_start = Instant::now();
        let swatches = cluster::cluster_samples(samples, cluster_count, &self.config)?;

        log::info!(
            "✅ 取色完成 - k={} 色板={} cluster={}ms",
            cluster_count,
            swatches.len(),
            cluster_start.elapsed().as_millis()
        );

        Ok(swatches)
    }
}
