//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `ExtractorServiceState` 作为 Tauri 注入状态，替代全局单例函数。
//! 好处：
//! 1. 生命周期清晰（由 `main.rs` 统一管理）
//! 2. 测试可创建独立实例，减少共享状态副作用
//! 3. “当前采样数据”这一唯一可变状态有明确的归属
//!
//! ## 实现思路
//!
//! 对外仅暴露少量稳定 API：
//! - `load_and_extract`：加载图片并按当前聚类数量取色
//! - `extract`：对已加载图片重新取色（滑块拖动场景）
//! - `reset`：丢弃当前采样数据
//!
//! 加载与聚类均为 CPU 密集操作，统一通过 `spawn_blocking` 移出 async 运行时。

use std::sync::{Arc, Mutex};

use super::cluster::validate_cluster_count;
use super::pipeline::PixelSamples;
use super::swatch::Swatch;
use super::{ExtractError, ExtractorConfig, ExtractorHandler};

/// 取色服务状态。
///
/// 作为 Tauri `State` 注入到命令层，内部持有 `ExtractorHandler`
/// 与“当前采样数据”槽位。采样数据在加载时写入、下次加载时替换、重置时丢弃。
pub struct ExtractorServiceState {
    handler: Arc<ExtractorHandler>,
    samples: Mutex<Option<Arc<PixelSamples>>>,
}

impl ExtractorServiceState {
    /// 使用默认配置创建服务状态。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use color_extractor::extractor::ExtractorServiceState;
    ///
    /// let service = ExtractorServiceState::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// 使用自定义配置创建服务状态。
    ///
    /// 主要用于测试注入不同策略。
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            handler: Arc::new(ExtractorHandler::new(config)),
            samples: Mutex::new(None),
        }
    }

    /// 执行完整流程：加载图片 → 存储采样 → 聚类取色。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use color_extractor::extractor::ExtractorServiceState;
    ///
    /// # async fn demo() -> Result<(), color_extractor::extractor::ExtractError> {
    /// let service = ExtractorServiceState::new();
    /// let swatches = service.load_and_extract("/tmp/photo.png".into(), 9).await?;
    /// assert!(swatches.len() <= 9);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_and_extract(
        &self,
        path: String,
        cluster_count: u32,
    ) -> Result<Vec<Swatch>, ExtractError> {
        // 聚类数量先校验，避免无效参数触发一次完整加载
        validate_cluster_count(cluster_count)?;

        let handler = Arc::clone(&self.handler);
        let (samples, swatches) = tokio::task::spawn_blocking(move || {
            let samples = handler.load_and_sample(&path)?;
            let swatches = handler.cluster(&samples, cluster_count)?;
            Ok::<_, ExtractError>((samples, swatches))
        })
        .await
        .map_err(|e| ExtractError::Cluster(format!("线程执行失败：{}", e)))??;

        let mut slot = self
            .samples
            .lock()
            .map_err(|_| ExtractError::ResourceLimit("采样状态锁已中毒".to_string()))?;
        *slot = Some(Arc::new(samples));

        Ok(swatches)
    }

    /// 对已加载的采样数据重新取色。
    ///
    /// 没有加载过图片时返回 [`ExtractError::NoImage`]。
    pub async fn extract(&self, cluster_count: u32) -> Result<Vec<Swatch>, ExtractError> {
        validate_cluster_count(cluster_count)?;

        let samples = {
            let slot = self
                .samples
                .lock()
                .map_err(|_| ExtractError::ResourceLimit("采样状态锁已中毒".to_string()))?;
            slot.as_ref().map(Arc::clone).ok_or(ExtractError::NoImage)?
        };

        let handler = Arc::clone(&self.handler);
        tokio::task::spawn_blocking(move || handler.cluster(&samples, cluster_count))
            .await
            .map_err(|e| ExtractError::Cluster(format!("线程执行失败：{}", e)))?
    }

    /// 丢弃当前采样数据，回到“未加载”状态。
    pub fn reset(&self) -> Result<(), ExtractError> {
        let mut slot = self
            .samples
            .lock()
            .map_err(|_| ExtractError::ResourceLimit("采样状态锁已中毒".to_string()))?;
        *slot = None;

        log::info!("🧹 已重置取色工作区");
        Ok(())
    }

    /// 当前是否已加载图片。
    pub fn has_image(&self) -> Result<bool, ExtractError> {
        let slot = self
            .samples
            .lock()
            .map_err(|_| ExtractError::ResourceLimit("采样状态锁已中毒".to_string()))?;
        Ok(slot.is_some())
    }

    /// 剪贴板重试参数透出（命令层写剪贴板时使用）。
    pub(crate) fn clipboard_retry_params(&self) -> (u32, u64, u64, u64) {
        let config = self.handler.config();
        (
            config.clipboard_retries,
            config.clipboard_retry_delay,
            config.clipboard_retry_max_total_ms,
            config.clipboard_retry_max_delay_ms,
        )
    }
}

impl Default for ExtractorServiceState {
    fn default() -> Self {
        Self::new()
    }
}
