//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `ExtractorServiceState`，保持命令函数薄、稳定、易测试。

use tauri::State;

use super::service::ExtractorServiceState;
use super::swatch::Swatch;
use crate::error::AppError;

/// 加载本地图片并按指定聚类数量取色。
///
/// 成功后采样数据保存在服务状态中，后续滑块拖动只需重新聚类。
#[tauri::command]
pub async fn load_image(
    state: State<'_, ExtractorServiceState>,
    path: String,
    cluster_count: u32,
) -> Result<Vec<Swatch>, AppError> {
    Ok(state.load_and_extract(path, cluster_count).await?)
}

/// 对已加载图片按新的聚类数量重新取色（滑块拖动）。
#[tauri::command]
pub async fn extract_palette(
    state: State<'_, ExtractorServiceState>,
    cluster_count: u32,
) -> Result<Vec<Swatch>, AppError> {
    Ok(state.extract(cluster_count).await?)
}

/// 丢弃当前图片，回到初始状态。
#[tauri::command]
pub fn reset_workspace(state: State<'_, ExtractorServiceState>) -> Result<(), AppError> {
    Ok(state.reset()?)
}
