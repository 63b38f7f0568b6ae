//! 色板网格与窗口几何模块
//!
//! 结果区是一个固定 3 列、行数随色板数量变化的网格，窗口高度需要随
//! 行数增长，重置时恢复默认几何。该模块实现其中的核心算法，并提供
//! 两个应用到主窗口的命令。
//!
//! # 设计思路
//!
//! - 算法纯函数化：输入为色板数量与列数，输出唯一行数/高度，便于测试。
//! - 对异常输入（零列数、零色板）给出安全回退，避免上层崩溃。
//! - 命令层只做“算高度 → 设置窗口尺寸”的编排，不掺杂几何计算。

use tauri::{LogicalSize, Window};

use crate::error::AppError;

/// 默认窗口宽度（逻辑像素）。
pub const DEFAULT_WINDOW_WIDTH: u32 = 400;
/// 默认窗口高度（逻辑像素），即控件区所需的基础高度。
pub const DEFAULT_WINDOW_HEIGHT: u32 = 190;
/// 色板网格每行的列数。
pub const COLUMNS_PER_ROW: u32 = 3;

/// 每行色板（色点 + 标签）占用的高度。
const SWATCH_ROW_HEIGHT: u32 = 65;
/// 网格下方的额外留白。
const GRID_BOTTOM_PADDING: u32 = 20;

/// 计算容纳 `swatch_count` 个色板需要的网格行数。
///
/// 行数 = ceil(数量 / 列数)，且最少为 1：即使没有任何色板，
/// 结果区也保留一行的位置，窗口高度不会小于默认值加一行。
///
/// # 参数
/// * `swatch_count` - 色板数量
/// * `columns` - 每行列数
///
/// # 返回
/// 网格行数（>= 1）
pub fn swatch_row_count(swatch_count: u32, columns: u32) -> u32 {
    // 异常兜底：零列数无法布局，按单行处理
    if columns == 0 {
        return 1;
    }

    if swatch_count <= columns {
        1
    } else {
        swatch_count.div_ceil(columns)
    }
}

/// 计算展示 `swatch_count` 个色板所需的窗口总高度。
///
/// 高度 = 基础高度 + 行数 × 行高 + 底部留白。
///
/// # 后置条件
/// - 结果随 `swatch_count` 单调不减
/// - 结果始终大于 [`DEFAULT_WINDOW_HEIGHT`]
pub fn required_window_height(swatch_count: u32) -> u32 {
    let rows = swatch_row_count(swatch_count, COLUMNS_PER_ROW);
    DEFAULT_WINDOW_HEIGHT
        .saturating_add(rows.saturating_mul(SWATCH_ROW_HEIGHT))
        .saturating_add(GRID_BOTTOM_PADDING)
}

/// 根据色板数量调整主窗口高度（宽度保持默认值）。
#[tauri::command]
pub fn fit_window_to_swatches(window: Window, swatch_count: u32) -> Result<(), AppError> {
    let height = required_window_height(swatch_count);

    log::debug!("📐 调整窗口高度 - 色板数={} 高度={}", swatch_count, height);

    window
        .set_size(LogicalSize::new(DEFAULT_WINDOW_WIDTH as f64, height as f64))
        .map_err(|e| AppError::Window(format!("调整窗口尺寸失败: {}", e)))
}

/// 恢复默认窗口几何（重置场景）。
#[tauri::command]
pub fn reset_window_size(window: Window) -> Result<(), AppError> {
    window
        .set_size(LogicalSize::new(
            DEFAULT_WINDOW_WIDTH as f64,
            DEFAULT_WINDOW_HEIGHT as f64,
        ))
        .map_err(|e| AppError::Window(format!("恢复窗口尺寸失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_is_one_when_swatches_fit_single_row() {
        assert_eq!(swatch_row_count(0, 3), 1);
        assert_eq!(swatch_row_count(1, 3), 1);
        assert_eq!(swatch_row_count(3, 3), 1);
    }

    #[test]
    fn row_count_rounds_up_for_partial_rows() {
        assert_eq!(swatch_row_count(4, 3), 2);
        assert_eq!(swatch_row_count(9, 3), 3);
        assert_eq!(swatch_row_count(10, 3), 4);
        assert_eq!(swatch_row_count(15, 3), 5);
    }

    #[test]
    fn row_count_survives_zero_columns() {
        assert_eq!(swatch_row_count(7, 0), 1);
    }

    #[test]
    fn window_height_matches_grid_formula() {
        // 9 个色板 → 3 行 → 190 + 3×65 + 20
        assert_eq!(required_window_height(9), 405);
        // 1 个色板 → 1 行 → 190 + 65 + 20
        assert_eq!(required_window_height(1), 275);
        // 15 个色板 → 5 行 → 190 + 325 + 20
        assert_eq!(required_window_height(15), 535);
    }

    #[test]
    fn window_height_never_shrinks_below_single_row() {
        assert_eq!(required_window_height(0), required_window_height(1));
    }
}
