//! # 剪贴板写入模块
//!
//! ## 设计思路
//!
//! 将与操作系统剪贴板交互的逻辑独立出来，便于隔离平台不稳定因素。
//! 使用阻塞线程执行写入，避免阻塞 async 运行时。
//!
//! ## 实现思路
//!
//! 写入内容只有一个 7 字符的颜色值，瓶颈不在编码而在剪贴板本身
//! 可能被其他进程短暂占用。策略：写入失败时在预算内做指数退避重试。
//! 入参先经过十六进制校验，畸形内容直接拒绝，不触碰剪贴板。

use std::time::{Duration, Instant};

use tauri::State;

use crate::error::AppError;
use crate::extractor::{parse_hex, ExtractorServiceState};

/// 计算第 `attempt` 次重试前的退避等待（指数增长，封顶 `max_delay_ms`）。
fn compute_backoff_delay(base_delay_ms: u64, attempt: u32, max_delay_ms: u64) -> u64 {
    let exp = base_delay_ms.saturating_mul(1_u64 << attempt.saturating_sub(1).min(8));
    exp.min(max_delay_ms.max(base_delay_ms))
}

/// 判断“已耗时 + 即将等待”是否会超出总预算。
fn would_exceed_retry_budget(elapsed_ms: u64, wait_ms: u64, budget_ms: u64) -> bool {
    elapsed_ms.saturating_add(wait_ms) > budget_ms
}

/// 在阻塞线程中执行写入 + 重试。
fn write_text_with_retry(
    text: &str,
    retries: u32,
    retry_delay: u64,
    retry_max_total_ms: u64,
    retry_max_delay_ms: u64,
) -> Result<(), AppError> {
    let retry_count = retries.max(1);
    let started = Instant::now();
    let mut last_error = None;

    for attempt in 1..=retry_count {
        if attempt > 1 {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if elapsed_ms >= retry_max_total_ms {
                log::warn!(
                    "⏱️ 剪贴板写入重试预算耗尽（{}ms >= {}ms）",
                    elapsed_ms,
                    retry_max_total_ms
                );
                break;
            }

            let wait_ms = compute_backoff_delay(retry_delay.max(1), attempt - 1, retry_max_delay_ms);

            if would_exceed_retry_budget(elapsed_ms, wait_ms, retry_max_total_ms) {
                log::warn!(
                    "⏱️ 跳过第 {} 次重试：等待 {}ms 会超过预算 {}ms",
                    attempt,
                    wait_ms,
                    retry_max_total_ms
                );
                break;
            }

            log::debug!("🔄 重试 {}/{}，等待 {}ms（指数退避）", attempt, retry_count, wait_ms);
            std::thread::sleep(Duration::from_millis(wait_ms));
        }

        let write_result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text));

        match write_result {
            Ok(()) => {
                log::info!("✅ 颜色已复制到剪贴板: {} (尝试 {})", text, attempt);
                return Ok(());
            }
            Err(err) => {
                log::warn!("❌ 尝试 {} 失败: {}", attempt, err);
                last_error = Some(err.to_string());
            }
        }
    }

    Err(AppError::Clipboard(
        last_error.unwrap_or_else(|| "未知错误".to_string()),
    ))
}

/// 将色板颜色值写入系统剪贴板。
///
/// 前端在点击色点或标签时调用；写入成功后由前端展示
/// “Copied: #rrggbb” 反馈并在 1.5 秒后清除。
#[tauri::command]
pub async fn copy_color_to_clipboard(
    state: State<'_, ExtractorServiceState>,
    hex: String,
) -> Result<(), AppError> {
    // 只接受合法颜色值，避免任意文本借道写入
    parse_hex(&hex)?;

    let (retries, retry_delay, retry_max_total_ms, retry_max_delay_ms) =
        state.clipboard_retry_params();

    tokio::task::spawn_blocking(move || {
        write_text_with_retry(&hex, retries, retry_delay, retry_max_total_ms, retry_max_delay_ms)
    })
    .await
    .map_err(|e| AppError::Clipboard(format!("线程执行失败：{}", e)))?
}
