// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 图片取色工具 — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use color_extractor::{clipboard, extractor, layout, settings};
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_dialog::init())
        // 应用设置
        .setup(|app| {
            log::info!("setup: begin");

            app.manage(extractor::ExtractorServiceState::new());
            log::info!("setup: extractor service managed");

            log::info!("setup: complete");
            Ok(())
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 取色流程
            extractor::commands::load_image,
            extractor::commands::extract_palette,
            extractor::commands::reset_workspace,
            // 剪贴板
            clipboard::copy_color_to_clipboard,
            // 窗口几何
            layout::fit_window_to_swatches,
            layout::reset_window_size,
            // 应用设置存储
            settings::get_app_settings,
            settings::set_app_settings,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
