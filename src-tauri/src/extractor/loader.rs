//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理本地图片文件的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 扩展名白名单与文件选择对话框的过滤器保持一致。
//! - 存在性 + metadata 体积限制 + 读取。
//! - 读取后做文件签名校验，拒绝改名伪装的非图片内容。

use std::path::Path;

use super::{ExtractError, ExtractorConfig, ExtractorHandler};

/// 允许加载的图片扩展名（与前端对话框过滤器一致）。
const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// 加载阶段输出：原始字节与来源提示。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 判断路径扩展名是否在白名单内（大小写不敏感）。
fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lowered = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|allowed| *allowed == lowered)
        })
        .unwrap_or(false)
}

impl ExtractorHandler {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &str,
        config: &ExtractorConfig,
    ) -> Result<RawImageData, ExtractError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path);

        let file_path = Path::new(path);
        if !is_supported_extension(file_path) {
            return Err(ExtractError::InvalidFormat(format!(
                "不支持的文件扩展名：{}（可选：{}）",
                path,
                SUPPORTED_EXTENSIONS.join(" / ")
            )));
        }

        if !file_path.exists() {
            return Err(ExtractError::FileSystem(format!("文件不存在：{}", path)));
        }

        let metadata = std::fs::metadata(file_path)
            .map_err(|e| ExtractError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > config.max_file_size {
            return Err(ExtractError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(file_path)
            .map_err(|e| ExtractError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    /// 校验文件签名是否为图片类型。
    ///
    /// 扩展名可被随意改写，签名校验在解码前再拦一道。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ExtractError> {
        if bytes.is_empty() {
            return Err(ExtractError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| ExtractError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ExtractError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::is_supported_extension;
    use std::path::Path;

    #[test]
    fn supported_extensions_match_dialog_filter() {
        assert!(is_supported_extension(Path::new("a.png")));
        assert!(is_supported_extension(Path::new("a.jpg")));
        assert!(is_supported_extension(Path::new("a.jpeg")));
        assert!(is_supported_extension(Path::new("a.bmp")));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_extension(Path::new("photo.PNG")));
        assert!(is_supported_extension(Path::new("photo.Jpeg")));
    }

    #[test]
    fn unsupported_or_missing_extension_is_rejected() {
        assert!(!is_supported_extension(Path::new("a.gif")));
        assert!(!is_supported_extension(Path::new("a.webp")));
        assert!(!is_supported_extension(Path::new("archive.tar.gz")));
        assert!(!is_supported_extension(Path::new("no_extension")));
    }
}
