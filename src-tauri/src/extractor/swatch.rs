//! # 色板数据模型
//!
//! 单个色板 = 一种主色的十六进制表示 + 它在采样像素中的占比。
//! 占比列表满足“总和为 1”，十六进制始终为小写 `#rrggbb`。

use super::ExtractError;

/// 单次聚类结果中的一种主色。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Swatch {
    /// 小写 `#rrggbb` 形式的颜色值。
    pub hex: String,
    /// 该颜色覆盖的采样像素占比（0.0 ~ 1.0）。
    pub fraction: f64,
}

impl Swatch {
    /// 由 RGB 分量与占比构造色板。
    pub fn from_rgb((red, green, blue): (u8, u8, u8), fraction: f64) -> Self {
        Self {
            hex: format_hex((red, green, blue)),
            fraction,
        }
    }
}

/// 将 RGB 分量格式化为小写 `#rrggbb`。
pub fn format_hex((red, green, blue): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", red, green, blue)
}

/// 解析 `#rrggbb` / `rrggbb` 形式的颜色值。
///
/// 大小写不敏感。用于剪贴板写入前的入参校验，拒绝前端传来的畸形内容。
pub fn parse_hex(value: &str) -> Result<(u8, u8, u8), ExtractError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(ExtractError::InvalidFormat(format!(
            "颜色值长度应为 6 位十六进制：{}",
            value
        )));
    }

    // 先整体校验字符集，之后按字节切片才安全（多字节字符会破坏切片边界）
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ExtractError::InvalidFormat(format!(
            "颜色值包含非十六进制字符：{}",
            value
        )));
    }

    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| {
            ExtractError::InvalidFormat(format!("颜色值包含非十六进制字符：{}", value))
        })
    };

    Ok((component(0..2)?, component(2..4)?, component(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hex_is_lowercase_with_leading_hash() {
        assert_eq!(format_hex((255, 0, 171)), "#ff00ab");
        assert_eq!(format_hex((0, 0, 0)), "#000000");
        assert_eq!(format_hex((9, 10, 11)), "#090a0b");
    }

    #[test]
    fn parse_hex_accepts_hash_and_bare_forms() {
        assert_eq!(parse_hex("#ff00ab").expect("hash form should parse"), (255, 0, 171));
        assert_eq!(parse_hex("FF00AB").expect("bare uppercase should parse"), (255, 0, 171));
    }

    #[test]
    fn parse_hex_rejects_malformed_input() {
        assert!(parse_hex("#ff00a").is_err());
        assert!(parse_hex("#ff00zz").is_err());
        assert!(parse_hex("").is_err());
        // 六字节但含多字节字符，不能触发切片 panic
        assert!(parse_hex("#ffé0a").is_err());
    }

    #[test]
    fn swatch_roundtrips_through_format_and_parse() {
        let swatch = Swatch::from_rgb((18, 52, 86), 0.25);
        assert_eq!(swatch.hex, "#123456");
        assert_eq!(parse_hex(&swatch.hex).expect("own output should parse"), (18, 52, 86));
    }
}
