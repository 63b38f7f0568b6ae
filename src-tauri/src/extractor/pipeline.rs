//! # 解码与采样流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 定尺寸采样”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码
//! 4. 缩放到固定采样尺寸（默认 150×150）
//! 5. 展平为 RGB 采样列表（丢弃 alpha），供聚类直接使用

use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgba};
use palette::Srgb;
use std::io::Cursor;

use super::loader::RawImageData;
use super::{ExtractError, ExtractorConfig, ExtractorHandler};

/// 采样阶段输出：聚类就绪的 RGB 像素列表。
///
/// 颜色已转换为 `Srgb<f32>`，同一次加载可被多次聚类复用（滑块拖动场景）。
pub(crate) struct PixelSamples {
    /// 采样图宽度（像素）。
    pub(crate) width: u32,
    /// 采样图高度（像素）。
    pub(crate) height: u32,
    /// 展平后的采样颜色，长度 = `width * height`。
    pub(crate) colors: Vec<Srgb<f32>>,
}

impl ExtractorHandler {
    /// 将原始字节解码并缩放为聚类采样数据。
    pub(super) fn decode_and_sample(
        &self,
        raw: RawImageData,
        config: &ExtractorConfig,
    ) -> Result<PixelSamples, ExtractError> {
        let _format: ImageFormat = image::guess_format(&raw.bytes)
            .map_err(|e| ExtractError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| ExtractError::Decode(format!("图片解码失败：{}", e)))?;

        let (raw_width, raw_height) = decoded.dimensions();
        Self::validate_pixel_limits(config, raw_width, raw_height)?;
        Self::validate_decoded_memory_limits(config, raw_width, raw_height)?;

        let sampled = self.resize_to_sample(decoded, config)?;
        let (width, height) = sampled.dimensions();

        let rgba = sampled.to_rgba8();
        let bytes = rgba.into_raw();

        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ExtractError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;

        if bytes.len() != expected_len {
            return Err(ExtractError::Decode("缩放后像素数据长度异常".to_string()));
        }

        let colors = bytes
            .chunks_exact(4)
            .map(|chunk| Srgb::<u8>::new(chunk[0], chunk[1], chunk[2]).into_format::<f32>())
            .collect();

        log::info!(
            "✅ 图片采样成功 - 来源: {} 原始尺寸: {}x{} 采样尺寸: {}x{}",
            raw.source_hint,
            raw_width,
            raw_height,
            width,
            height
        );

        Ok(PixelSamples {
            width,
            height,
            colors,
        })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ExtractError> {
        let cursor = Cursor::new(bytes);
        let reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| ExtractError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ExtractError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &ExtractorConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ExtractError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ExtractError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ExtractError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &ExtractorConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ExtractError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ExtractError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(ExtractError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 缩放到固定采样尺寸。
    ///
    /// 采样尺寸固定（默认 150×150），不保持宽高比：聚类只关心颜色分布，
    /// 统一尺寸让不同图片的样本量一致。
    fn resize_to_sample(
        &self,
        image: DynamicImage,
        config: &ExtractorConfig,
    ) -> Result<DynamicImage, ExtractError> {
        let (width, height) = image.dimensions();
        let target_width = config.sample_width.max(1);
        let target_height = config.sample_height.max(1);

        if width == target_width && height == target_height {
            return Ok(image);
        }

        log::debug!(
            "🧩 采样缩放：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            config.resize_filter
        );

        match Self::resize_with_fast_image_resize(&image, target_width, target_height, config.resize_filter)
        {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                    err
                );
                Ok(image.resize_exact(target_width, target_height, config.resize_filter))
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, ExtractError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            src.into_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ExtractError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(
            Self::to_fast_filter(filter),
        ));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ExtractError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| ExtractError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
