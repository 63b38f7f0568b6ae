//! # 聚类模块
//!
//! ## 设计思路
//!
//! 对采样像素执行 k-means，得到“主色 + 占比”列表。聚类在 sRGB 浮点空间进行，
//! 与界面语义一致：分组只按颜色分量方差，不引入感知距离。
//!
//! ## 实现思路
//!
//! - `kmeans_colors::get_kmeans` 单次运行，固定种子保证同图可复现。
//! - 按簇统计成员数量，占比 = 成员数 / 样本总数。
//! - 空簇（聚类数量超过图片中的不同颜色数时出现）直接丢弃，
//!   剩余占比总和仍为 1。
//! - 排序：占比降序，占比相同时按十六进制升序，保证网格渲染稳定。

use kmeans_colors::get_kmeans;
use palette::Srgb;

use super::pipeline::PixelSamples;
use super::swatch::Swatch;
use super::{ExtractError, ExtractorConfig};

/// 界面滑块允许的最小聚类数量。
pub const MIN_CLUSTER_COUNT: u32 = 1;
/// 界面滑块允许的最大聚类数量。
pub const MAX_CLUSTER_COUNT: u32 = 15;

/// 校验聚类数量处于滑块允许区间内。
pub(crate) fn validate_cluster_count(cluster_count: u32) -> Result<usize, ExtractError> {
    if !(MIN_CLUSTER_COUNT..=MAX_CLUSTER_COUNT).contains(&cluster_count) {
        return Err(ExtractError::InvalidClusterCount(
            cluster_count,
            MIN_CLUSTER_COUNT,
            MAX_CLUSTER_COUNT,
        ));
    }
    Ok(cluster_count as usize)
}

/// 对采样像素执行 k-means 并返回排序后的色板列表。
pub(super) fn cluster_samples(
    samples: &PixelSamples,
    cluster_count: u32,
    config: &ExtractorConfig,
) -> Result<Vec<Swatch>, ExtractError> {
    let k = validate_cluster_count(cluster_count)?;

    if samples.colors.is_empty() {
        return Err(ExtractError::Cluster("采样像素为空".to_string()));
    }

    let result = get_kmeans(
        k,
        config.kmeans_max_iterations,
        config.kmeans_converge,
        false,
        &samples.colors,
        config.kmeans_seed,
    );

    let mut member_counts = vec![0u64; k];
    for &index in &result.indices {
        let index = index as usize;
        if index >= k {
            return Err(ExtractError::Cluster(format!(
                "聚类返回越界簇下标：{}（k={}）",
                index, k
            )));
        }
        member_counts[index] += 1;
    }

    let total = samples.colors.len() as f64;
    let mut swatches: Vec<Swatch> = result
        .centroids
        .iter()
        .zip(member_counts)
        .filter(|(_, count)| *count > 0)
        .map(|(centroid, count)| {
            let rgb: Srgb<u8> = centroid.into_format();
            Swatch::from_rgb(
                (rgb.red, rgb.green, rgb.blue),
                count as f64 / total,
            )
        })
        .collect();

    swatches.sort_by(|a, b| {
        b.fraction
            .total_cmp(&a.fraction)
            .then_with(|| a.hex.cmp(&b.hex))
    });

    log::debug!(
        "🎨 聚类完成 - k={} 有效簇={} 样本={}",
        k,
        swatches.len(),
        samples.colors.len()
    );

    Ok(swatches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_of(colors: &[(u8, u8, u8)]) -> PixelSamples {
        PixelSamples {
            width: colors.len() as u32,
            height: 1,
            colors: colors
                .iter()
                .map(|&(r, g, b)| Srgb::<u8>::new(r, g, b).into_format::<f32>())
                .collect(),
        }
    }

    #[test]
    fn cluster_count_bounds_follow_slider_range() {
        assert!(validate_cluster_count(0).is_err());
        assert!(validate_cluster_count(16).is_err());
        assert_eq!(validate_cluster_count(1).expect("1 is in range"), 1);
        assert_eq!(validate_cluster_count(15).expect("15 is in range"), 15);
    }

    #[test]
    fn two_tone_samples_produce_valid_dominant_palette() {
        let mut colors = vec![(255, 0, 0); 60];
        colors.extend(vec![(0, 0, 255); 40]);
        let samples = samples_of(&colors);

        let swatches = cluster_samples(&samples, 2, &ExtractorConfig::default())
            .expect("clustering should succeed");

        assert!(!swatches.is_empty());
        assert!(swatches.len() <= 2);
        let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        // 两种占比之和为 1，最大者必然不小于一半
        assert!(swatches[0].fraction >= 0.5);
        for swatch in &swatches {
            assert!(crate::extractor::swatch::parse_hex(&swatch.hex).is_ok());
        }
    }

    #[test]
    fn fractions_sum_to_one_and_sort_descending() {
        let mut colors = vec![(10, 200, 30); 50];
        colors.extend(vec![(200, 10, 30); 30]);
        colors.extend(vec![(30, 10, 200); 20]);
        let samples = samples_of(&colors);

        let swatches = cluster_samples(&samples, 3, &ExtractorConfig::default())
            .expect("clustering should succeed");

        let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for pair in swatches.windows(2) {
            assert!(pair[0].fraction >= pair[1].fraction);
        }
    }

    #[test]
    fn empty_clusters_are_dropped_when_k_exceeds_distinct_colors() {
        let samples = samples_of(&vec![(120, 120, 120); 100]);

        let swatches = cluster_samples(&samples, 5, &ExtractorConfig::default())
            .expect("clustering should succeed");

        assert!(!swatches.is_empty());
        assert!(swatches.len() <= 5);
        let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        for swatch in &swatches {
            assert!(swatch.fraction > 0.0);
        }
    }

    #[test]
    fn empty_samples_are_rejected() {
        let samples = samples_of(&[]);
        assert!(cluster_samples(&samples, 3, &ExtractorConfig::default()).is_err());
    }
}
