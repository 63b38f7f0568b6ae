// End-to-end tests for the image -> palette pipeline
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use color_extractor::extractor::{parse_hex, ExtractError, ExtractorServiceState};

fn temp_image_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("color_extractor_test_{}_{}", std::process::id(), name))
}

fn write_solid_image(path: &Path, color: [u8; 3], width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    img.save(path).expect("test image should save");
}

fn write_two_tone_image(path: &Path) {
    let img = RgbImage::from_fn(200, 200, |x, _| {
        if x < 120 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
    });
    img.save(path).expect("test image should save");
}

fn cleanup(path: &Path) {
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn two_tone_image_extracts_dominant_palette() {
    let path = temp_image_path("two_tone.png");
    write_two_tone_image(&path);

    let service = ExtractorServiceState::new();
    let swatches = service
        .load_and_extract(path.to_string_lossy().into_owned(), 2)
        .await
        .expect("extraction should succeed");

    assert!(!swatches.is_empty());
    assert!(swatches.len() <= 2);

    let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
    assert!((sum - 1.0).abs() < 1e-9, "fractions should sum to 1, got {}", sum);

    for pair in swatches.windows(2) {
        assert!(pair[0].fraction >= pair[1].fraction, "swatches should sort descending");
    }
    assert!(swatches[0].fraction >= 0.5);

    for swatch in &swatches {
        parse_hex(&swatch.hex).expect("every swatch hex should be a valid #rrggbb");
        assert!(swatch.hex.starts_with('#'));
        assert_eq!(swatch.hex, swatch.hex.to_lowercase());
    }

    cleanup(&path);
}

#[tokio::test]
async fn solid_image_keeps_exact_color_for_single_cluster() {
    let path = temp_image_path("solid_blue.png");
    write_solid_image(&path, [0, 0, 255], 120, 80);

    let service = ExtractorServiceState::new();
    let swatches = service
        .load_and_extract(path.to_string_lossy().into_owned(), 1)
        .await
        .expect("extraction should succeed");

    assert_eq!(swatches.len(), 1);
    assert_eq!(swatches[0].hex, "#0000ff");
    assert!((swatches[0].fraction - 1.0).abs() < 1e-9);

    cleanup(&path);
}

#[tokio::test]
async fn cluster_count_above_distinct_colors_drops_empty_clusters() {
    let path = temp_image_path("solid_gray.png");
    write_solid_image(&path, [120, 120, 120], 64, 64);

    let service = ExtractorServiceState::new();
    let swatches = service
        .load_and_extract(path.to_string_lossy().into_owned(), 9)
        .await
        .expect("extraction should succeed");

    assert!(!swatches.is_empty());
    assert!(swatches.len() <= 9);

    let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
    assert!((sum - 1.0).abs() < 1e-9);
    for swatch in &swatches {
        assert!(swatch.fraction > 0.0, "empty clusters must be dropped");
    }

    cleanup(&path);
}

#[tokio::test]
async fn slider_change_reclusters_stored_samples() {
    let path = temp_image_path("reclustered.png");
    write_two_tone_image(&path);

    let service = ExtractorServiceState::new();
    service
        .load_and_extract(path.to_string_lossy().into_owned(), 2)
        .await
        .expect("initial extraction should succeed");

    let swatches = service.extract(5).await.expect("re-extraction should succeed");

    assert!(!swatches.is_empty());
    assert!(swatches.len() <= 5);
    let sum: f64 = swatches.iter().map(|s| s.fraction).sum();
    assert!((sum - 1.0).abs() < 1e-9);

    cleanup(&path);
}

#[tokio::test]
async fn reset_discards_samples_until_next_load() {
    let path = temp_image_path("reset.png");
    write_solid_image(&path, [10, 200, 30], 64, 64);

    let service = ExtractorServiceState::new();
    service
        .load_and_extract(path.to_string_lossy().into_owned(), 3)
        .await
        .expect("extraction should succeed");
    assert!(service.has_image().expect("state lock should be healthy"));

    service.reset().expect("reset should succeed");
    assert!(!service.has_image().expect("state lock should be healthy"));

    let result = service.extract(3).await;
    assert!(matches!(result, Err(ExtractError::NoImage)));

    cleanup(&path);
}

#[tokio::test]
async fn unsupported_extension_is_rejected_before_reading() {
    let path = temp_image_path("animated.gif");
    std::fs::write(&path, b"GIF89a not actually parsed").expect("test file should write");

    let service = ExtractorServiceState::new();
    let result = service
        .load_and_extract(path.to_string_lossy().into_owned(), 3)
        .await;

    assert!(matches!(result, Err(ExtractError::InvalidFormat(_))));

    cleanup(&path);
}

#[tokio::test]
async fn missing_file_is_reported_as_filesystem_error() {
    let path = temp_image_path("never_written.png");

    let service = ExtractorServiceState::new();
    let result = service
        .load_and_extract(path.to_string_lossy().into_owned(), 3)
        .await;

    assert!(matches!(result, Err(ExtractError::FileSystem(_))));
}

#[tokio::test]
async fn renamed_non_image_fails_signature_check() {
    let path = temp_image_path("fake.png");
    std::fs::write(&path, b"plain text pretending to be an image").expect("test file should write");

    let service = ExtractorServiceState::new();
    let result = service
        .load_and_extract(path.to_string_lossy().into_owned(), 3)
        .await;

    assert!(matches!(result, Err(ExtractError::InvalidFormat(_))));

    cleanup(&path);
}

#[tokio::test]
async fn cluster_count_outside_slider_range_is_rejected() {
    let path = temp_image_path("range.png");
    write_solid_image(&path, [1, 2, 3], 16, 16);

    let service = ExtractorServiceState::new();

    let too_low = service
        .load_and_extract(path.to_string_lossy().into_owned(), 0)
        .await;
    assert!(matches!(too_low, Err(ExtractError::InvalidClusterCount(0, _, _))));

    let too_high = service
        .load_and_extract(path.to_string_lossy().into_owned(), 16)
        .await;
    assert!(matches!(too_high, Err(ExtractError::InvalidClusterCount(16, _, _))));

    cleanup(&path);
}
