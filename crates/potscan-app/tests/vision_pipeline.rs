//! 실제 정규화기로 디코딩 → 레터박스 → 재인코딩 전체 경로 검증.

mod common;

use image::{GenericImageView, ImageFormat};
use potscan_core::config::VisionConfig;
use potscan_core::generation::GenerationCounter;
use potscan_core::models::frame::Placement;
use potscan_core::models::media::SelectedFile;
use potscan_core::ports::normalizer::FrameNormalizer;
use potscan_vision::normalizer::LetterboxNormalizer;

use common::encoded_image;

async fn file_bytes(file: &SelectedFile) -> std::sync::Arc<[u8]> {
    file.read_bytes().await.unwrap()
}

#[tokio::test]
async fn wide_png_is_letterboxed_vertically() {
    let normalizer = LetterboxNormalizer::from_config(&VisionConfig::default());
    let generations = GenerationCounter::new();
    let file = SelectedFile::in_memory(
        "road.png",
        "image/png",
        encoded_image(1280, 720, ImageFormat::Png),
    );

    let frame = normalizer
        .normalize(&file, file_bytes(&file).await, &generations.advance())
        .await
        .unwrap();

    assert_eq!((frame.width, frame.height), (640, 640));
    assert_eq!(
        frame.placement,
        Placement {
            x: 0,
            y: 140,
            width: 640,
            height: 360
        }
    );
    assert_eq!(frame.file_name, "resized_road.png");
    assert_eq!(frame.media_type, "image/png");

    let decoded = image::load_from_memory(&frame.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (640, 640));
    // 위쪽 여백은 투명, 중앙은 원본 색
    assert_eq!(decoded.get_pixel(320, 10).0[3], 0);
    assert_eq!(decoded.get_pixel(320, 320).0, [200, 40, 40, 255]);
}

#[tokio::test]
async fn tall_jpeg_is_letterboxed_horizontally() {
    let normalizer = LetterboxNormalizer::from_config(&VisionConfig::default());
    let generations = GenerationCounter::new();
    let file = SelectedFile::in_memory(
        "pit.jpg",
        "image/jpeg",
        encoded_image(480, 640, ImageFormat::Jpeg),
    );

    let frame = normalizer
        .normalize(&file, file_bytes(&file).await, &generations.advance())
        .await
        .unwrap();

    assert_eq!(frame.placement.x, 80);
    assert_eq!(frame.placement.y, 0);
    assert_eq!(frame.placement.width, 480);
    assert_eq!(frame.placement.height, 640);
    assert_eq!(frame.media_type, "image/jpeg");
    assert_eq!(
        image::guess_format(&frame.bytes).unwrap(),
        ImageFormat::Jpeg
    );

    // JPEG 여백은 검정에 가까움
    let decoded = image::load_from_memory(&frame.bytes).unwrap().to_rgb8();
    let pad = decoded.get_pixel(10, 320).0;
    assert!(pad.iter().all(|&c| c < 16), "padding {pad:?}");
}

#[tokio::test]
async fn square_image_keeps_full_canvas() {
    let normalizer = LetterboxNormalizer::from_config(&VisionConfig::default());
    let generations = GenerationCounter::new();
    let file = SelectedFile::in_memory(
        "sq.png",
        "image/png",
        encoded_image(640, 640, ImageFormat::Png),
    );

    let frame = normalizer
        .normalize(&file, file_bytes(&file).await, &generations.advance())
        .await
        .unwrap();
    assert_eq!(
        frame.placement,
        Placement {
            x: 0,
            y: 0,
            width: 640,
            height: 640
        }
    );
}
