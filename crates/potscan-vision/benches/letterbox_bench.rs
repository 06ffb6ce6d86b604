//! potscan-vision 성능 벤치마크
//!
//! 실행: cargo bench -p potscan-vision
//!
//! 벤치마크 대상:
//! - 레터박스 변환 (letterbox)
//! - 캔버스 재인코딩 (encode_canvas)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgba, RgbaImage};
use potscan_vision::encoder::{self, EncodeSettings};
use potscan_vision::letterbox;

/// 테스트용 패턴 이미지 생성
fn create_test_image(width: u32, height: u32, seed: u8) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = (x as u8).wrapping_add(seed).wrapping_mul(17);
        let g = (y as u8).wrapping_add(seed).wrapping_mul(31);
        let b = (x as u8).wrapping_add(y as u8).wrapping_add(seed);
        *pixel = Rgba([r, g, b, 255]);
    }
    DynamicImage::ImageRgba8(img)
}

fn bench_letterbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("letterbox");

    // 가로형, 세로형, 정사각
    let resolutions = [(1920, 1080), (1080, 1920), (1280, 720), (640, 640)];

    for (width, height) in resolutions {
        group.throughput(Throughput::Elements((width * height) as u64));
        let img = create_test_image(width, height, 7);

        group.bench_with_input(
            BenchmarkId::new("to_640", format!("{}x{}", width, height)),
            &img,
            |b, img| {
                b.iter(|| black_box(letterbox::letterbox(img, 640).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_canvas");
    let img = create_test_image(1280, 720, 3);
    let (canvas, _) = letterbox::letterbox(&img, 640).unwrap();

    for media_type in ["image/jpeg", "image/png", "image/webp"] {
        group.bench_with_input(
            BenchmarkId::new("640x640", media_type),
            &canvas,
            |b, canvas| {
                b.iter(|| {
                    black_box(
                        encoder::encode_canvas(canvas, media_type, EncodeSettings::default())
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_letterbox, bench_encode);
criterion_main!(benches);
