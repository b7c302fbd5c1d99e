use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heic_bridge::image_pipeline::{
    copy_plane, ConversionConfig, DecodedImage, PngCompression, PngWriter, StandardPngWriter,
};

/// Interleaved RGB plane with `padding` extra bytes at the end of each row.
fn generate_mock_plane(width: usize, height: usize, padding: usize) -> (Vec<u8>, usize) {
    let stride = width * 3 + padding;
    let mut data = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width * 3 {
            data[y * stride + x] = ((x + y) % 256) as u8;
        }
    }
    (data, stride)
}

fn mock_image(width: usize, height: usize) -> DecodedImage {
    let (pixels, _) = generate_mock_plane(width, height, 0);
    DecodedImage {
        width,
        height,
        pixels,
        source_stride: width * 3,
    }
}

fn benchmark_copy_plane(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_plane");

    let sizes = vec![
        (640, 480, "640x480"),
        (1920, 1080, "1920x1080"),
        (4032, 3024, "4032x3024"),
    ];

    for (width, height, label) in sizes {
        // 64-byte aligned rows, as libheif allocates them
        let padding = (64 - (width * 3) % 64) % 64;
        let (plane, stride) = generate_mock_plane(width, height, padding);

        group.bench_with_input(BenchmarkId::from_parameter(label), &plane, |b, plane| {
            b.iter(|| copy_plane(black_box(plane), stride, width, height));
        });
    }

    group.finish();
}

fn benchmark_compression_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_compression");
    let image = mock_image(1000, 750);

    let compressions = vec![
        (PngCompression::Fast, "fast"),
        (PngCompression::Default, "default"),
        (PngCompression::Best, "best"),
    ];

    for (compression, label) in compressions {
        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            let config = ConversionConfig::builder().compression(compression).build();

            b.iter(|| {
                let mut output = Vec::new();
                let _ = StandardPngWriter.write_png(black_box(image), &mut output, &config);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_copy_plane, benchmark_compression_levels);
criterion_main!(benches);
