use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rasterkit::bench::{
    EdgeFunctionRasterizer, Fill, FrameBuffer, Rasterizer, ScanlineRasterizer, ScreenVertex,
    Triangle,
};
use rasterkit::colors::Color;
use rasterkit::TexCoord;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f32>) {
    (
        vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize],
        vec![1.1f32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize],
    )
}

fn vert(x: f32, y: f32, z: f32) -> ScreenVertex {
    ScreenVertex::new(x, y, z, 1.0, TexCoord::ZERO, Color::rgb(255, 0, 0))
}

fn small_triangle() -> Triangle {
    Triangle::new(
        [
            vert(100.0, 100.0, 0.5),
            vert(120.0, 100.0, 0.5),
            vert(110.0, 120.0, 0.5),
        ],
        Fill::Solid,
    )
}

fn medium_triangle() -> Triangle {
    Triangle::new(
        [
            vert(100.0, 100.0, 0.5),
            vert(300.0, 100.0, 0.5),
            vert(200.0, 300.0, 0.5),
        ],
        Fill::Solid,
    )
}

fn large_triangle() -> Triangle {
    Triangle::new(
        [
            vert(50.0, 50.0, 0.5),
            vert(750.0, 100.0, 0.5),
            vert(400.0, 550.0, 0.5),
        ],
        Fill::Solid,
    )
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                scanline.fill_triangle(black_box(tri), &mut fb, None);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("edge_function", name),
            &triangle,
            |b, tri| {
                let (mut color, mut depth) = create_buffers();
                b.iter(|| {
                    let mut fb =
                        FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                    edge_fn.fill_triangle(black_box(tri), &mut fb, None);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    // Generate a grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                Triangle::new(
                    [
                        vert(x, y, 0.5),
                        vert(x + 35.0, y, 0.5),
                        vert(x + 17.5, y + 25.0, 0.5),
                    ],
                    Fill::Solid,
                )
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let (mut color, mut depth) = create_buffers();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb, None);
            }
        });
    });

    group.bench_function("edge_function_400_triangles", |b| {
        let (mut color, mut depth) = create_buffers();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
            for tri in &triangles {
                edge_fn.fill_triangle(black_box(tri), &mut fb, None);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
