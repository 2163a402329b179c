use criterion::{criterion_group, criterion_main, Criterion};
use rfpaint::{LayoutBox, LayoutTree, Rect, RenderConfig, Renderer};

// Run with:
//    cargo bench --bench render_bench

/// A long list page: `items` list items, every third one a link.
fn list_page(items: usize) -> LayoutTree {
    let mut ul = LayoutBox::element("ul").at(8.0, 8.0, 1264.0, items as f32 * 20.0);
    for i in 0..items {
        let y = i as f32 * 20.0;
        let mut li = LayoutBox::element("li").at(24.0, y, 1240.0, 20.0);
        let text = LayoutBox::text(format!("item {}", i))
            .at(0.0, 0.0, 80.0, 20.0)
            .with_vertical_offset(15.0);
        li = if i % 3 == 0 {
            li.with_child(
                LayoutBox::element("a")
                    .with_attr("href", format!("/item/{}", i))
                    .at(0.0, 0.0, 80.0, 20.0)
                    .with_hit_box(Rect::new(0.0, 0.0, 80.0, 20.0))
                    .with_child(text),
            )
        } else {
            li.with_child(text)
        };
        ul = ul.with_child(li);
    }
    let root = LayoutBox::element("body")
        .at(0.0, 0.0, 1280.0, items as f32 * 20.0 + 16.0)
        .with_child(ul);
    LayoutTree::new(root).expect("bench tree")
}

fn bench_display_list(c: &mut Criterion) {
    let tree = list_page(2_000);
    let renderer = Renderer::new(RenderConfig::default()).expect("renderer");
    c.bench_function("render_display_list_2000_items", |b| {
        b.iter(|| {
            let out = renderer.render_display_list(&tree).unwrap();
            criterion::black_box(out.areas.len());
        })
    });
}

fn bench_pixmap(c: &mut Criterion) {
    let tree = list_page(200);
    let renderer = Renderer::new(RenderConfig::default()).expect("renderer");
    c.bench_function("render_pixmap_200_items", |b| {
        b.iter(|| {
            let out = renderer.render(&tree).unwrap();
            criterion::black_box(out.canvas.width());
        })
    });
}

criterion_group!(benches, bench_display_list, bench_pixmap);
criterion_main!(benches);
