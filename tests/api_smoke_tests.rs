use layer_stack::api::{LayerManifest, LayerStack};
use layer_stack::image::{MemoryImageCatalog, MemoryImageConverter, RgbaImage};
use layer_stack::render::NullCompositor;

#[test]
fn layer_stack_smoke_flow() {
    let catalog = MemoryImageCatalog::new()
        .with_image("paper", RgbaImage::solid(4, 4, [250, 250, 240, 255]))
        .with_image("sketch", RgbaImage::solid(4, 4, [90, 90, 90, 255]))
        .with_image("ink", RgbaImage::solid(4, 4, [0, 0, 0, 255]));
    let manifest = LayerManifest::from_json_str(
        r#"{ "layers": { "0": "paper", "1": "sketch", "2": "ink" } }"#,
    )
    .expect("manifest parses");

    let mut stack = manifest
        .build_stack(MemoryImageConverter, &catalog)
        .expect("stack builds");
    assert_eq!(stack.count(), 3);

    stack.remove_layer(1);
    assert_eq!(stack.count(), 2);
    let top = stack.layer(1).expect("top layer present");
    assert_eq!(top.pixel(0, 0), Some([0, 0, 0, 255]));

    let index = stack
        .append_layer(&RgbaImage::solid(4, 4, [200, 0, 0, 255]))
        .expect("append succeeds");
    assert_eq!(index, 2);

    let mut compositor = NullCompositor::default();
    stack.composite(&mut compositor).expect("composite succeeds");
    assert_eq!(compositor.last_layer_count, 3);
    assert_eq!(compositor.frames_composited, 1);

    let snapshot = stack.snapshot();
    assert!(snapshot.is_dense());
    assert_eq!(
        snapshot.identifiers(),
        vec![Some("paper"), Some("ink"), None]
    );
}

#[test]
fn empty_stack_has_no_layers() {
    let stack = LayerStack::new(MemoryImageConverter);
    assert_eq!(stack.count(), 0);
    assert!(stack.is_empty());
    assert!(stack.layer(0).is_none());
    assert!(stack.frame().is_empty());
}
