use layer_stack::api::LayerStack;
use layer_stack::core::LayerMap;
use layer_stack::error::LayerStackError;
use layer_stack::image::{ImageConverter, MemoryImageConverter, RgbaImage};

fn shade(value: u8) -> RgbaImage {
    RgbaImage::solid(1, 1, [value, value, value, 255])
}

fn build_stack(values: &[u8]) -> LayerStack<MemoryImageConverter> {
    let layers: LayerMap<RgbaImage> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| (i64::try_from(index).expect("small index"), shade(value)))
        .collect();
    LayerStack::from_images(MemoryImageConverter, &layers).expect("dense layers")
}

fn values(stack: &LayerStack<MemoryImageConverter>) -> Vec<u8> {
    (0..stack.count())
        .map(|index| {
            stack
                .layer(index)
                .and_then(|image| image.pixel(0, 0))
                .map(|px| px[0])
                .expect("every index below count is populated")
        })
        .collect()
}

#[test]
fn append_places_image_on_top() {
    let mut stack = build_stack(&[1, 2]);
    let index = stack.append_layer(&shade(3)).expect("append succeeds");
    assert_eq!(index, 2);
    assert_eq!(stack.count(), 3);
    assert_eq!(stack.layer(2), Some(shade(3)));
}

#[test]
fn append_rejects_unconvertible_image() {
    let mut stack = build_stack(&[1]);
    let err = stack
        .append_layer(&RgbaImage::from_raw(2, 2, vec![0; 2]))
        .expect_err("invalid image must fail");
    assert_eq!(err, LayerStackError::InvalidImage { identifier: None });
    assert_eq!(stack.count(), 1);
}

#[test]
fn remove_first_layer_shifts_remaining_down() {
    let mut stack = build_stack(&[10, 20, 30]);
    stack.remove_layer(0);
    assert_eq!(stack.count(), 2);
    assert_eq!(values(&stack), vec![20, 30]);
    assert!(stack.layer(2).is_none());
}

#[test]
fn remove_top_layer_leaves_lower_layers_untouched() {
    let mut stack = build_stack(&[10, 20, 30]);
    stack.remove_layer(2);
    assert_eq!(values(&stack), vec![10, 20]);
}

#[test]
fn remove_absent_index_changes_nothing() {
    let mut stack = build_stack(&[10, 20]);
    let before = stack.snapshot();
    assert!(stack.remove_layer(5).is_none());
    assert_eq!(stack.snapshot(), before);
    assert_eq!(values(&stack), vec![10, 20]);
}

#[test]
fn remove_until_empty_then_append_starts_at_zero() {
    let mut stack = build_stack(&[1, 2]);
    stack.remove_layer(1);
    stack.remove_layer(0);
    assert!(stack.is_empty());
    assert_eq!(stack.append_layer(&shade(9)), Ok(0));
}

#[test]
fn lookup_past_count_is_absent() {
    let stack = build_stack(&[1, 2]);
    assert!(stack.layer(2).is_none());
    assert!(stack.layer(usize::MAX).is_none());
    assert_eq!(stack.try_layer(2), Ok(None));
    assert!(stack.handle(2).is_none());
}

#[test]
fn clear_drops_every_layer() {
    let mut stack = build_stack(&[1, 2, 3]);
    stack.clear();
    assert_eq!(stack.count(), 0);
    assert!(stack.layer(0).is_none());
}

/// Converter whose back-conversion always fails.
#[derive(Debug, Default)]
struct WriteOnlyConverter;

impl ImageConverter for WriteOnlyConverter {
    type Image = u8;
    type Handle = u8;

    fn convert(&self, image: &u8) -> Option<u8> {
        Some(*image)
    }

    fn convert_back(&self, _handle: &u8) -> Option<u8> {
        None
    }
}

#[test]
fn failed_back_conversion_reads_as_absent() {
    let mut stack = LayerStack::new(WriteOnlyConverter);
    stack.append_layer(&7).expect("append succeeds");
    assert_eq!(stack.count(), 1);
    assert_eq!(stack.handle(0), Some(&7));
    assert_eq!(stack.layer(0), None);
    assert_eq!(
        stack.try_layer(0),
        Err(LayerStackError::InvalidImage { identifier: None })
    );
}
