use segview_annotate::{
    build_detections, painter::label_text, render, ClassNames, ColorTable, RawDetection, RawMask,
    RenderError, RenderOptions,
};
use segview_image::{Image, ImageSize};

const SIZE: ImageSize = ImageSize {
    width: 200,
    height: 100,
};

fn gray(value: u8) -> Result<Image<u8, 3>, RenderError> {
    Ok(Image::from_size_val(SIZE, value)?)
}

fn names() -> ClassNames {
    ClassNames::from_lines("Tooth_11\nTooth_12\nTooth_21")
}

#[test]
fn zero_detections_leave_the_image_unchanged() -> Result<(), RenderError> {
    let base = Image::<u8, 3>::new(SIZE, (0..SIZE.area() * 3).map(|v| (v % 251) as u8).collect())?;

    let names = names();
    let colors = ColorTable::from_class_names(&names, 42);
    let detections = build_detections(&[], SIZE, &names, &colors);

    let frame = render(&base, &detections, &RenderOptions::default())?;
    assert_eq!(frame, base);
    Ok(())
}

#[test]
fn one_detection_without_mask_draws_box_and_label() -> Result<(), RenderError> {
    let base = gray(100)?;
    let names = names();
    let colors = ColorTable::from_class_names(&names, 42);

    let raws = [RawDetection {
        class_id: 0,
        confidence: 0.87,
        bbox: [10.0, 10.0, 50.0, 50.0],
        mask: None,
    }];
    let detections = build_detections(&raws, SIZE, &names, &colors);
    assert_eq!(detections.len(), 1);
    assert_eq!(
        label_text(&detections[0].label, detections[0].confidence),
        "Tooth_11 0.87"
    );

    let frame = render(&base, &detections, &RenderOptions::default())?;
    let color = colors.color_for(0);

    // box edges, away from the label
    for (x, y) in [(10, 40), (50, 40), (30, 50), (9, 40), (51, 40)] {
        assert_eq!(frame.pixel(x, y), Some(&color[..]), "box pixel ({x}, {y})");
    }
    // interior untouched
    assert_eq!(frame.pixel(30, 40), Some(&[100u8, 100, 100][..]));

    // "Tooth_11 0.87" is 104x8 pixels; no room above the box so the label sits
    // below its top edge, background rows [16, 28) and columns [10, 118)
    assert_eq!(frame.pixel(117, 16), Some(&[0u8, 0, 0][..]));
    assert_eq!(frame.pixel(117, 27), Some(&[0u8, 0, 0][..]));
    assert_eq!(frame.pixel(118, 20), Some(&[100u8, 100, 100][..]));
    assert_eq!(frame.pixel(60, 28), Some(&[100u8, 100, 100][..]));

    let white = (18..26)
        .flat_map(|y| (12..116).map(move |x| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y) == Some(&[255u8, 255, 255][..]))
        .count();
    assert!(white > 50, "only {white} text pixels");

    Ok(())
}

#[test]
fn masks_are_blended_and_outlined() -> Result<(), RenderError> {
    let base = gray(200)?;
    let names = names();
    let colors = ColorTable::from_class_names(&names, 42);

    // model resolution of 50x25, i.e. 4x smaller than the image
    let (mw, mh) = (50, 25);
    let data = (0..mh)
        .flat_map(|y| (0..mw).map(move |x| if (10..20).contains(&x) && (5..15).contains(&y) { 0.9 } else { 0.1 }))
        .collect();
    let raws = [RawDetection {
        class_id: 2,
        confidence: 0.6,
        bbox: [40.0, 20.0, 80.0, 60.0],
        mask: Some(RawMask {
            width: mw,
            height: mh,
            data,
        }),
    }];

    let detections = build_detections(&raws, SIZE, &names, &colors);
    let polygon = &detections[0].polygon;
    assert_eq!(polygon, &vec![[40, 20], [40, 59], [79, 59], [79, 20]]);

    let options = RenderOptions {
        show_boxes: false,
        show_labels: false,
        ..Default::default()
    };
    let frame = render(&base, &detections, &options)?;

    let color = colors.color_for(2);
    let expected = color.map(|c| {
        let overlay = (c as f32 * 0.4).round();
        (200.0 * 0.6 + overlay * 0.4).round() as u8
    });
    assert_eq!(frame.pixel(60, 40), Some(&expected[..]));

    // outside of the mask only the base weight remains
    assert_eq!(frame.pixel(5, 5), Some(&[120u8, 120, 120][..]));
    Ok(())
}

#[test]
fn bad_mask_keeps_box() -> Result<(), RenderError> {
    let base = gray(100)?;
    let names = names();
    let colors = ColorTable::from_class_names(&names, 42);

    let raws = [RawDetection {
        class_id: 1,
        confidence: 0.9,
        bbox: [20.0, 30.0, 60.0, 70.0],
        mask: Some(RawMask {
            width: 0,
            height: 0,
            data: vec![],
        }),
    }];
    let detections = build_detections(&raws, SIZE, &names, &colors);
    assert_eq!(detections.len(), 1);
    assert!(detections[0].mask.is_none());

    let frame = render(&base, &detections, &RenderOptions::default())?;
    assert_eq!(frame.pixel(20, 60), Some(&colors.color_for(1)[..]));
    Ok(())
}

#[test]
fn boxes_far_outside_the_image_render_quickly() -> Result<(), RenderError> {
    let base = gray(100)?;
    let names = names();
    let colors = ColorTable::from_class_names(&names, 42);

    let raws = [
        RawDetection {
            class_id: 1,
            confidence: 0.5,
            bbox: [0.0, 0.0, 2e8, 10.0],
            mask: None,
        },
        RawDetection {
            class_id: 2,
            confidence: 0.5,
            bbox: [-3e9, -3e9, 3e9, 3e9],
            mask: None,
        },
    ];
    let detections = build_detections(&raws, SIZE, &names, &colors);
    assert_eq!(detections.len(), 2);

    let start = std::time::Instant::now();
    let frame = render(&base, &detections, &RenderOptions::default())?;
    assert!(start.elapsed() < std::time::Duration::from_secs(1));

    // the visible part of the first box bottom edge
    assert_eq!(frame.pixel(199, 10), Some(&colors.color_for(1)[..]));
    assert_eq!(frame.pixel(150, 5), Some(&[100u8, 100, 100][..]));
    Ok(())
}
