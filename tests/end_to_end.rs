// End-to-end scenarios through SplitSession: upload, drag, confirm, reset
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba};
use image_splitter::splitter::{
    ContainerRect, EditorEvent, ImageUpload, Orientation, PointerPoint, SplitError, SplitSession,
};

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode fixture");
    bytes
}

fn loaded_session(name: &str, width: u32, height: u32) -> SplitSession {
    let mut session = SplitSession::default();
    session
        .load_image(ImageUpload::from_bytes(name, "image/png", gradient_png(width, height)))
        .expect("fixture should load");
    session
}

#[test]
fn vertical_split_of_400x200_gives_four_columns() {
    let mut session = loaded_session("wide.png", 400, 200);

    let outputs = session.confirm_split().unwrap();

    let sizes: Vec<(u32, u32)> = outputs.iter().map(|o| (o.width, o.height)).collect();
    assert_eq!(sizes, vec![(100, 200); 4]);
    let ordinals: Vec<u32> = outputs.iter().map(|o| o.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4]);
}

#[test]
fn horizontal_split_of_400x200_gives_four_rows() {
    let mut session = loaded_session("wide.png", 400, 200);
    session.set_orientation(Orientation::Horizontal);

    let outputs = session.confirm_split().unwrap();

    let sizes: Vec<(u32, u32)> = outputs.iter().map(|o| (o.width, o.height)).collect();
    assert_eq!(sizes, vec![(400, 50); 4]);
}

#[test]
fn outputs_are_cropped_from_the_original_not_the_preview() {
    let mut session = loaded_session("big.png", 2000, 100);
    assert!(session.preview().is_some_and(|p| p.width < 2000));

    let outputs = session.confirm_split().unwrap().to_vec();
    let source = session.source().unwrap().pixels().clone();

    let second = image::load_from_memory(&outputs[1].png).unwrap();
    assert_eq!(second.dimensions(), (500, 100));
    assert_eq!(second.get_pixel(0, 0), source.get_pixel(500, 0));
    assert_eq!(second.get_pixel(499, 99), source.get_pixel(999, 99));
}

#[test]
fn drag_then_reset_restores_defaults() {
    let mut session = loaded_session("a.png", 400, 200);
    let container = ContainerRect { left: 0.0, top: 0.0, width: 400.0, height: 200.0 };

    session.begin_drag(0);
    session.update_position(PointerPoint { client_x: 40.0, client_y: 0.0 }, &container);
    session.end_drag();
    assert_eq!(session.positions().as_slice(), &[10.0, 50.0, 75.0]);

    session.reset();

    assert_eq!(session.positions().as_slice(), &[25.0, 50.0, 75.0]);
    assert!(session.results().is_empty());
    assert!(session.source().is_none());
}

#[test]
fn non_image_upload_is_rejected_without_touching_state() {
    let mut session = loaded_session("keep.png", 40, 20);
    session.confirm_split().unwrap();

    let pdf = ImageUpload::from_bytes("doc.png", "image/png", b"%PDF-1.7 fake".to_vec());
    let text = ImageUpload::from_bytes("notes.txt", "text/plain", gradient_png(4, 4));

    assert!(matches!(session.load_image(pdf), Err(SplitError::InvalidInput(_))));
    assert!(matches!(session.load_image(text), Err(SplitError::InvalidInput(_))));
    assert_eq!(session.source().map(|s| s.name()), Some("keep.png"));
    assert_eq!(session.results().len(), 4);
}

#[test]
fn results_use_download_file_names() {
    let mut session = loaded_session("holiday.photo.jpg", 40, 20);
    let names: Vec<String> = session
        .confirm_split()
        .unwrap()
        .iter()
        .map(|o| o.file_name("holiday.photo.jpg"))
        .collect();
    assert_eq!(
        names,
        vec![
            "holiday.photo_split_1.png",
            "holiday.photo_split_2.png",
            "holiday.photo_split_3.png",
            "holiday.photo_split_4.png"
        ]
    );
    assert!(session.results()[0].data_url().starts_with("data:image/png;base64,iVBOR"));
}

#[test]
fn json_events_drive_a_touch_drag() {
    let mut session = loaded_session("a.png", 400, 200);
    let events = [
        r#"{"type":"setOrientation","orientation":"horizontal"}"#,
        r#"{"type":"down","handle":2}"#,
        r#"{"type":"move","input":{"source":"touch","touches":[{"clientX":0,"clientY":20},{"clientX":0,"clientY":190}]},
            "container":{"left":0,"top":0,"width":400,"height":200}}"#,
        r#"{"type":"move","input":{"source":"touch","touches":[]},
            "container":{"left":0,"top":0,"width":400,"height":200}}"#,
        r#"{"type":"cancel"}"#,
    ];
    for raw in events {
        let event: EditorEvent = serde_json::from_str(raw).unwrap();
        session.dispatch(event);
    }

    assert_eq!(session.orientation(), Orientation::Horizontal);
    assert_eq!(session.positions().as_slice(), &[25.0, 50.0, 10.0]);

    let heights: Vec<u32> = session.confirm_split().unwrap().iter().map(|o| o.height).collect();
    assert_eq!(heights, vec![20, 30, 50, 100]);
}
