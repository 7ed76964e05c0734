use super::*;

#[test]
fn new_validates_buffer_length() {
    assert!(PixelImage::new(2, 2, vec![0u8; 16]).is_ok());
    assert!(PixelImage::new(2, 2, vec![0u8; 15]).is_err());
    assert!(PixelImage::new(0, 0, Vec::new()).is_ok());
}

#[test]
fn solid_fills_every_pixel() {
    let img = PixelImage::solid(2, 3, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    assert_eq!(img.width(), 2);
    assert_eq!(img.height(), 3);
    assert_eq!(img.pixels().len(), 24);
    for px in img.pixels().chunks_exact(4) {
        assert_eq!(px, &[255, 0, 0, 255]);
    }
}

#[test]
fn pixel_at_reads_row_major() {
    let bytes = vec![
        1, 1, 1, 10, 2, 2, 2, 20, //
        3, 3, 3, 30, 4, 4, 4, 40,
    ];
    let img = PixelImage::new(2, 2, bytes).unwrap();
    assert_eq!(img.pixel_at(0, 0), [1, 1, 1, 10]);
    assert_eq!(img.pixel_at(1, 0), [2, 2, 2, 20]);
    assert_eq!(img.pixel_at(0, 1), [3, 3, 3, 30]);
    assert_eq!(img.pixel_at(1, 1), [4, 4, 4, 40]);
}

#[test]
fn pixel_at_outside_is_transparent() {
    let img = PixelImage::solid(2, 2, Rgba8Premul::from_straight_rgba(9, 9, 9, 255));
    assert_eq!(img.pixel_at(-1, 0), [0, 0, 0, 0]);
    assert_eq!(img.pixel_at(0, -1), [0, 0, 0, 0]);
    assert_eq!(img.pixel_at(2, 0), [0, 0, 0, 0]);
    assert_eq!(img.pixel_at(0, 2), [0, 0, 0, 0]);
}

#[test]
fn zero_sized_image_reports_no_dimensions() {
    let img = PixelImage::new(0, 0, Vec::new()).unwrap();
    assert!(!img.has_dimensions());
    let img = PixelImage::solid(1, 1, Rgba8Premul::transparent());
    assert!(img.has_dimensions());
}

#[test]
fn clone_shares_pixel_storage() {
    let a = PixelImage::solid(4, 4, Rgba8Premul::from_straight_rgba(1, 2, 3, 255));
    let b = a.clone();
    assert!(std::ptr::eq(a.pixels().as_ptr(), b.pixels().as_ptr()));
}
