use super::*;
use Color as C;

fn mkimage<const W: usize, const H: usize>(data: [[Color; W]; H]) -> Image {
    let data = data
        .into_iter()
        .flat_map(|row| row.into_iter())
        .flat_map(|col| col.0)
        .collect::<Vec<_>>();
    Image::from_rgba8(Resolution::new(W as u32, H as u32), &data)
}

#[test]
fn from_rgba8_is_row_major() {
    let image = mkimage([[C::YELLOW, C::WHITE, C::RED], [C::BLUE, C::GREEN, C::BLACK]]);
    assert_eq!(image.resolution(), Resolution::new(3, 2));
    assert_eq!(image.get(0, 0), C::YELLOW);
    assert_eq!(image.get(2, 0), C::RED);
    assert_eq!(image.get(0, 1), C::BLUE);
    assert_eq!(image.get(2, 1), C::BLACK);
    assert_eq!(image.data().len(), 3 * 2 * 4);
}

#[test]
#[should_panic(expected = "incorrect buffer size")]
fn from_rgba8_wrong_size() {
    Image::from_rgba8(Resolution::new(2, 2), &[0; 15]);
}

#[test]
fn new_is_transparent() {
    let image = Image::new(2, 2);
    assert_eq!(image.get(1, 1), C::NULL);
    assert_eq!(format!("{image:?}"), "2x2 Image");
}

#[test]
fn clear() {
    let mut image = Image::filled(Resolution::new(2, 2), C::WHITE);
    assert_eq!(image.get(1, 0), C::WHITE);
    image.clear(C::MAGENTA);
    assert!(image.data().chunks(4).all(|px| px == [255, 0, 255, 255]));
}

#[test]
fn color() {
    let c = Color::from_rgb8(1, 2, 3).with_alpha(4);
    assert_eq!([c.r(), c.g(), c.b(), c.a()], [1, 2, 3, 4]);
    assert_eq!(c[2], 3);
    assert_eq!(format!("{c:?}"), "#01020304");
}

#[test]
fn resolution() {
    assert_eq!(Resolution::RES_VGA.to_string(), "640x480");
    assert_eq!(Resolution::RES_720P.num_pixels(), 1280 * 720);
}
