//! Visualization of extracted landmarks and distances.
//!
//! Rendering is independent of detection: every function here takes pixel-space data and draws it
//! onto a caller-provided [`Image`].

use crate::distance::{Distance, Point};
use crate::extract::LandmarkList;
use crate::hand::CONNECTIVITY;
use crate::image::{draw, Color, Image};

/// Diameter of the circles drawn by [`draw_landmarks`] and [`draw_distance`].
pub const POINT_DIAMETER: u32 = 15;

/// Draws the hand skeleton: a line for every connected landmark pair and a marker on every
/// landmark.
///
/// Empty lists draw nothing.
pub fn draw_hand(image: &mut Image, hand: &LandmarkList) {
    if hand.is_empty() {
        return;
    }

    for &(a, b) in CONNECTIVITY {
        let [ax, ay] = hand[a].position();
        let [bx, by] = hand[b].position();
        draw::line(image, ax, ay, bx, by).color(Color::GREEN);
    }
    for lm in hand {
        draw::marker(image, lm.x(), lm.y());
    }
}

/// Draws a filled circle on every landmark.
pub fn draw_landmarks(image: &mut Image, hand: &LandmarkList) {
    for lm in hand {
        draw::circle(image, lm.x(), lm.y(), POINT_DIAMETER)
            .filled()
            .color(Color::BLUE);
    }
}

/// Draws a distance measurement: a line between both endpoints, a circle on each endpoint, a
/// filled circle at the midpoint and the distance in pixels next to it.
pub fn draw_distance(image: &mut Image, distance: &Distance) {
    let (sx, sy) = to_pixel(distance.start());
    let (ex, ey) = to_pixel(distance.end());
    let (mx, my) = to_pixel(distance.midpoint());

    draw::line(image, sx, sy, ex, ey)
        .color(Color::MAGENTA)
        .stroke_width(3);
    for (x, y) in [(sx, sy), (ex, ey)] {
        draw::circle(image, x, y, POINT_DIAMETER)
            .filled()
            .color(Color::MAGENTA);
    }
    draw::circle(image, mx, my, POINT_DIAMETER)
        .filled()
        .color(Color::CYAN);

    let label = format!("{:.1}px", distance.distance());
    draw::text(image, mx, my - POINT_DIAMETER as i32, &label)
        .color(Color::WHITE)
        .align_bottom();
}

/// Pixel coordinates are clamped to `-MAX_COORD..=MAX_COORD` before rasterizing.
const MAX_COORD: f64 = (1 << 30) as f64;

fn to_pixel(p: Point) -> (i32, i32) {
    let clamp = |v: f64| v.round().clamp(-MAX_COORD, MAX_COORD) as i32;
    (clamp(p.x), clamp(p.y))
}

#[cfg(test)]
mod tests {
    use crate::distance::distance;
    use crate::extract::extract;
    use crate::hand::{DetectionResult, HandLandmarks, LandmarkIdx};
    use crate::image::Resolution;

    use super::*;

    fn canvas() -> Image {
        Image::filled(Resolution::new(100, 100), Color::BLACK)
    }

    fn hand_at(x: f32, y: f32) -> LandmarkList {
        let result = DetectionResult::new(vec![HandLandmarks::uniform(x, y)]);
        extract(&result, 100, 100, 0).unwrap()
    }

    #[test]
    fn empty_hand_draws_nothing() {
        let mut image = canvas();
        draw_hand(&mut image, &LandmarkList::empty());
        draw_landmarks(&mut image, &LandmarkList::empty());
        assert!(image.data().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn draws_landmarks() {
        let mut image = canvas();
        let hand = hand_at(0.5, 0.5);
        draw_landmarks(&mut image, &hand);
        assert_eq!(image.get(50, 50), Color::BLUE);
        assert_eq!(image.get(54, 50), Color::BLUE);
        assert_eq!(image.get(0, 0), Color::BLACK);
    }

    #[test]
    fn draws_hand_markers() {
        let mut image = canvas();
        let hand = hand_at(0.2, 0.8);
        assert_eq!(hand[LandmarkIdx::Wrist].position(), [20, 80]);
        draw_hand(&mut image, &hand);
        // All landmarks coincide, so the markers are drawn on top of the zero-length lines.
        assert_eq!(image.get(20, 80), Color::RED);
        assert_eq!(image.get(50, 50), Color::BLACK);
    }

    #[test]
    fn draws_distance() {
        let mut image = canvas();
        let d = distance([10.0, 50.0], [90.0, 50.0]).unwrap();
        draw_distance(&mut image, &d);
        assert_eq!(image.get(10, 50), Color::MAGENTA);
        assert_eq!(image.get(90, 50), Color::MAGENTA);
        assert_eq!(image.get(30, 50), Color::MAGENTA);
        assert_eq!(image.get(50, 50), Color::CYAN);
        assert_eq!(image.get(50, 95), Color::BLACK);
    }

    #[test]
    fn distance_off_canvas() {
        let mut image = canvas();
        let d = distance([-500.0, -500.0], [1e6, 1e6]).unwrap();
        draw_distance(&mut image, &d);
        assert_eq!(image.get(50, 50), Color::MAGENTA);
        assert_eq!(image.get(90, 10), Color::BLACK);

        let mut image = canvas();
        let d = distance([-1e12, 50.0], [1e12, 50.0]).unwrap();
        draw_distance(&mut image, &d);
        assert_eq!(image.get(0, 50), Color::CYAN);
        assert_eq!(image.get(30, 50), Color::MAGENTA);
        assert_eq!(image.get(99, 50), Color::MAGENTA);
        assert_eq!(image.get(50, 10), Color::BLACK);
    }
}
