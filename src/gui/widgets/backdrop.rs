//! Canvas behind the page: particles, orbs and the hero dice.

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme, mouse};

use super::{ACCENT, Message};
use crate::core::ambient::AmbientLayer;
use crate::core::ambient::dice::{CUBE_SIZE, Die};

const CAMERA_Z: f32 = 8.0;
/// Half of the vertical field of view, 45 degrees in total.
const HALF_FOV_TAN: f32 = 0.414;

pub fn backdrop(layer: &AmbientLayer) -> Element<'_, Message> {
    canvas::Canvas::new(Backdrop { layer })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

struct Backdrop<'a> {
    layer: &'a AmbientLayer,
}

impl canvas::Program<Message> for Backdrop<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        if self.layer.is_empty() {
            return vec![frame.into_geometry()];
        }

        let size = bounds.size();
        for orb in self.layer.orb_frames(size.width, size.height) {
            let center = Point::new(orb.center.x, orb.center.y);
            frame.fill(
                &Path::circle(center, orb.diameter / 2.0),
                Color {
                    a: orb.opacity * 0.12,
                    ..ACCENT
                },
            );
        }

        for particle in self.layer.particles().particles() {
            if particle.opacity <= 0.0 {
                continue;
            }
            let head = Point::new(
                particle.anchor.x * size.width + particle.offset.x,
                particle.anchor.y * size.height + particle.offset.y,
            );
            let angle = particle.tail_angle();
            let length = particle.tail_length();
            let tail = Point::new(head.x + angle.cos() * length, head.y + angle.sin() * length);
            frame.stroke(
                &Path::line(head, tail),
                Stroke::default()
                    .with_width(particle.size / 2.0)
                    .with_color(Color {
                        a: particle.opacity * 0.4,
                        ..ACCENT
                    }),
            );
            frame.fill(
                &Path::circle(head, particle.size / 2.0),
                Color {
                    a: particle.opacity,
                    ..ACCENT
                },
            );
        }

        if let Some(scene) = self.layer.dice().and_then(|dice| dice.mounted()) {
            for die in scene.dice() {
                draw_die(&mut frame, die, size);
            }
        }

        vec![frame.into_geometry()]
    }
}

fn draw_die(frame: &mut Frame, die: &Die, size: Size) {
    let [r, g, b] = die.protocol().color();
    let color = Color::from_rgb8(r, g, b);

    for (slot, opacity) in die.trail().points() {
        if let Some((point, scale)) = project(slot.position, size) {
            frame.fill(
                &Path::circle(point, 0.04 * scale),
                Color {
                    a: opacity.min(1.0),
                    ..color
                },
            );
        }
    }

    if let Some((center, scale)) = project(die.position, size) {
        let side = CUBE_SIZE * scale;
        // Spin shows up as a slowly turning square.
        let angle = die.rotation[2];
        let corners: [Point; 4] = std::array::from_fn(|k| {
            let theta = angle + FRAC_PI_4 + k as f32 * FRAC_PI_2;
            let radius = side * FRAC_1_SQRT_2;
            Point::new(center.x + theta.cos() * radius, center.y + theta.sin() * radius)
        });
        let outline = Path::new(|builder| {
            builder.move_to(corners[0]);
            for corner in &corners[1..] {
                builder.line_to(*corner);
            }
            builder.close();
        });
        frame.fill(&outline, Color { a: 0.85, ..color });
        let edge = if die.is_controlled() { ACCENT } else { Color::WHITE };
        frame.stroke(&outline, Stroke::default().with_width(1.5).with_color(edge));
    }
}

/// Perspective projection onto the canvas; `None` behind the camera.
fn project(position: [f32; 3], size: Size) -> Option<(Point, f32)> {
    let depth = CAMERA_Z - position[2];
    if depth <= 0.0 {
        return None;
    }
    let scale = size.height / (2.0 * HALF_FOV_TAN * depth);
    Some((
        Point::new(
            size.width / 2.0 + position[0] * scale,
            size.height / 2.0 - position[1] * scale,
        ),
        scale,
    ))
}
