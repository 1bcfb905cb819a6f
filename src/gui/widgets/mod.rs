mod backdrop;

use std::time::Instant;

use iced::widget::text::IntoFragment;
use iced::widget::{Container, Space, Text, button, column, container, mouse_area, row, text};
use iced::{Background, Border, Color, Element, Length, Padding, Theme, mouse};

pub use backdrop::backdrop;

use super::Message;
use crate::core::ambient::chip::{ChipKind, MiniChip};
use crate::core::boundary::Contained;
use crate::core::input::{Point, Rect};
use crate::core::page::{Page, PageEvent};
use crate::models::SectionId;

pub const ACCENT: Color = Color::from_rgb(0.0, 1.0, 0.82);
const MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.6);
const HIDDEN: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.08);
const BACKGROUND: Color = Color::from_rgb(0.04, 0.04, 0.06);

pub fn page_background(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        text_color: Some(Color::WHITE),
        ..container::Style::default()
    }
}

/// Frosted card.
pub fn glass<'a>(content: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    container(content).style(|_theme: &Theme| container::Style {
        background: Some(Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.05))),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.12),
            width: 1.0,
            radius: 12.0.into(),
        },
        ..container::Style::default()
    })
}

pub fn muted<'a>(content: impl IntoFragment<'a>) -> Text<'a> {
    text(content).color(MUTED)
}

/// Darkens everything below an overlay.
pub fn scrim() -> Container<'static, Message> {
    container(Space::new())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
            ..container::Style::default()
        })
}

const WHEEL_LINE: f32 = 40.0;

/// Wheel input over an overlay goes to the page, which drops it while scrolling is locked.
pub fn wheel(delta: mouse::ScrollDelta) -> Message {
    let y = match delta {
        mouse::ScrollDelta::Lines { y, .. } => y * WHEEL_LINE,
        mouse::ScrollDelta::Pixels { y, .. } => y,
    };
    Message::Page(PageEvent::Wheel { delta: -y })
}

/// A page section. Text stays faint until the section has been revealed.
pub fn section<'a>(
    page: &'a Page,
    id: SectionId,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let revealed = page.reveal().is_visible(id);
    container(content)
        .padding([80, 48])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            text_color: (!revealed).then_some(HIDDEN),
            ..container::Style::default()
        })
        .into()
}

/// Skill pill that ripples when pressed.
pub fn skill_button<'a>(page: &'a Page, skill: &'a str) -> Element<'a, Message> {
    // Layout positions are not reported back, so the ripple is sized from
    // the label and centered.
    let bounds = Rect::new(0.0, 0.0, skill.len() as f32 * 8.0 + 24.0, 32.0);
    let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);

    let now = Instant::now();
    let strength = page
        .ripples(skill)
        .and_then(|buffer| {
            buffer
                .active()
                .map(|ripple| 1.0 - ripple.progress(now))
                .reduce(f32::max)
        })
        .unwrap_or(0.0);

    button(text(skill).size(14))
        .padding([6, 12])
        .style(move |theme: &Theme, status| {
            let mut style = button::secondary(theme, status);
            if strength > 0.0 {
                style.background = Some(Background::Color(Color {
                    a: 0.5 * strength,
                    ..ACCENT
                }));
            }
            style
        })
        .on_press(Message::Page(PageEvent::SkillPressed {
            skill: skill.to_string(),
            button: bounds,
            at: center,
        }))
        .into()
}

/// Compact readout of a project's chip, or its still image.
pub fn chip_badge(chip: &Contained<MiniChip>) -> Element<'_, Message> {
    match chip {
        Contained::Mounted(chip) => {
            let label = match chip.kind() {
                ChipKind::Processor => "CPU",
                ChipKind::Memory => "MEM",
                ChipKind::Protocol => "BUS",
            };
            let mut badge = row![
                text(label).size(12).color(Color {
                    a: 0.6 + chip.glow,
                    ..ACCENT
                }),
                muted(format!("{:>3.0}°", chip.rotation.to_degrees())).size(12),
            ]
            .spacing(6);
            for lane in chip.lanes() {
                badge = badge.push(text("•").size(12).color(Color {
                    a: lane.opacity,
                    ..ACCENT
                }));
            }
            badge.into()
        }
        Contained::Fallback(illustration) => muted(illustration.name).size(12).into(),
    }
}

/// The live-metrics panel, placed under its trigger while visible.
pub fn metrics_panel(page: &Page) -> Option<Element<'_, Message>> {
    let placement = page.dropdown().placement()?;

    let mut stats = column![text("Live Metrics").size(16).color(ACCENT)].spacing(8);
    for stat in &page.content().hero_stats {
        stats = stats.push(row![text(&stat.value).color(ACCENT), muted(&stat.label)].spacing(12));
    }
    let width = Length::Fixed(placement.rendered_width());
    let panel = mouse_area(glass(stats.padding(16)).width(width))
        .on_enter(Message::Page(PageEvent::MetricsEnter))
        .on_exit(Message::Page(PageEvent::MetricsLeave));

    Some(
        container(panel)
            .padding(Padding {
                top: placement.top,
                left: placement.left,
                ..Padding::ZERO
            })
            .into(),
    )
}
