use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::widget::operation::scroll_to;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{Id, column, container, scrollable, stack};
use iced::{Element, Event, Length, Subscription, Task, event, keyboard, mouse, window};

use super::{Message, sections, widgets};
use crate::config::FolioConfig;
use crate::core::content::ContentStore;
use crate::core::input::{Key, Point, Rect};
use crate::core::links::{self, DeepLink, SystemOpener};
use crate::core::page::{DiePointer, Effect, METRICS_TRIGGER, Page, PageEvent};

const INITIAL_SIZE: (f32, f32) = (1280.0, 800.0);
const FRAME: Duration = Duration::from_millis(16);
/// Where the metrics trigger sits in the header until layout reports it.
const TRIGGER_RECT: Rect = Rect::new(18.0, 900.0, 180.0, 40.0);

pub fn run(content: ContentStore, config: FolioConfig) -> iced::Result {
    let content = Arc::new(content);
    iced::application(
        move || FolioApp::new(content.clone(), config.clone()),
        FolioApp::update,
        FolioApp::view,
    )
    .title(FolioApp::title)
    .subscription(FolioApp::subscription)
    .window_size(iced::Size::new(INITIAL_SIZE.0, INITIAL_SIZE.1))
    .run()
}

pub struct FolioApp {
    page: Page,
    scroll_id: Id,
    cursor: Point,
}

impl FolioApp {
    fn new(content: Arc<ContentStore>, config: FolioConfig) -> (Self, Task<Message>) {
        let mut page = Page::new(content, config, INITIAL_SIZE);
        page.handle(PageEvent::MetricsTrigger(TRIGGER_RECT), Instant::now());
        (
            Self {
                page,
                scroll_id: Id::unique(),
                cursor: Point::default(),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        let personal = &self.page.content().personal;
        format!("{} - {}", personal.name, personal.title)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();
        let effects = match message {
            Message::Page(event) => {
                let mut effects = Vec::new();
                if moves_focus(&event) && self.page.focused() == Some(&METRICS_TRIGGER) {
                    effects.extend(self.page.handle(PageEvent::FocusChanged(None), now));
                }
                effects.extend(self.page.handle(event, now));
                effects
            }
            Message::Frame => self.page.handle(PageEvent::Frame, now),
            Message::Resized { width, height } => {
                self.page.handle(PageEvent::Resized { width, height }, now)
            }
            Message::Scrolled(offset) => self.page.handle(PageEvent::Scrolled { offset }, now),
            Message::KeyPressed(key) => self.page.handle(PageEvent::Key(key), now),
            Message::CursorMoved(position) => {
                self.cursor = position;
                self.steer_dice(now);
                Vec::new()
            }
            Message::PointerPressed => self.page.handle(PageEvent::PointerDown(self.cursor), now),
            Message::None => Vec::new(),
        };
        Task::batch(effects.into_iter().map(|effect| self.perform(effect)))
    }

    /// Controlled dice follow the cursor across the whole window.
    fn steer_dice(&mut self, now: Instant) {
        let Some(scene) = self.page.ambient().dice().and_then(|dice| dice.mounted()) else {
            return;
        };
        let controlled: Vec<_> = scene
            .dice()
            .iter()
            .filter(|die| die.is_controlled())
            .map(|die| die.protocol())
            .collect();
        let Some(ndc) = to_ndc(self.cursor, self.page.viewport()) else {
            return;
        };
        for protocol in controlled {
            self.page.handle(PageEvent::Die(protocol, DiePointer::Move(ndc)), now);
        }
    }

    fn perform(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ScrollTo { offset } => {
                scroll_to(self.scroll_id.clone(), AbsoluteOffset { x: 0.0, y: offset })
            }
            Effect::Open(link) => open_link(link),
            // Focus lives in the page model; the view highlights it.
            Effect::Focus(_) => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let page = &self.page;
        let body = column![
            sections::hero(page),
            sections::skills(page),
            sections::projects(page),
            sections::research(page),
            sections::awards(page),
            sections::contact(page),
            sections::footer(page),
        ];

        let scroll = scrollable(body)
            .id(self.scroll_id.clone())
            .on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset().y))
            .height(Length::Fill);

        let mut layers = stack![
            widgets::backdrop(page.ambient()),
            column![sections::header(page), scroll],
        ];
        if let Some(panel) = widgets::metrics_panel(page) {
            layers = layers.push(panel);
        }
        if page.drawer().is_open() {
            layers = layers.push(sections::drawer(page));
        }
        if let Some(modal) = sections::case_study(page) {
            layers = layers.push(modal);
        }

        container(layers)
            .style(widgets::page_background)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(FRAME).map(|_| Message::Frame),
            event::listen_with(translate_event),
        ])
    }
}

fn translate_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::CursorMoved(Point::new(position.x, position.y)))
        }
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            if status == event::Status::Ignored =>
        {
            Some(Message::PointerPressed)
        }
        Event::Window(window::Event::Resized(size)) => Some(Message::Resized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            let key = match key.as_ref() {
                keyboard::Key::Named(keyboard::key::Named::Escape) => Key::Escape,
                keyboard::Key::Named(keyboard::key::Named::Tab) => Key::Tab {
                    shift: modifiers.shift(),
                },
                keyboard::Key::Named(keyboard::key::Named::Enter) => Key::Enter,
                keyboard::Key::Named(keyboard::key::Named::Space) => Key::Space,
                _ => return None,
            };
            Some(Message::KeyPressed(key))
        }
        _ => None,
    }
}

/// Window position to normalized device coordinates, y pointing up.
fn to_ndc(cursor: Point, (width, height): (f32, f32)) -> Option<Point> {
    (width > 0.0 && height > 0.0).then(|| {
        Point::new(cursor.x / width * 2.0 - 1.0, 1.0 - cursor.y / height * 2.0)
    })
}

/// Activating another control takes focus away from the metrics trigger.
fn moves_focus(event: &PageEvent) -> bool {
    matches!(
        event,
        PageEvent::Navigate(_)
            | PageEvent::ToggleDrawer
            | PageEvent::HireMe
            | PageEvent::BackToTop
            | PageEvent::FollowLink(_)
            | PageEvent::OpenProject(_)
            | PageEvent::DiscussProject
            | PageEvent::SkillPressed { .. }
            | PageEvent::ContactInput(..)
            | PageEvent::ContactSubmit
    )
}

fn open_link(link: DeepLink) -> Task<Message> {
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || links::follow(&SystemOpener, &link))
                .await
                .ok()
        },
        |_| Message::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Anchor;

    #[test]
    fn cursor_maps_to_device_coordinates() {
        let viewport = (1280.0, 800.0);
        assert_eq!(to_ndc(Point::new(640.0, 400.0), viewport), Some(Point::new(0.0, 0.0)));
        assert_eq!(to_ndc(Point::new(0.0, 0.0), viewport), Some(Point::new(-1.0, 1.0)));
        assert_eq!(to_ndc(Point::new(1280.0, 800.0), viewport), Some(Point::new(1.0, -1.0)));
        assert_eq!(to_ndc(Point::new(10.0, 10.0), (0.0, 800.0)), None);
    }

    #[test]
    fn controls_take_focus_but_hover_does_not() {
        assert!(moves_focus(&PageEvent::Navigate(Anchor::new("#skills"))));
        assert!(moves_focus(&PageEvent::ContactSubmit));
        assert!(!moves_focus(&PageEvent::MetricsLeave));
        assert!(!moves_focus(&PageEvent::Key(Key::Enter)));
        assert!(!moves_focus(&PageEvent::FocusChanged(Some(METRICS_TRIGGER))));
    }

    #[test]
    fn wheel_down_scrolls_forward() {
        let message = widgets::wheel(mouse::ScrollDelta::Lines { x: 0.0, y: -1.0 });
        assert!(matches!(
            message,
            Message::Page(PageEvent::Wheel { delta }) if delta == 40.0
        ));
    }
}
