//! The page shell: every interactive component behind one event entry point.
//!
//! A renderer feeds [`PageEvent`]s with the time they happened and carries out
//! the returned [`Effect`]s (scrolling, opening links, moving focus). The page
//! itself never touches a window.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use time::OffsetDateTime;

use crate::config::FolioConfig;
use crate::core::ambient::chip::{ChipKind, MiniChip};
use crate::core::ambient::dice::Protocol;
use crate::core::ambient::ripple::RippleBuffer;
use crate::core::ambient::{AmbientLayer, MotionPreference};
use crate::core::boundary::{Contained, GraphicsSupport};
use crate::core::case_study::CaseStudy;
use crate::core::contact::{ContactField, ContactForm};
use crate::core::content::ContentStore;
use crate::core::drawer::NavDrawer;
use crate::core::dropdown::Dropdown;
use crate::core::focus::FocusId;
use crate::core::header::{Breakpoint, Header};
use crate::core::input::{Key, Point, Rect};
use crate::core::links::{DeepLink, MailtoLink};
use crate::core::modal::ModalOutcome;
use crate::core::reveal::{Extent, RevealTracker};
use crate::core::scroll_lock::ScrollLock;
use crate::error::ContactError;
use crate::models::{Anchor, ProjectId, SectionId};

pub const METRICS_TRIGGER: FocusId = FocusId::fixed("metrics-trigger");
const BUS_PROTOCOL_CATEGORY: &str = "Bus Protocol Verification";

/// Section heights used until the renderer reports measured ones.
const NOMINAL_HEIGHTS: [(SectionId, f32); 6] = [
    (SectionId::Hero, 900.0),
    (SectionId::Skills, 1000.0),
    (SectionId::Projects, 1400.0),
    (SectionId::Research, 1000.0),
    (SectionId::Awards, 800.0),
    (SectionId::Contact, 1100.0),
];
const NOMINAL_FOOTER: f32 = 600.0;

pub fn contact_focus(field: ContactField) -> FocusId {
    FocusId::new(format!("contact-{}", field.key()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Resized { width: f32, height: f32 },
    /// The renderer's scroll position changed.
    Scrolled { offset: f32 },
    /// Wheel or touch scroll input on the page background.
    Wheel { delta: f32 },
    Key(Key),
    FocusChanged(Option<FocusId>),
    PointerDown(Point),

    Navigate(Anchor),
    ToggleDrawer,
    DrawerBackdrop,
    HireMe,
    BackToTop,
    FollowLink(DeepLink),

    MetricsTrigger(Rect),
    MetricsEnter,
    MetricsLeave,
    MetricsTouch,
    MetricsPanelHeight(f32),

    OpenProject(ProjectId),
    CloseProject,
    ModalBackdrop,
    DiscussProject,
    CardHover { project: ProjectId, hovered: bool },

    SkillPressed { skill: String, button: Rect, at: Point },
    Die(Protocol, DiePointer),

    ContactInput(ContactField, String),
    ContactSubmit,

    SectionMeasured(SectionId, Extent),
    Frame,
}

/// Pointer input aimed at one of the hero dice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiePointer {
    Enter,
    Leave,
    /// Pointer position in normalized device coordinates.
    Move(Point),
    Down,
    Up,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScrollTo { offset: f32 },
    Open(DeepLink),
    Focus(FocusId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub name: String,
    pub link: DeepLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterGroup {
    pub title: &'static str,
    pub links: Vec<FooterLink>,
}

#[derive(Debug)]
pub struct Page {
    content: Arc<ContentStore>,
    config: FolioConfig,
    lock: ScrollLock,
    header: Header,
    drawer: NavDrawer,
    dropdown: Dropdown,
    metrics_trigger: Rect,
    case_study: CaseStudy,
    reveal: RevealTracker,
    contact: ContactForm,
    ambient: AmbientLayer,
    chips: BTreeMap<ProjectId, Contained<MiniChip>>,
    ripples: BTreeMap<String, RippleBuffer>,
    layout: BTreeMap<SectionId, Extent>,
    viewport: (f32, f32),
    breakpoint: Breakpoint,
    scroll_offset: f32,
    focused: Option<FocusId>,
    last_frame: Option<Instant>,
}

impl Page {
    pub fn new(content: Arc<ContentStore>, config: FolioConfig, viewport: (f32, f32)) -> Self {
        let lock = ScrollLock::new();
        let breakpoint = Breakpoint::with_limit(viewport.0, config.layout.mobile_breakpoint);
        let ambient = AmbientLayer::mount(
            breakpoint,
            config.ambient.motion(),
            config.ambient.graphics,
            config.ambient.seed_or_random(),
        );
        let chips = mount_chips(&content, config.ambient.graphics);

        let mut page = Self {
            header: Header::new(config.layout.scrolled_threshold),
            drawer: NavDrawer::new(lock.clone()),
            dropdown: Dropdown::new(config.dropdown),
            metrics_trigger: Rect::default(),
            case_study: CaseStudy::new(lock.clone(), config.modal),
            reveal: RevealTracker::new(config.reveal.threshold),
            contact: ContactForm::default(),
            ambient,
            chips,
            ripples: BTreeMap::new(),
            layout: nominal_layout(),
            viewport,
            breakpoint,
            scroll_offset: 0.0,
            focused: None,
            last_frame: None,
            content,
            config,
            lock,
        };
        page.observe_reveal();
        page
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn drawer(&self) -> &NavDrawer {
        &self.drawer
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn case_study(&self) -> &CaseStudy {
        &self.case_study
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn ambient(&self) -> &AmbientLayer {
        &self.ambient
    }

    pub fn ambient_mut(&mut self) -> &mut AmbientLayer {
        &mut self.ambient
    }

    pub fn chip(&self, project: &ProjectId) -> Option<&Contained<MiniChip>> {
        self.chips.get(project)
    }

    pub fn ripples(&self, skill: &str) -> Option<&RippleBuffer> {
        self.ripples.get(skill)
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn focused(&self) -> Option<&FocusId> {
        self.focused.as_ref()
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn metrics_trigger(&self) -> Rect {
        self.metrics_trigger
    }

    /// Offset that brings `anchor` to the top of the viewport.
    pub fn anchor_offset(&self, anchor: &Anchor) -> Option<f32> {
        let section = anchor.section()?;
        self.layout.get(&section).map(|extent| extent.top)
    }

    fn max_scroll(&self) -> f32 {
        let bottom = self
            .layout
            .values()
            .map(|extent| extent.top + extent.height)
            .fold(0.0, f32::max)
            + NOMINAL_FOOTER;
        (bottom - self.viewport.1).max(0.0)
    }

    pub fn handle(&mut self, event: PageEvent, now: Instant) -> Vec<Effect> {
        tracing::trace!(?event, "page event");
        match event {
            PageEvent::Resized { width, height } => {
                self.resize(width, height);
                Vec::new()
            }
            PageEvent::Scrolled { offset } => {
                self.scrolled(offset);
                Vec::new()
            }
            PageEvent::Wheel { delta } => {
                if self.lock.is_locked() {
                    tracing::trace!(delta, "wheel ignored while scroll is locked");
                    return Vec::new();
                }
                let offset = (self.scroll_offset + delta).clamp(0.0, self.max_scroll());
                self.scroll_to(offset)
            }
            PageEvent::Key(key) => self.key(key, now),
            PageEvent::FocusChanged(id) => {
                self.focus_changed(id, now);
                Vec::new()
            }
            PageEvent::PointerDown(at) => {
                self.pointer_down(at, now);
                Vec::new()
            }

            PageEvent::Navigate(anchor) => self.navigate(&anchor),
            PageEvent::ToggleDrawer => {
                self.drawer.toggle();
                Vec::new()
            }
            PageEvent::DrawerBackdrop => {
                self.drawer.close();
                Vec::new()
            }
            PageEvent::HireMe => {
                let anchor = self.drawer.hire_me();
                self.navigate(&anchor)
            }
            PageEvent::BackToTop => self.scroll_to(0.0),
            PageEvent::FollowLink(link) => self.follow(link),

            PageEvent::MetricsTrigger(rect) => {
                self.metrics_trigger = rect;
                self.dropdown.reposition(rect);
                Vec::new()
            }
            PageEvent::MetricsEnter => {
                self.dropdown.pointer_enter(self.metrics_trigger);
                Vec::new()
            }
            PageEvent::MetricsLeave => {
                self.dropdown.pointer_leave(now);
                Vec::new()
            }
            PageEvent::MetricsTouch => {
                self.dropdown.touch_start(self.metrics_trigger);
                Vec::new()
            }
            PageEvent::MetricsPanelHeight(height) => {
                self.dropdown.set_panel_height(height);
                Vec::new()
            }

            PageEvent::OpenProject(id) => self.open_project(&id, now),
            PageEvent::CloseProject => {
                let outcome = self.case_study.close(now);
                self.modal_outcome(outcome)
            }
            PageEvent::ModalBackdrop => {
                let outcome = self.case_study.backdrop_click(now);
                self.modal_outcome(outcome)
            }
            PageEvent::DiscussProject => {
                let link = self.content.discuss_project_link();
                self.follow(link)
            }
            PageEvent::CardHover { project, hovered } => {
                if let Some(chip) = self.chips.get_mut(&project).and_then(Contained::mounted_mut) {
                    chip.set_hovered(hovered);
                }
                Vec::new()
            }

            PageEvent::SkillPressed { skill, button, at } => {
                if self.ambient.motion() == MotionPreference::Full {
                    self.ripples.entry(skill).or_default().spawn(button, at, now);
                }
                Vec::new()
            }

            PageEvent::Die(protocol, pointer) => {
                self.die_pointer(protocol, pointer, now);
                Vec::new()
            }

            PageEvent::ContactInput(field, value) => {
                self.contact.set(field, value);
                Vec::new()
            }
            PageEvent::ContactSubmit => self.submit_contact(),

            PageEvent::SectionMeasured(section, extent) => {
                self.layout.insert(section, extent);
                self.observe_reveal();
                Vec::new()
            }
            PageEvent::Frame => {
                self.frame(now);
                Vec::new()
            }
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        let breakpoint = Breakpoint::with_limit(width, self.config.layout.mobile_breakpoint);
        if breakpoint != self.breakpoint {
            tracing::debug!(?breakpoint, width, "breakpoint changed");
            self.breakpoint = breakpoint;
            if !breakpoint.is_mobile() {
                self.drawer.on_desktop();
            }
            self.ambient.resize(breakpoint);
        }
        self.dropdown.reposition(self.metrics_trigger);
        self.observe_reveal();
    }

    fn scrolled(&mut self, offset: f32) {
        self.scroll_offset = offset;
        self.header.on_scroll(offset);
        self.observe_reveal();
    }

    fn scroll_to(&mut self, offset: f32) -> Vec<Effect> {
        self.scrolled(offset);
        vec![Effect::ScrollTo { offset }]
    }

    fn observe_reveal(&mut self) {
        self.reveal.observe_viewport(
            self.scroll_offset,
            self.viewport.1,
            self.layout.iter().map(|(id, extent)| (*id, extent)),
        );
    }

    fn navigate(&mut self, anchor: &Anchor) -> Vec<Effect> {
        self.drawer.close();
        match self.anchor_offset(anchor) {
            Some(offset) => self.scroll_to(offset),
            None => {
                tracing::warn!(%anchor, "navigation to unknown anchor");
                Vec::new()
            }
        }
    }

    fn follow(&mut self, link: DeepLink) -> Vec<Effect> {
        match link {
            DeepLink::Anchor(anchor) => self.navigate(&anchor),
            other => vec![Effect::Open(other)],
        }
    }

    fn key(&mut self, key: Key, now: Instant) -> Vec<Effect> {
        if key == Key::Escape {
            self.dropdown.key(key, self.metrics_trigger);
            if self.focused.as_ref() == Some(&METRICS_TRIGGER) {
                self.focused = None;
            }
        }

        if self.case_study.modal().is_open() {
            let outcome = self.case_study.handle_key(key, now);
            return self.modal_outcome(outcome);
        }

        match key {
            Key::Escape if self.drawer.is_open() => self.drawer.close(),
            Key::Enter | Key::Space if self.focused.as_ref() == Some(&METRICS_TRIGGER) => {
                self.dropdown.key(key, self.metrics_trigger);
            }
            _ => {}
        }
        Vec::new()
    }

    /// A press outside trigger and panel dismisses the panel and blurs the trigger.
    fn pointer_down(&mut self, at: Point, now: Instant) {
        let inside = self.metrics_trigger.contains(at)
            || self.dropdown.panel_rect().is_some_and(|rect| rect.contains(at));
        self.dropdown.pointer_down(at, self.metrics_trigger);
        if !inside && self.focused.as_ref() == Some(&METRICS_TRIGGER) {
            self.focus_changed(None, now);
        }
    }

    fn focus_changed(&mut self, id: Option<FocusId>, now: Instant) {
        let was_trigger = self.focused.as_ref() == Some(&METRICS_TRIGGER);
        let is_trigger = id.as_ref() == Some(&METRICS_TRIGGER);
        if is_trigger && !was_trigger {
            self.dropdown.focus(self.metrics_trigger);
        } else if was_trigger && !is_trigger {
            self.dropdown.blur(now);
        }
        if let Some(id) = &id {
            if self.case_study.modal().is_open() {
                self.case_study.focus(id.clone());
            }
        }
        self.focused = id;
    }

    fn open_project(&mut self, id: &ProjectId, now: Instant) -> Vec<Effect> {
        let Some(project) = self.content.project(id).cloned() else {
            tracing::warn!(project = %id, "no such project");
            return Vec::new();
        };
        let focus = self
            .case_study
            .select(&project, self.focused.clone(), now);
        self.focused = Some(focus.clone());
        vec![Effect::Focus(focus)]
    }

    /// Track focus moves requested by the case-study modal.
    fn modal_outcome(&mut self, outcome: ModalOutcome) -> Vec<Effect> {
        let target = match outcome {
            ModalOutcome::Ignored => return Vec::new(),
            ModalOutcome::Focus(id) => Some(id),
            ModalOutcome::Closed { restore } => restore,
        };
        match target {
            Some(id) => {
                self.focused = Some(id.clone());
                vec![Effect::Focus(id)]
            }
            None => {
                self.focused = None;
                Vec::new()
            }
        }
    }

    fn die_pointer(&mut self, protocol: Protocol, pointer: DiePointer, now: Instant) {
        let Some(scene) = self.ambient.dice_mut() else {
            return;
        };
        match pointer {
            DiePointer::Enter => scene.die_mut(protocol).pointer_enter(now),
            DiePointer::Leave => scene.die_mut(protocol).pointer_leave(now),
            DiePointer::Move(ndc) => scene.die_mut(protocol).pointer_move(ndc, now),
            DiePointer::Down => scene.die_mut(protocol).pointer_down(now),
            DiePointer::Up => {
                scene.pointer_up(protocol, now);
            }
        }
    }

    fn submit_contact(&mut self) -> Vec<Effect> {
        match self.contact.submit(&self.content.personal.email) {
            Ok(link) => vec![Effect::Open(DeepLink::Mail(link))],
            Err(ContactError::MissingField(field)) => {
                tracing::debug!(%field, "contact form incomplete");
                let focus = contact_focus(field);
                self.focused = Some(focus.clone());
                vec![Effect::Focus(focus)]
            }
        }
    }

    fn frame(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32())
            .min(0.1);
        self.last_frame = Some(now);

        self.dropdown.tick(now);
        self.case_study.tick(now);
        for buffer in self.ripples.values_mut() {
            buffer.expire(now);
        }
        self.ripples.retain(|_, buffer| buffer.active().next().is_some());

        if self.ambient.motion() == MotionPreference::Full {
            self.ambient.step(dt, now);
            for chip in self.chips.values_mut().filter_map(Contained::mounted_mut) {
                chip.step(dt);
            }
        }
    }

    /// Footer link groups: navigation, connect, resources.
    pub fn footer_groups(&self) -> Vec<FooterGroup> {
        let navigation = self
            .content
            .navigation
            .iter()
            .map(|entry| FooterLink {
                name: entry.name.clone(),
                link: DeepLink::Anchor(entry.href.clone()),
            })
            .collect();
        let email = &self.content.personal.email;
        vec![
            FooterGroup {
                title: "Navigation",
                links: navigation,
            },
            FooterGroup {
                title: "Connect",
                links: vec![
                    FooterLink {
                        name: "Email".into(),
                        link: DeepLink::Mail(MailtoLink::new(email)),
                    },
                    FooterLink {
                        name: "LinkedIn".into(),
                        link: self.content.profile_link(),
                    },
                    FooterLink {
                        name: "Resume".into(),
                        link: self.content.resume_link(),
                    },
                ],
            },
            FooterGroup {
                title: "Resources",
                links: vec![
                    FooterLink {
                        name: "Case Studies".into(),
                        link: DeepLink::Anchor(SectionId::Projects.anchor()),
                    },
                    FooterLink {
                        name: "Research Papers".into(),
                        link: DeepLink::Anchor(SectionId::Research.anchor()),
                    },
                ],
            },
        ]
    }

    pub fn copyright(&self) -> String {
        format!("© {} {}", copyright_year(), self.content.personal.name)
    }
}

/// Current year in local time, UTC when the offset is unknown.
pub fn copyright_year() -> i32 {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .year()
}

fn nominal_layout() -> BTreeMap<SectionId, Extent> {
    let mut top = 0.0;
    NOMINAL_HEIGHTS
        .into_iter()
        .map(|(id, height)| {
            let extent = Extent { top, height };
            top += height;
            (id, extent)
        })
        .collect()
}

fn mount_chips(
    content: &ContentStore,
    graphics: GraphicsSupport,
) -> BTreeMap<ProjectId, Contained<MiniChip>> {
    content
        .projects
        .iter()
        .enumerate()
        .filter_map(|(index, project)| {
            let protocol = project.category == BUS_PROTOCOL_CATEGORY;
            (index == 0 || protocol).then(|| {
                let kind = if protocol {
                    ChipKind::Protocol
                } else {
                    ChipKind::Processor
                };
                let chip =
                    Contained::mount_3d("project chip", graphics, || Ok(MiniChip::new(kind)));
                (project.id.clone(), chip)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AmbientConfig;
    use crate::core::case_study::CONTACT_FOCUS;

    fn page() -> Page {
        let config = FolioConfig {
            ambient: AmbientConfig {
                seed: Some(1),
                ..AmbientConfig::default()
            },
            ..FolioConfig::default()
        };
        Page::new(Arc::new(ContentStore::builtin().clone()), config, (1280.0, 800.0))
    }

    #[test]
    fn hero_is_revealed_at_mount() {
        let page = page();
        assert!(page.reveal().is_visible(SectionId::Hero));
        assert!(!page.reveal().is_visible(SectionId::Contact));
    }

    #[test]
    fn navigation_scrolls_to_section() {
        let mut page = page();
        let effects = page.handle(PageEvent::Navigate(Anchor::new("#projects")), Instant::now());
        assert_eq!(effects, vec![Effect::ScrollTo { offset: 1900.0 }]);
        assert!(page.reveal().is_visible(SectionId::Projects));
        assert!(page.header().is_scrolled());
    }

    #[test]
    fn wheel_is_ignored_while_locked() {
        let mut page = page();
        let now = Instant::now();
        page.handle(PageEvent::ToggleDrawer, now);
        assert!(page.is_scroll_locked());
        assert!(page.handle(PageEvent::Wheel { delta: 120.0 }, now).is_empty());
        page.handle(PageEvent::DrawerBackdrop, now);
        assert_eq!(
            page.handle(PageEvent::Wheel { delta: 120.0 }, now),
            vec![Effect::ScrollTo { offset: 120.0 }]
        );
    }

    #[test]
    fn missing_contact_field_moves_focus() {
        let mut page = page();
        let effects = page.handle(PageEvent::ContactSubmit, Instant::now());
        assert_eq!(effects, vec![Effect::Focus(contact_focus(ContactField::Name))]);
    }

    #[test]
    fn discuss_project_opens_mail() {
        let mut page = page();
        let effects = page.handle(PageEvent::DiscussProject, Instant::now());
        assert!(matches!(effects.as_slice(), [Effect::Open(DeepLink::Mail(_))]));
    }

    #[test]
    fn footer_has_three_groups() {
        let page = page();
        let titles: Vec<_> = page.footer_groups().iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Navigation", "Connect", "Resources"]);
        assert!(page.copyright().contains(&page.content().personal.name));
    }

    #[test]
    fn contact_focus_ids() {
        assert_eq!(contact_focus(ContactField::Email).as_str(), "contact-email");
        assert_ne!(CONTACT_FOCUS, contact_focus(ContactField::Message));
    }
}
