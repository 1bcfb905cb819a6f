//! One view function per page section, top to bottom.

use iced::widget::{Space, button, column, container, mouse_area, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::Message;
use super::widgets::{self, ACCENT, glass, muted, section};
use crate::core::contact::ContactField;
use crate::core::links::{DeepLink, MailtoLink};
use crate::core::page::{DiePointer, METRICS_TRIGGER, Page, PageEvent, contact_focus};
use crate::models::SectionId;

pub fn header(page: &Page) -> Element<'_, Message> {
    let content = page.content();
    let logo = button(text(content.personal.initials()).size(22))
        .style(button::text)
        .on_press(Message::Page(PageEvent::BackToTop));

    let nav: Element<'_, Message> = if page.breakpoint().is_mobile() {
        button(text(if page.drawer().is_open() { "Close" } else { "Menu" }))
            .on_press(Message::Page(PageEvent::ToggleDrawer))
            .into()
    } else {
        let mut links = row![].spacing(18).align_y(Alignment::Center);
        for entry in &content.navigation {
            links = links.push(
                button(text(&entry.name))
                    .style(button::text)
                    .on_press(Message::Page(PageEvent::Navigate(entry.href.clone()))),
            );
        }
        links
            .push(
                mouse_area(button(text("Live Metrics")).style(button::secondary).on_press(
                    Message::Page(PageEvent::FocusChanged(Some(METRICS_TRIGGER))),
                ))
                .on_enter(Message::Page(PageEvent::MetricsEnter))
                .on_exit(Message::Page(PageEvent::MetricsLeave)),
            )
            .push(button(text("Hire Me")).on_press(Message::Page(PageEvent::HireMe)))
            .push(
                button(text("Resume"))
                    .style(button::secondary)
                    .on_press(Message::Page(PageEvent::FollowLink(content.resume_link()))),
            )
            .into()
    };

    let bar = row![logo, Space::new().width(Length::Fill), nav]
        .align_y(Alignment::Center)
        .padding([12, 24]);
    if page.header().is_scrolled() {
        glass(bar).width(Length::Fill).into()
    } else {
        container(bar).width(Length::Fill).into()
    }
}

pub fn drawer(page: &Page) -> Element<'_, Message> {
    let mut entries = column![].spacing(12);
    for entry in &page.content().navigation {
        entries = entries.push(
            button(text(&entry.name).size(20))
                .style(button::text)
                .width(Length::Fill)
                .on_press(Message::Page(PageEvent::Navigate(entry.href.clone()))),
        );
    }
    let panel = glass(
        column![
            entries,
            button(text("Hire Me")).on_press(Message::Page(PageEvent::HireMe)),
            button(text("Download Resume"))
                .style(button::secondary)
                .on_press(Message::Page(PageEvent::FollowLink(page.content().resume_link()))),
        ]
        .spacing(24)
        .padding(24),
    )
    .width(Length::Fixed(300.0))
    .height(Length::Fill);

    let backdrop = mouse_area(widgets::scrim())
        .on_press(Message::Page(PageEvent::DrawerBackdrop))
        .on_scroll(widgets::wheel);
    let panel = mouse_area(panel).on_scroll(widgets::wheel);
    iced::widget::stack![backdrop, row![Space::new().width(Length::Fill), panel]].into()
}

pub fn hero(page: &Page) -> Element<'_, Message> {
    let personal = &page.content().personal;
    let mut stats = row![].spacing(24);
    for stat in &page.content().hero_stats {
        stats = stats.push(column![text(&stat.value).size(28).color(ACCENT), muted(&stat.label)]);
    }

    let mut dice = row![].spacing(12);
    if let Some(scene) = page.ambient().dice().and_then(|d| d.mounted()) {
        for die in scene.dice() {
            let protocol = die.protocol();
            dice = dice.push(
                mouse_area(button(text(protocol.name())).style(button::secondary))
                    .on_enter(Message::Page(PageEvent::Die(protocol, DiePointer::Enter)))
                    .on_exit(Message::Page(PageEvent::Die(protocol, DiePointer::Leave)))
                    .on_press(Message::Page(PageEvent::Die(protocol, DiePointer::Down)))
                    .on_release(Message::Page(PageEvent::Die(protocol, DiePointer::Up))),
            );
        }
    }

    section(
        page,
        SectionId::Hero,
        column![
            text(&personal.name).size(56),
            text(&personal.title).size(24).color(ACCENT),
            muted(&personal.tagline),
            stats,
            row![
                button(text("View Projects"))
                    .on_press(Message::Page(PageEvent::Navigate(SectionId::Projects.anchor()))),
                button(text("Download Resume"))
                    .style(button::secondary)
                    .on_press(Message::Page(PageEvent::FollowLink(page.content().resume_link()))),
                button(text("Get In Touch"))
                    .style(button::secondary)
                    .on_press(Message::Page(PageEvent::FollowLink(DeepLink::Mail(
                        MailtoLink::new(&personal.email),
                    )))),
            ]
            .spacing(12),
            dice,
        ]
        .spacing(20),
    )
}

pub fn skills(page: &Page) -> Element<'_, Message> {
    let content = page.content();
    let mut categories = column![].spacing(16);
    for category in &content.skills {
        let mut chips = row![].spacing(8);
        for skill in &category.skills {
            chips = chips.push(widgets::skill_button(page, skill));
        }
        categories = categories.push(
            glass(column![text(&category.label).size(20), chips.wrap()].spacing(10)).padding(16),
        );
    }
    let mut training = row![].spacing(8);
    for item in &content.training {
        training = training.push(widgets::skill_button(page, item));
    }
    section(
        page,
        SectionId::Skills,
        column![
            heading("Technical Skills"),
            categories,
            text("Training & Certifications").size(20),
            training.wrap(),
        ]
        .spacing(20),
    )
}

pub fn projects(page: &Page) -> Element<'_, Message> {
    let mut cards = column![].spacing(16);
    for project in &page.content().projects {
        let chip: Element<'_, Message> = match page.chip(&project.id) {
            Some(chip) => widgets::chip_badge(chip),
            None => Space::new().into(),
        };
        let card = glass(
            column![
                row![text(&project.title).size(20), Space::new().width(Length::Fill), chip],
                muted(&project.category),
                text(&project.impact).color(ACCENT),
                muted(project.status.to_string()),
            ]
            .spacing(6),
        )
        .padding(16)
        .width(Length::Fill);

        let open = Message::Page(PageEvent::OpenProject(project.id.clone()));
        let hover = |hovered| {
            Message::Page(PageEvent::CardHover {
                project: project.id.clone(),
                hovered,
            })
        };
        cards = cards.push(
            mouse_area(button(card).style(button::text).on_press(open))
                .on_enter(hover(true))
                .on_exit(hover(false)),
        );
    }
    section(
        page,
        SectionId::Projects,
        column![
            heading("Featured Projects"),
            cards,
            button(text("Discuss Your Project")).on_press(Message::Page(PageEvent::DiscussProject)),
        ]
        .spacing(20),
    )
}

pub fn research(page: &Page) -> Element<'_, Message> {
    let mut items = column![].spacing(16);
    for item in &page.content().research {
        let mut body = column![
            text(&item.title).size(20),
            muted(&item.description),
            text(item.technologies.join(" · ")).size(14).color(ACCENT),
        ]
        .spacing(6);
        if let Some(collaborators) = &item.collaborators {
            body = body.push(muted(format!("With {}", collaborators.join(", "))));
        }
        items = items.push(glass(body).padding(16).width(Length::Fill));
    }
    section(
        page,
        SectionId::Research,
        column![heading("Research & Publications"), items].spacing(20),
    )
}

pub fn awards(page: &Page) -> Element<'_, Message> {
    let mut items = column![].spacing(12);
    for award in &page.content().awards {
        items = items.push(
            glass(
                row![
                    text(&award.title).width(Length::Fill),
                    muted(&award.organization),
                    text(&award.year).color(ACCENT),
                ]
                .spacing(16),
            )
            .padding(12)
            .width(Length::Fill),
        );
    }
    section(page, SectionId::Awards, column![heading("Awards & Recognition"), items].spacing(20))
}

pub fn contact(page: &Page) -> Element<'_, Message> {
    let mut methods = column![].spacing(12);
    for method in page.content().contact_methods() {
        methods = methods.push(
            button(column![
                text(method.label).size(18),
                muted(method.value),
                muted(method.description),
            ])
            .style(button::text)
            .on_press(Message::Page(PageEvent::FollowLink(method.link))),
        );
    }

    let form = page.contact();
    let mut fields = column![].spacing(10);
    for field in ContactField::ALL {
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        let focused = page.focused() == Some(&contact_focus(field));
        let input = text_input(field.placeholder(), form.get(field))
            .on_input(move |value| Message::Page(PageEvent::ContactInput(field, value)))
            .padding(10);
        fields = fields.push(column![
            if focused { text(label).color(ACCENT) } else { text(label) },
            input
        ]);
    }
    fields =
        fields.push(button(text("Send Message")).on_press(Message::Page(PageEvent::ContactSubmit)));

    section(
        page,
        SectionId::Contact,
        column![
            heading("Let's Work Together"),
            row![
                methods.width(Length::FillPortion(1)),
                glass(fields).padding(20).width(Length::FillPortion(2)),
            ]
            .spacing(24),
        ]
        .spacing(20),
    )
}

pub fn footer(page: &Page) -> Element<'_, Message> {
    let mut groups = row![].spacing(48);
    for group in page.footer_groups() {
        let mut links = column![text(group.title).size(18)].spacing(8);
        for link in group.links {
            links = links.push(
                button(text(link.name).size(14))
                    .style(button::text)
                    .on_press(Message::Page(PageEvent::FollowLink(link.link))),
            );
        }
        groups = groups.push(links);
    }
    container(
        column![
            groups,
            row![
                muted(page.copyright()),
                Space::new().width(Length::Fill),
                button(text("Back to top"))
                    .style(button::text)
                    .on_press(Message::Page(PageEvent::BackToTop)),
            ],
        ]
        .spacing(24)
        .padding(32),
    )
    .width(Length::Fill)
    .into()
}

/// The case-study modal, while it is visible.
pub fn case_study(page: &Page) -> Option<Element<'_, Message>> {
    let study = page.case_study();
    if !study.modal().is_visible() {
        return None;
    }
    let project = study.selected()?;

    let mut features = column![text("Key Features").size(18)].spacing(4);
    for feature in &project.key_features {
        features = features.push(muted(format!("• {feature}")));
    }
    let dialog = glass(
        column![
            row![
                text(&project.title).size(28),
                Space::new().width(Length::Fill),
                button(text("Close")).on_press(Message::Page(PageEvent::CloseProject)),
            ],
            text(&project.impact).color(ACCENT),
            muted(&project.description),
            features,
            text(project.technologies.join(" · ")).size(14).color(ACCENT),
            button(text("Discuss This Project")).on_press(Message::Page(PageEvent::DiscussProject)),
        ]
        .spacing(14)
        .padding(28),
    )
    .max_width(760);

    let backdrop = mouse_area(widgets::scrim())
        .on_press(Message::Page(PageEvent::ModalBackdrop))
        .on_scroll(widgets::wheel);
    Some(
        iced::widget::stack![
            backdrop,
            container(mouse_area(dialog).on_press(Message::None).on_scroll(widgets::wheel))
                .center(Length::Fill)
                .padding(24),
        ]
        .into(),
    )
}

fn heading(label: &str) -> iced::widget::Text<'_> {
    text(label).size(36)
}
